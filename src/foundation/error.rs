use std::path::PathBuf;

/// Convenience result type used across hiscore.
pub type HiscoreResult<T> = Result<T, HiscoreError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HiscoreError {
    /// Invalid run configuration (geometry, frame rate, positions).
    #[error("configuration error: {0}")]
    Config(String),

    /// The score text file could not be opened, stat'd or read.
    #[error("file unavailable: {}: {source}", path.display())]
    FileUnavailable {
        /// Path of the text source.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Errors while rasterizing text, compositing or presenting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HiscoreError {
    /// Build a [`HiscoreError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HiscoreError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HiscoreError::FileUnavailable`] value.
    pub fn file_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnavailable {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
