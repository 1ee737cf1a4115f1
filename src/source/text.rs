use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{HiscoreError, HiscoreResult},
    source::fingerprint::{ChangeDetector, Fingerprint, FsChangeDetector},
};

/// One title/score pair borrowed from the loaded lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEntry<'a> {
    /// Title line.
    pub title: &'a str,
    /// Score line.
    pub score: &'a str,
}

/// Line-oriented score file with change detection.
///
/// Lines are kept trimmed and non-blank, in file order. Even-indexed lines are
/// titles, the following odd-indexed line is the matching score. A trailing
/// unpaired line is kept in [`TextSource::lines`] but never forms an entry.
pub struct TextSource {
    path: PathBuf,
    detector: Box<dyn ChangeDetector>,
    lines: Vec<String>,
    fingerprint: Option<Fingerprint>,
}

impl std::fmt::Debug for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSource")
            .field("path", &self.path)
            .field("lines", &self.lines.len())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

impl TextSource {
    /// Source for `path`, watched through filesystem metadata. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_detector(path, FsChangeDetector)
    }

    /// Source for `path` with a custom change detector.
    pub fn with_detector(path: impl Into<PathBuf>, detector: impl ChangeDetector + 'static) -> Self {
        Self {
            path: path.into(),
            detector: Box::new(detector),
            lines: Vec::new(),
            fingerprint: None,
        }
    }

    /// Path of the text file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blank lines of the last successful read.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Fingerprint of the last successful read.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    /// True once a read has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.fingerprint.is_some()
    }

    /// Number of complete title/score pairs.
    pub fn pair_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Number of lines that belong to complete pairs.
    pub fn paired_len(&self) -> usize {
        self.pair_count() * 2
    }

    /// Entry whose title sits at `line_index` (must be even and paired).
    pub fn entry_at(&self, line_index: usize) -> Option<ScoreEntry<'_>> {
        if line_index % 2 != 0 || line_index + 1 >= self.lines.len() {
            return None;
        }
        Some(ScoreEntry {
            title: &self.lines[line_index],
            score: &self.lines[line_index + 1],
        })
    }

    /// All complete title/score pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = ScoreEntry<'_>> {
        self.lines.chunks_exact(2).map(|pair| ScoreEntry {
            title: &pair[0],
            score: &pair[1],
        })
    }

    /// Re-read the file if its fingerprint differs from the last successful read.
    ///
    /// Returns `Ok(true)` when the lines were replaced. The first call always reads.
    /// On failure the previous lines and fingerprint are left untouched.
    pub fn reload_if_changed(&mut self) -> HiscoreResult<bool> {
        let fingerprint = self
            .detector
            .fingerprint(&self.path)
            .map_err(|e| HiscoreError::file_unavailable(&self.path, e))?;
        if self.fingerprint == Some(fingerprint) {
            return Ok(false);
        }

        let bytes =
            std::fs::read(&self.path).map_err(|e| HiscoreError::file_unavailable(&self.path, e))?;
        self.lines = parse_lines(&String::from_utf8_lossy(&bytes));
        self.fingerprint = Some(fingerprint);

        tracing::info!(
            path = %self.path.display(),
            lines = self.lines.len(),
            pairs = self.pair_count(),
            "score text loaded"
        );
        Ok(true)
    }

    /// Reload at a cycle boundary.
    ///
    /// Once any read has succeeded, failures only log and the stale lines stay in
    /// effect. Before that, the error is returned since there is nothing to show.
    pub fn refresh(&mut self) -> HiscoreResult<bool> {
        match self.reload_if_changed() {
            Ok(changed) => Ok(changed),
            Err(e) if self.has_loaded() => {
                tracing::warn!(error = %e, "keeping previous score text");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Split on `\n` (tolerating `\r\n`), trim, and drop blank lines.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/source/text.rs"]
mod tests;
