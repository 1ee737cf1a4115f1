use std::{path::Path, time::SystemTime};

/// Cheap identity of a file's contents: last modification time plus byte size.
///
/// Two fingerprints compare equal only when both components match, so a
/// rewrite that keeps the mtime but changes the length is still detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
    /// Size in bytes.
    pub len: u64,
}

/// Produces a [`Fingerprint`] for a path.
pub trait ChangeDetector {
    /// Fingerprint of the file at `path`.
    fn fingerprint(&self, path: &Path) -> std::io::Result<Fingerprint>;
}

/// Fingerprints from filesystem metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsChangeDetector;

impl ChangeDetector for FsChangeDetector {
    fn fingerprint(&self, path: &Path) -> std::io::Result<Fingerprint> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        Ok(Fingerprint {
            // mtime is unsupported on some platforms
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}
