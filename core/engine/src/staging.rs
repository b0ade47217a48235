//! Staged copies of store files for atomic writes.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use credsync_common::{Error, Result};

/// A transient duplicate of a store file.
///
/// All read/write work during a sync happens against the copy; the original
/// is only touched by [`commit_to_original`](Self::commit_to_original), and
/// only after every staged step has succeeded. The temporary file is deleted
/// when the value is dropped, on every exit path; deletion failures during
/// drop are swallowed so they never mask a primary error.
#[derive(Debug)]
pub struct StagedCopy {
    original: PathBuf,
    temp: NamedTempFile,
}

impl StagedCopy {
    /// Duplicate the original store file to a temporary path.
    ///
    /// # Errors
    /// - `Error::NotFound` if the original does not exist (checked before
    ///   any temp file is created)
    /// - `Error::Staging` if the temp file cannot be created or copied to
    pub fn create(original: impl AsRef<Path>) -> Result<Self> {
        let original = original.as_ref().to_path_buf();
        if !original.exists() {
            return Err(Error::NotFound(original.display().to_string()));
        }

        let temp = NamedTempFile::new().map_err(|e| {
            Error::Staging(format!("failed to create staging file: {}", e))
        })?;
        fs::copy(&original, temp.path()).map_err(|e| {
            Error::Staging(format!(
                "failed to copy {} to staging file: {}",
                original.display(),
                e
            ))
        })?;

        debug!(
            "Staged {} at {}",
            original.display(),
            temp.path().display()
        );
        Ok(Self { original, temp })
    }

    /// Path of the temporary working copy.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Path of the original store file.
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Copy the staged copy's final bytes back over the original file.
    ///
    /// The only operation that mutates the real store.
    pub fn commit_to_original(&self) -> Result<()> {
        fs::copy(self.temp.path(), &self.original).map_err(|e| {
            Error::Write(format!(
                "failed to commit staged copy to {}: {}",
                self.original.display(),
                e
            ))
        })?;
        debug!("Committed staged copy to {}", self.original.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("store.db");
        fs::write(&original, b"original bytes").unwrap();

        let staged = StagedCopy::create(&original).unwrap();
        assert_eq!(fs::read(staged.path()).unwrap(), b"original bytes");
        assert_eq!(staged.original(), original.as_path());
    }

    #[test]
    fn test_missing_original_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = StagedCopy::create(dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_original_untouched_until_commit() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("store.db");
        fs::write(&original, b"before").unwrap();

        let staged = StagedCopy::create(&original).unwrap();
        fs::write(staged.path(), b"staged work").unwrap();
        assert_eq!(fs::read(&original).unwrap(), b"before");

        staged.commit_to_original().unwrap();
        assert_eq!(fs::read(&original).unwrap(), b"staged work");
    }

    #[test]
    fn test_commit_failure_surfaces_write_error() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("store.db");
        fs::write(&original, b"bytes").unwrap();
        let sibling = dir.path().join("other.db");
        fs::write(&sibling, b"other bytes").unwrap();

        let staged = StagedCopy::create(&original).unwrap();

        // An original that can no longer be written to makes the commit
        // step fail while everything else stays intact.
        fs::remove_file(&original).unwrap();
        fs::create_dir(&original).unwrap();

        let err = staged.commit_to_original().unwrap_err();
        assert!(matches!(err, Error::Write(_)));
        assert_eq!(fs::read(staged.path()).unwrap(), b"bytes");
        assert_eq!(fs::read(&sibling).unwrap(), b"other bytes");
    }

    #[test]
    fn test_drop_deletes_temp_file() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("store.db");
        fs::write(&original, b"bytes").unwrap();

        let staged = StagedCopy::create(&original).unwrap();
        let temp_path = staged.path().to_path_buf();
        assert!(temp_path.exists());

        drop(staged);
        assert!(!temp_path.exists());
        assert!(original.exists());
    }
}
