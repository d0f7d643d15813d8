use std::path::{Path, PathBuf};

use crate::errors::DevvyError;

/// Holds the process working directory inside a project for as long as it
/// lives, and puts the previous directory back when dropped.
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
}

impl WorkingDirGuard {
    /// Remember the current directory, then change into `dir`.
    pub fn enter(dir: &Path) -> Result<Self, DevvyError> {
        let original = std::env::current_dir().map_err(DevvyError::CurrentDirUnavailable)?;
        std::env::set_current_dir(dir).map_err(|source| DevvyError::ChangeDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        tracing::debug!(from = %original.display(), to = %dir.display(), "entered project directory");
        Ok(Self { original })
    }

    /// The directory restored on drop.
    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        match std::env::set_current_dir(&self.original) {
            Ok(()) => {
                tracing::debug!(to = %self.original.display(), "restored working directory")
            }
            Err(err) => tracing::warn!(
                to = %self.original.display(),
                error = %err,
                "failed to restore working directory"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::lock_cwd;
    use tempfile::tempdir;

    #[test]
    fn test_guard_enters_and_restores() {
        let _lock = lock_cwd();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();
        let target = dir.path().canonicalize().unwrap();

        {
            let guard = WorkingDirGuard::enter(&target).unwrap();
            assert_eq!(guard.original(), before.as_path());
            assert_eq!(std::env::current_dir().unwrap(), target);
        }

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let _lock = lock_cwd();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();
        let target = dir.path().to_path_buf();

        let result = std::panic::catch_unwind(|| {
            let _guard = WorkingDirGuard::enter(&target).unwrap();
            panic!("handler blew up");
        });

        assert!(result.is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_guard_enter_missing_directory_fails_without_moving() {
        let _lock = lock_cwd();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        let err = WorkingDirGuard::enter(&missing).unwrap_err();
        assert!(matches!(err, DevvyError::ChangeDirFailed { ref path, .. } if *path == missing));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
