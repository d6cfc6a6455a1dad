//! Preconditions for simulator scene (MJCF) files.

use std::path::Path;

use mjt_core::to_posix_string;

use crate::error::CheckerError;

/// `path` must exist and be a regular file.
///
/// # Errors
///
/// [`CheckerError::ModelMissing`] or [`CheckerError::ModelNotFile`].
pub fn ensure_model_file(path: &Path) -> Result<(), CheckerError> {
    if !path.exists() {
        return Err(CheckerError::ModelMissing(to_posix_string(path)));
    }
    if !path.is_file() {
        return Err(CheckerError::ModelNotFile(to_posix_string(path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.xml");
        std::fs::write(&path, "<mujoco/>").unwrap();
        assert!(ensure_model_file(&path).is_ok());
    }

    #[test]
    fn missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_model_file(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, CheckerError::ModelMissing(_)));
        assert!(err.to_string().ends_with("absent.xml` doesn't exist"), "{err}");
    }

    #[test]
    fn directory_is_not_a_model() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_model_file(dir.path()).unwrap_err();
        assert!(matches!(err, CheckerError::ModelNotFile(_)));
    }
}
