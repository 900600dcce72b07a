//! Copying auxiliary files and output directory bookkeeping.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::errors::BuildError;

/// Create `path` (and any missing parents) if it does not already exist.
///
/// Succeeds when the directory already exists or was created; fails only on
/// a genuine permission error or when a non-directory occupies the path.
/// Calling it repeatedly never errors beyond the first call.
pub fn ensure_directory(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::EnsureDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy `from` to `to`, overwriting any existing file.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), BuildError> {
    fs::copy(from, to).map_err(|source| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    info!(artifact = %to.display(), "ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("distribution/editors");

        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_directory_rejects_a_file_conflict() {
        let temp = tempfile::tempdir().unwrap();
        let occupied = temp.path().join("distribution");
        fs::write(&occupied, b"not a directory").unwrap();

        let err = ensure_directory(&occupied).unwrap_err();
        assert!(matches!(err, BuildError::EnsureDir { path, .. } if path == occupied));
    }

    #[test]
    fn copy_overwrites_the_destination() {
        let temp = tempfile::tempdir().unwrap();
        let from = temp.path().join("forms.css");
        let to = temp.path().join("out.css");
        fs::write(&from, b"body {}").unwrap();
        fs::write(&to, b"stale").unwrap();

        copy_file(&from, &to).unwrap();
        assert_eq!(fs::read(&to).unwrap(), b"body {}");
    }

    #[test]
    fn copy_of_a_missing_source_fails() {
        let temp = tempfile::tempdir().unwrap();
        let from = temp.path().join("absent.css");
        let to = temp.path().join("out.css");

        let err = copy_file(&from, &to).unwrap_err();
        assert!(matches!(err, BuildError::Copy { from: f, .. } if f == from));
    }
}
