//! JavaScript minification step.

use std::fs;
use std::path::Path;

use minify_js::{Session, TopLevelMode, minify};
use tracing::info;

use crate::domain::errors::BuildError;

/// Minify a JavaScript file into `output`, overwriting any existing file.
///
/// Inputs are classic scripts (the AMD bundle included), so the minifier
/// runs in global top-level mode. A rejected input surfaces as
/// [`BuildError::Minify`] naming the source path.
pub fn minify_file(source: &Path, output: &Path) -> Result<(), BuildError> {
    let js = fs::read(source).map_err(|source_err| BuildError::Read {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let session = Session::new();
    let mut minified = Vec::new();
    minify(&session, TopLevelMode::Global, &js, &mut minified).map_err(|err| {
        BuildError::Minify {
            path: source.to_path_buf(),
            message: format!("{err:?}"),
        }
    })?;

    fs::write(output, &minified).map_err(|source_err| BuildError::Write {
        path: output.to_path_buf(),
        source: source_err,
    })?;
    info!(artifact = %output.display(), "ready");
    Ok(())
}
