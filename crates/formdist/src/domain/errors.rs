//! Build-facing error taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure modes surfaced by the bundling, minification, and asset steps.
///
/// Every variant names the offending path so the top-level diagnostic can
/// point at the file that broke the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory {}", path.display())]
    EnsureDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to minify {}: {message}", path.display())]
    Minify { path: PathBuf, message: String },
    #[error("template {} is invalid", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
}

/// Placeholder substitution failures, distinct from plain IO errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// An opening `{{` with no closing `}}` before the end of the template.
    #[error("unterminated placeholder at byte {offset}")]
    Unterminated { offset: usize },
    /// A `{{}}` token, or one containing only whitespace.
    #[error("empty placeholder at byte {offset}")]
    Empty { offset: usize },
    /// A placeholder with no value in the substitution mapping.
    #[error("no value for placeholder '{name}'")]
    Unresolved { name: String },
}
