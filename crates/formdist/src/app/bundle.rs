//! Concatenating ordered source files into distributable bundles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::template;
use crate::domain::errors::BuildError;
use crate::infra::config::BuildConfig;

/// Reserved placeholder name receiving the concatenated source content.
pub const BODY_KEY: &str = "body";

/// A wrapper template plus the caller-supplied placeholder values.
#[derive(Debug, Clone, Default)]
pub struct TemplateSpec {
    pub path: PathBuf,
    pub data: BTreeMap<String, String>,
}

impl TemplateSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: BTreeMap::new(),
        }
    }

    /// Add a placeholder value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Joins ordered source files and optionally wraps them in a template.
#[derive(Debug, Clone)]
pub struct Bundler {
    config: BuildConfig,
}

impl Bundler {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Concatenate `sources` in order, joined by the configured line
    /// separator with no trailing separator, and write the result to
    /// `output`.
    ///
    /// With a template, the joined content is injected under the reserved
    /// `body` key; a caller-supplied `body` entry is always overridden so
    /// the bundled code cannot be shadowed. Every read happens before the
    /// output file is opened, so a failing read leaves no partial artifact.
    pub fn bundle(
        &self,
        sources: &[PathBuf],
        output: &Path,
        template: Option<&TemplateSpec>,
    ) -> Result<(), BuildError> {
        let mut parts = Vec::with_capacity(sources.len());
        for path in sources {
            parts.push(read_text(path)?);
        }
        let mut content = parts.join(self.config.line_separator.as_str());

        if let Some(spec) = template {
            let template_text = read_text(&spec.path)?;
            let mut values = spec.data.clone();
            values.insert(BODY_KEY.to_owned(), content);
            content =
                template::render(&template_text, &values).map_err(|source| {
                    BuildError::Template {
                        path: spec.path.clone(),
                        source,
                    }
                })?;
        }

        fs::write(output, &content).map_err(|source| BuildError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        info!(artifact = %output.display(), "ready");
        Ok(())
    }
}

fn read_text(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}
