//! The build driver: a fixed, hand-ordered sequence of bundle, minify, and
//! copy steps.

use std::path::PathBuf;

use tracing::debug;

use crate::app::assets::{copy_file, ensure_directory};
use crate::app::bundle::{Bundler, TemplateSpec};
use crate::app::minify::minify_file;
use crate::domain::errors::BuildError;
use crate::domain::model::BuildPlan;
use crate::infra::config::BuildConfig;

/// Placeholder name carrying the plan's version string into templates.
const VERSION_KEY: &str = "version";

/// Artifacts produced by a completed run, in production order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub artifacts: Vec<PathBuf>,
}

/// Executes a [`BuildPlan`] against a [`BuildConfig`].
///
/// Steps run synchronously in plan order, each to completion before the
/// next. The first failure halts the remaining steps; nothing is retried
/// and nothing is rolled back.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: BuildConfig,
    plan: BuildPlan,
}

impl Pipeline {
    pub fn new(config: BuildConfig, plan: BuildPlan) -> Self {
        Self { config, plan }
    }

    pub fn run(&self) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        ensure_directory(&self.config.output_dir)?;
        for subdir in &self.plan.subdirs {
            ensure_directory(&self.config.output_dir.join(subdir))?;
        }

        let sources: Vec<PathBuf> = self
            .plan
            .sources
            .iter()
            .map(|path| self.config.src_dir.join(path))
            .collect();
        let bundler = Bundler::new(self.config.clone());

        for target in &self.plan.bundles {
            let output = self.config.output_dir.join(&target.output);
            let template = target.template.as_ref().map(|name| {
                TemplateSpec::new(self.config.template_dir.join(name))
                    .with_value(VERSION_KEY, self.plan.version.clone())
            });
            bundler.bundle(&sources, &output, template.as_ref())?;
            report.artifacts.push(output.clone());

            if let Some(name) = &target.minify {
                let minified = self.config.output_dir.join(name);
                minify_file(&output, &minified)?;
                report.artifacts.push(minified);
            }
        }

        for asset in &self.plan.assets {
            let from = self.config.src_dir.join(&asset.source);
            let to = self.config.output_dir.join(&asset.output);
            copy_file(&from, &to)?;
            report.artifacts.push(to);

            if let Some(name) = &asset.minify {
                let minified = self.config.output_dir.join(name);
                minify_file(&from, &minified)?;
                report.artifacts.push(minified);
            }
        }

        debug!(artifacts = report.artifacts.len(), "build complete");
        Ok(report)
    }
}
