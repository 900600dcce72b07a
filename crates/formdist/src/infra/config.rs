//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::{AssetStep, BuildPlan, BundleTarget};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
const WORKSPACE_CONFIG_FILE: &str = "formdist.toml";

/// Layered configuration loaded from built-in defaults, the workspace
/// `formdist.toml`, and environment overrides, in that precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub bundle: BundleSettings,
    #[serde(default)]
    plan: PlanConfig,
}

/// Resolved inputs the bundler and pipeline operate on.
///
/// Directories are resolved against the project root at load time. Text
/// encoding is fixed UTF-8 throughout (reads and writes alike).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub output_dir: PathBuf,
    pub src_dir: PathBuf,
    pub template_dir: PathBuf,
    pub line_separator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Paths {
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    src_dir: Option<PathBuf>,
    #[serde(default)]
    template_dir: Option<PathBuf>,
}

impl Paths {
    fn default_output_dir() -> PathBuf {
        "distribution".into()
    }

    fn default_src_dir() -> PathBuf {
        "src".into()
    }

    fn default_template_dir() -> PathBuf {
        PathBuf::from("builder").join("templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(Self::default_output_dir)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.src_dir.clone().unwrap_or_else(Self::default_src_dir)
    }

    pub fn template_dir(&self) -> PathBuf {
        self.template_dir
            .clone()
            .unwrap_or_else(Self::default_template_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BundleSettings {
    #[serde(default)]
    line_separator: Option<String>,
}

impl BundleSettings {
    fn default_line_separator() -> String {
        "\n".to_owned()
    }

    pub fn line_separator(&self) -> String {
        self.line_separator
            .clone()
            .unwrap_or_else(Self::default_line_separator)
    }
}

/// Plan overrides from the config file; unset fields fall back to the stock
/// layout per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
struct PlanConfig {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    sources: Option<Vec<PathBuf>>,
    #[serde(default)]
    subdirs: Option<Vec<PathBuf>>,
    #[serde(default)]
    bundles: Option<Vec<BundleTarget>>,
    #[serde(default)]
    assets: Option<Vec<AssetStep>>,
}

impl PlanConfig {
    fn resolve(&self) -> BuildPlan {
        let stock = BuildPlan::stock();
        BuildPlan {
            version: self.version.clone().unwrap_or(stock.version),
            sources: self.sources.clone().unwrap_or(stock.sources),
            subdirs: self.subdirs.clone().unwrap_or(stock.subdirs),
            bundles: self.bundles.clone().unwrap_or(stock.bundles),
            assets: self.assets.clone().unwrap_or(stock.assets),
        }
    }
}

/// Environment overrides for the directory settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output_dir: Option<PathBuf>,
    src_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output_dir: env::var_os("FORMDIST_OUTPUT_DIR").map(PathBuf::from),
            src_dir: env::var_os("FORMDIST_SRC_DIR").map(PathBuf::from),
            template_dir: env::var_os("FORMDIST_TEMPLATE_DIR").map(PathBuf::from),
        }
    }

    #[cfg(test)]
    fn for_tests(output_dir: &str) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            ..Self::default()
        }
    }
}

impl Config {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let workspace = root.join(WORKSPACE_CONFIG_FILE);
        Self::load_with_layers(Some(workspace), EnvOverrides::from_env())
    }

    fn load_with_layers(workspace: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut config = Self::from_str(&DEFAULT_CONFIG)?;

        if let Some(path) = workspace.filter(|path| path.exists()) {
            config = config.merge(Self::from_file(&path)?);
        }

        Ok(apply_env_overrides(config, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, overlay: Self) -> Self {
        Self {
            paths: Paths {
                output_dir: overlay.paths.output_dir.or(self.paths.output_dir),
                src_dir: overlay.paths.src_dir.or(self.paths.src_dir),
                template_dir: overlay.paths.template_dir.or(self.paths.template_dir),
            },
            bundle: BundleSettings {
                line_separator: overlay.bundle.line_separator.or(self.bundle.line_separator),
            },
            plan: PlanConfig {
                version: overlay.plan.version.or(self.plan.version),
                sources: overlay.plan.sources.or(self.plan.sources),
                subdirs: overlay.plan.subdirs.or(self.plan.subdirs),
                bundles: overlay.plan.bundles.or(self.plan.bundles),
                assets: overlay.plan.assets.or(self.plan.assets),
            },
        }
    }

    /// Resolve the directory settings against the project root.
    pub fn build_config(&self, root: &Path) -> BuildConfig {
        BuildConfig {
            output_dir: root.join(self.paths.output_dir()),
            src_dir: root.join(self.paths.src_dir()),
            template_dir: root.join(self.paths.template_dir()),
            line_separator: self.bundle.line_separator(),
        }
    }

    /// Resolve the build plan, falling back to the stock layout for any
    /// field the config file leaves unset.
    pub fn build_plan(&self) -> BuildPlan {
        self.plan.resolve()
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(dir) = env.output_dir {
        config.paths.output_dir = Some(dir);
    }
    if let Some(dir) = env.src_dir {
        config.paths.src_dir = Some(dir);
    }
    if let Some(dir) = env.template_dir {
        config.paths.template_dir = Some(dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_file() {
        let config =
            Config::load_with_layers(None, EnvOverrides::default()).expect("load default config");
        assert_eq!(config.paths.output_dir(), PathBuf::from("distribution"));
        assert_eq!(config.bundle.line_separator(), "\n");

        let plan = config.build_plan();
        assert_eq!(plan.version, "0.9.0");
        assert_eq!(plan.sources.first(), Some(&PathBuf::from("form.js")));
        assert_eq!(plan.bundles.len(), 2);
        assert_eq!(plan.assets.len(), 4);
    }

    #[test]
    fn workspace_file_overrides_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join(WORKSPACE_CONFIG_FILE);
        fs::write(
            &file,
            r#"
[paths]
output_dir = "dist"

[plan]
version = "1.0.0"
sources = ["core.js"]
"#,
        )?;

        let config = Config::load_with_layers(Some(file), EnvOverrides::default())?;

        assert_eq!(config.paths.output_dir(), PathBuf::from("dist"));
        assert_eq!(config.paths.src_dir(), PathBuf::from("src"));

        let plan = config.build_plan();
        assert_eq!(plan.version, "1.0.0");
        assert_eq!(plan.sources, vec![PathBuf::from("core.js")]);
        assert_eq!(plan.bundles.len(), 2);
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join(WORKSPACE_CONFIG_FILE);
        fs::write(&file, "[paths]\noutput_dir = \"dist\"\n")?;

        let overrides = EnvOverrides::for_tests("elsewhere");
        let config = Config::load_with_layers(Some(file), overrides)?;
        assert_eq!(config.paths.output_dir(), PathBuf::from("elsewhere"));
        Ok(())
    }

    #[test]
    fn build_config_resolves_against_root() {
        let config =
            Config::load_with_layers(None, EnvOverrides::default()).expect("load default config");
        let resolved = config.build_config(Path::new("/project"));
        assert_eq!(resolved.output_dir, PathBuf::from("/project/distribution"));
        assert_eq!(resolved.src_dir, PathBuf::from("/project/src"));
        assert_eq!(
            resolved.template_dir,
            PathBuf::from("/project/builder/templates")
        );
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
