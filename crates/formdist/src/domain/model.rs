//! Domain models for build plans.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One concatenation target: an ordered source join, optionally wrapped in a
/// template, with an optional minified twin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleTarget {
    /// Output file, relative to the output directory.
    pub output: PathBuf,
    /// Wrapper template, relative to the template directory.
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Minified twin of the bundle, relative to the output directory.
    #[serde(default)]
    pub minify: Option<PathBuf>,
}

/// A file copied verbatim into the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStep {
    /// Source file, relative to the source directory.
    pub source: PathBuf,
    /// Destination, relative to the output directory.
    pub output: PathBuf,
    /// Minified twin produced from the source, relative to the output
    /// directory.
    #[serde(default)]
    pub minify: Option<PathBuf>,
}

/// The fixed, hand-ordered sequence of work a build executes.
///
/// `sources` order is semantically significant: it is the concatenation
/// order of every bundle and is preserved exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Version string injected as the `{{version}}` template value.
    pub version: String,
    /// Ordered list of files joined into each bundle, relative to the
    /// source directory.
    pub sources: Vec<PathBuf>,
    /// Output subdirectories ensured before any artifact is produced.
    pub subdirs: Vec<PathBuf>,
    /// Bundles to produce, in order.
    pub bundles: Vec<BundleTarget>,
    /// Assets copied after the bundles, in order.
    pub assets: Vec<AssetStep>,
}

impl BuildPlan {
    /// The stock artifact layout of the form library distribution: a primary
    /// bundle, an AMD variant sharing the same source list, minified twins
    /// of both, the stylesheet, and the optional editor/template modules.
    pub fn stock() -> Self {
        Self {
            version: "0.9.0".to_owned(),
            sources: [
                "form.js",
                "templates.js",
                "helpers.js",
                "validators.js",
                "field.js",
                "editors.js",
                "setup.js",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            subdirs: vec![PathBuf::from("editors"), PathBuf::from("templates")],
            bundles: vec![
                BundleTarget {
                    output: PathBuf::from("forms.js"),
                    template: Some(PathBuf::from("forms.js")),
                    minify: Some(PathBuf::from("forms.min.js")),
                },
                BundleTarget {
                    output: PathBuf::from("forms.amd.js"),
                    template: Some(PathBuf::from("forms.amd.js")),
                    minify: Some(PathBuf::from("forms.amd.min.js")),
                },
            ],
            assets: vec![
                AssetStep {
                    source: PathBuf::from("forms.css"),
                    output: PathBuf::from("forms.css"),
                    minify: None,
                },
                AssetStep {
                    source: PathBuf::from("editors/jquery-ui.js"),
                    output: PathBuf::from("editors/jquery-ui.js"),
                    minify: Some(PathBuf::from("editors/jquery-ui.min.js")),
                },
                AssetStep {
                    source: PathBuf::from("templates/bootstrap.js"),
                    output: PathBuf::from("templates/bootstrap.js"),
                    minify: None,
                },
                AssetStep {
                    source: PathBuf::from("templates/minimal.js"),
                    output: PathBuf::from("templates/minimal.js"),
                    minify: None,
                },
            ],
        }
    }
}
