use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use formdist::app::pipeline::Pipeline;
use formdist::infra::config::Config;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Assembles the form library's distributable bundles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the bundles, their minified twins, and the copied assets
    Build {
        /// Project root the configured directories are resolved against
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Write artifacts somewhere other than the configured output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Read library sources from this directory
        #[arg(long)]
        src_dir: Option<PathBuf>,
        /// Read wrapper templates from this directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Print the resolved build plan without producing anything
    Plan {
        /// Project root whose configuration is inspected
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    formdist::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            root,
            output_dir,
            src_dir,
            template_dir,
        } => run_build(root, output_dir, src_dir, template_dir),
        Commands::Plan { root, json } => print_plan(root, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "formdist", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_build(
    root: PathBuf,
    output_dir: Option<PathBuf>,
    src_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(&root)?;
    let mut build_config = config.build_config(&root);

    // Joining an absolute override replaces the root-relative default.
    if let Some(dir) = output_dir {
        build_config.output_dir = root.join(dir);
    }
    if let Some(dir) = src_dir {
        build_config.src_dir = root.join(dir);
    }
    if let Some(dir) = template_dir {
        build_config.template_dir = root.join(dir);
    }

    let report = Pipeline::new(build_config, config.build_plan()).run()?;
    tracing::info!(artifacts = report.artifacts.len(), "build complete");
    Ok(())
}

fn print_plan(root: PathBuf, json: bool) -> Result<()> {
    let config = Config::load(&root)?;
    let plan = config.build_plan();

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("version {}", plan.version);
    println!("sources:");
    for source in &plan.sources {
        println!("  {}", source.display());
    }
    println!("bundles:");
    for bundle in &plan.bundles {
        let template = bundle
            .template
            .as_ref()
            .map(|path| format!(" (template {})", path.display()))
            .unwrap_or_default();
        println!("  {}{template}", bundle.output.display());
        if let Some(minified) = &bundle.minify {
            println!("  {}", minified.display());
        }
    }
    println!("assets:");
    for asset in &plan.assets {
        println!("  {} -> {}", asset.source.display(), asset.output.display());
        if let Some(minified) = &asset.minify {
            println!("  {} -> {}", asset.source.display(), minified.display());
        }
    }
    Ok(())
}
