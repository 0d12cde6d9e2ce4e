//! fairgraph Code Generator CLI
//!
//! Generates fairgraph Python modules from a tree of openMINDS schema templates.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fairgraph_codegen::{CodegenConfig, GenerationDriver};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairgraph-codegen")]
#[command(about = "Generate fairgraph classes from openMINDS schemas")]
#[command(version)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Root of the <group>/<version>/ schema tree
    #[arg(short, long)]
    schemas: Option<PathBuf>,

    /// Package root to write generated modules to
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Base class of generated classes
    #[arg(long)]
    base_class: Option<String>,

    /// Default KG space of generated classes
    #[arg(long)]
    default_space: Option<String>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    save_config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CodegenConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    if let Some(schemas) = cli.schemas {
        config.paths.schema_root = schemas;
    }
    if let Some(target) = cli.target {
        config.paths.target_root = target;
    }
    if let Some(base_class) = cli.base_class {
        config.classes.base_class = base_class;
    }
    if let Some(default_space) = cli.default_space {
        config.classes.default_space = default_space;
    }

    if let Some(path) = cli.save_config {
        config
            .save(&path)
            .with_context(|| format!("writing configuration to {}", path))?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    let mut driver = GenerationDriver::from_config(&config);
    let report = driver
        .run(&config.paths.schema_root)
        .with_context(|| format!("generation aborted during {:?}", driver.stage()))?;

    println!(
        "Generated {} classes in {} groups ({} files) under {}",
        report.schema_count,
        report.group_count,
        report.files.len(),
        config.paths.target_root.display()
    );
    Ok(())
}
