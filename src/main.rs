use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use texprep::config::{config_stub, load_config, PrepareConfig};
use texprep::{pick_entry_file_with, prepare_with};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Command, PickArgs, PrepareArgs, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();

    match args.command {
        Command::Prepare(args) => cmd_prepare(args),
        Command::Pick(args) => cmd_pick(args),
        Command::ConfigStub => {
            println!("{}", config_stub()?);
            Ok(())
        }
    }
}

fn cmd_prepare(args: PrepareArgs) -> Result<()> {
    init_tracing(args.verbose);
    let config = config_for(args.config.as_deref())?;
    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => fresh_staging_dir()?,
    };
    let prepared = prepare_with(&args.input, &out_dir, &config)
        .with_context(|| format!("prepare {}", args.input.display()))?;
    if args.json {
        let text = serde_json::to_string_pretty(&prepared).context("serialize report")?;
        println!("{text}");
    } else {
        println!("{}", prepared.entry_path.display());
    }
    Ok(())
}

fn cmd_pick(args: PickArgs) -> Result<()> {
    init_tracing(args.verbose);
    let config = config_for(args.config.as_deref())?;
    let resolution = pick_entry_file_with(&args.dir, &config.resolve_rules())
        .with_context(|| format!("pick entry document in {}", args.dir.display()))?;
    if args.json {
        let text = serde_json::to_string_pretty(&resolution).context("serialize resolution")?;
        println!("{text}");
    } else {
        println!("{}", resolution.file_name);
    }
    Ok(())
}

fn config_for(path: Option<&Path>) -> Result<PrepareConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PrepareConfig::default()),
    }
}

/// A new directory under the system temp dir; the caller owns its teardown.
fn fresh_staging_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix("texprep-")
        .tempdir()
        .context("create staging directory")?;
    Ok(dir.keep())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "texprep=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
