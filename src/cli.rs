//! CLI argument parsing for the staging workflow.
//!
//! The CLI is thin: it chooses the staging directory, loads an optional
//! config, and prints what the library returns.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "texprep",
    version,
    about = "Stage LaTeX inputs and pick the entry document to render",
    after_help = "Commands:\n  prepare --input <PATH> [--out-dir <DIR>]  Stage a file, directory, or .tar.gz and print the entry path\n  pick --dir <DIR>                         Print the entry document of an already staged directory\n  config-stub                              Print the default config JSON\n\nExamples:\n  texprep prepare --input paper.tar.gz --out-dir /tmp/render/1234\n  texprep prepare --input ~/papers/draft/main.tex --json\n  texprep pick --dir /tmp/render/1234",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Prepare(PrepareArgs),
    Pick(PickArgs),
    ConfigStub,
}

/// Prepare command inputs.
#[derive(Parser, Debug)]
#[command(about = "Stage an input and resolve its entry document")]
pub struct PrepareArgs {
    /// A .tex file, a directory, or a gzip-compressed tarball
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Staging directory (created if missing; defaults to a new temp dir)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// JSON config overriding the names the resolver looks for
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit a machine-readable JSON report
    #[arg(long)]
    pub json: bool,

    /// Log staging progress to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Pick command inputs.
#[derive(Parser, Debug)]
#[command(about = "Resolve the entry document of a staged directory")]
pub struct PickArgs {
    /// Directory to inspect (top level only)
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// JSON config overriding the names the resolver looks for
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit a machine-readable JSON report
    #[arg(long)]
    pub json: bool,

    /// Log resolution progress to stderr
    #[arg(long)]
    pub verbose: bool,
}
