//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Prefijador: CLI for Prefijar - CSS vendor-prefixing transform worker
#[derive(Parser, Debug)]
#[command(name = "prefijador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform CSS through the prefixing pipeline
    Transform(TransformArgs),

    /// Run the bundled fixture suite and print a report
    Test(TestArgs),

    /// Show the worker status
    Status,

    /// Serve the worker protocol over HTTP
    Serve(ServeArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// CSS source text (reads --input when omitted)
    pub css: Option<String>,

    /// Read CSS from a file instead of the command line
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Logical input filename for diagnostics and source maps
    #[arg(long)]
    pub from: Option<String>,

    /// Output file; the transformed CSS is written there instead of stdout
    #[arg(long)]
    pub to: Option<PathBuf>,

    /// Generate a source map next to the output
    #[arg(long)]
    pub map: bool,

    /// Disable the vendor-prefixing step
    #[arg(long)]
    pub no_prefix: bool,

    /// Print the full reply envelope as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the test command
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON report
    Json,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PREFIJAR_PORT")]
    pub port: u16,

    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Allow cross-origin requests
    #[arg(long)]
    pub cors: bool,
}
