//! Prefijador CLI Library
//!
//! Host-controller side of the Prefijar transform worker: command
//! definitions, status-line output, and the HTTP front end.

#![warn(missing_docs)]

mod commands;
mod error;
mod output;
pub mod server;

pub use commands::{Cli, Commands, ReportFormat, ServeArgs, TestArgs, TransformArgs};
pub use error::{CliError, CliResult};
pub use output::StatusReporter;
pub use server::{build_router, ServeConfig, TransformServer};
