//! Certseal CLI Library
//!
//! Argument definitions and command handlers for the `certseal` binary.

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};
