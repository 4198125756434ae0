//! Command line entry points
//!
//! - `serve`: run the registration HTTP service
//! - `check`: run the duplicate check for a single candidate and print the report

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// CIE Ignite team registration service
#[derive(Parser)]
#[command(name = "ignite-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the registration HTTP service
    Serve,

    /// Check a candidate team for duplicate registrations
    Check(check::CheckArgs),
}
