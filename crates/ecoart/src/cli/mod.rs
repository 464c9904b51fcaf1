//! Command-line interface for ecoart.
//!
//! This module provides the CLI structure for the `ecoart` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    ProjectFields, ResetCommand, ShowCommand, StatsCommand, StatusCommand,
};

/// ecoart - Manage the recycled-art project catalog
///
/// Lists, adds, edits and deletes art projects, and reports the collective
/// impact (bottle caps, denim, participants) across the catalog.
#[derive(Debug, Parser)]
#[command(name = "ecoart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects
    List(ListCommand),

    /// Show a single project
    Show(ShowCommand),

    /// Add a project
    Add(AddCommand),

    /// Edit a project
    Edit(EditCommand),

    /// Delete a project
    Delete(DeleteCommand),

    /// Show collective impact statistics
    Stats(StatsCommand),

    /// List the known project categories
    Categories,

    /// Replace the catalog with the default projects
    Reset(ResetCommand),

    /// Show storage and catalog status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
