//! Command-line interface for spangapp.
//!
//! This module provides the CLI structure and command definitions for the
//! `spang` binary. Each data subcommand corresponds to one dashboard
//! section; invoking it is one selection change.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ChartCommand, ConfigCommand, DashboardCommand, DatasetArg, HomeCommand, MapCommand,
    OutputFormat, StatsCommand, StatusCommand,
};

/// spang - browse the Spacing Angels radar database
///
/// A read-only analytics tool over the database written by the Spacing
/// Angels roadside radar: raw tables, travel routes, distance and speed
/// series.
#[derive(Debug, Parser)]
#[command(name = "spang")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Show the landing page
    Home(HomeCommand),

    /// Browse one of the raw tables
    Dashboard(DashboardCommand),

    /// Show the positions and route of one travel
    Map(MapCommand),

    /// Plot cumulative distance over time
    Chart(ChartCommand),

    /// Show the speed histograms
    Stats(StatsCommand),

    /// Summarize the loaded datasets
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
