//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::state::DatasetKind;

/// Output format for rendered sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for the terminal.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Dataset argument for the dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DatasetArg {
    /// The `iteration` table
    #[default]
    Iteration,
    /// The `plate_box` table
    PlateBox,
    /// The `run_parameters` table
    RunParameters,
    /// The `travel` table
    Travel,
}

impl From<DatasetArg> for DatasetKind {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Iteration => Self::Iteration,
            DatasetArg::PlateBox => Self::PlateBox,
            DatasetArg::RunParameters => Self::RunParameters,
            DatasetArg::Travel => Self::Travel,
        }
    }
}

/// Home command arguments.
#[derive(Debug, Args)]
pub struct HomeCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Dataset to display
    #[arg(short, long, value_enum, default_value = "iteration")]
    pub table: DatasetArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Travel to display (defaults to the first available)
    #[arg(short, long)]
    pub travel: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_dataset_arg_default() {
        assert_eq!(DatasetArg::default(), DatasetArg::Iteration);
    }

    #[test]
    fn test_dataset_arg_conversion() {
        assert_eq!(DatasetKind::from(DatasetArg::Iteration), DatasetKind::Iteration);
        assert_eq!(DatasetKind::from(DatasetArg::PlateBox), DatasetKind::PlateBox);
        assert_eq!(
            DatasetKind::from(DatasetArg::RunParameters),
            DatasetKind::RunParameters
        );
        assert_eq!(DatasetKind::from(DatasetArg::Travel), DatasetKind::Travel);
    }
}
