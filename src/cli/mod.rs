//! Command-line parsing for the weight tracker.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the series/metrics code.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Channel;

pub mod menu;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about = "Weight tracker with EMA trend lines")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Data file (default: $WEIGHT_TRACKER_FILE, else `data.csv`).
    #[arg(short = 'f', long, global = true, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Short EMA window (days).
    #[arg(long, global = true, default_value = "7")]
    pub short: NonZeroU32,

    /// Long EMA window (days).
    #[arg(long, global = true, default_value = "30")]
    pub long: NonZeroU32,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new measurement.
    Add(AddArgs),
    /// Print all records with change, weekly rate and EMAs.
    Show(ShowArgs),
    /// Plot records as ASCII in the terminal, or to a BMP image.
    Plot(PlotArgs),
    /// Export enriched records to CSV and/or JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    Tui,
    /// Numbered text menu (default when no subcommand is given).
    Menu,
}

#[derive(Debug, Args, Clone)]
pub struct AddArgs {
    /// Measured value (kg).
    pub value: f64,

    /// Measurement date, YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Also print a summary of the whole series.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Channels to plot (comma separated).
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Channel::ALL)]
    pub channel: Vec<Channel>,

    /// Plot width (columns, or pixels with --bmp).
    #[arg(long)]
    pub width: Option<usize>,

    /// Plot height (rows, or pixels with --bmp).
    #[arg(long)]
    pub height: Option<usize>,

    /// Write a BMP image instead of printing to the terminal.
    #[arg(long, value_name = "PATH")]
    pub bmp: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Write records as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write records as JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["wt", "show", "-f", "w.csv", "--short", "5", "--summary"]);
        assert_eq!(cli.global.file, Some(PathBuf::from("w.csv")));
        assert_eq!(cli.global.short.get(), 5);
        assert_eq!(cli.global.long.get(), 30);
        assert!(matches!(cli.command, Command::Show(ShowArgs { summary: true })));
    }

    #[test]
    fn plot_channels_default_to_all() {
        let cli = Cli::parse_from(["wt", "plot"]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.channel, Channel::ALL.to_vec());

        let cli = Cli::parse_from(["wt", "plot", "--channel", "value,ema-long"]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.channel, vec![Channel::Value, Channel::EmaLong]);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(Cli::try_parse_from(["wt", "show", "--short", "0"]).is_err());
    }
}
