//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves the run config
//! - installs logging
//! - loads + enriches the series
//! - prints tables/plots, writes exports, or hands over to the menu/TUI

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{AddArgs, Command, ExportArgs, GlobalArgs, PlotArgs, ShowArgs};
use crate::domain::{DEFAULT_DATA_FILE, EmaWindows, TrackerConfig};
use crate::error::AppError;
use crate::io::{export, store};
use crate::plot::{bmp, render_ascii_plot, render_bitmap, series_from_records, write_bmp};
use crate::report::{format_records, format_summary};

pub mod pipeline;

/// Environment variable naming the data file.
pub const DATA_FILE_ENV: &str = "WEIGHT_TRACKER_FILE";

/// Entry point for the `wt` binary.
pub fn run() -> Result<(), AppError> {
    // We want plain `wt` (and `wt -f other.csv`) to open the text menu.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();
    let config = config_from_args(&cli.global, std::env::var(DATA_FILE_ENV).ok());

    // The TUI owns the terminal; log lines on stderr would corrupt the screen.
    if !matches!(cli.command, Command::Tui) {
        init_logging();
    }
    tracing::debug!(path = %config.data_path.display(), "resolved data file");

    match cli.command {
        Command::Add(args) => handle_add(&config, args),
        Command::Show(args) => handle_show(&config, args),
        Command::Plot(args) => handle_plot(config, args),
        Command::Export(args) => handle_export(config, args),
        Command::Tui => crate::tui::run(config),
        Command::Menu => {
            let stdin = std::io::stdin();
            crate::cli::menu::run_menu(&config, &mut stdin.lock(), &mut std::io::stdout())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weight_trend=warn".into());
    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve the run config: explicit flag, then environment, then default file.
pub fn config_from_args(args: &GlobalArgs, env_file: Option<String>) -> TrackerConfig {
    let data_path = args
        .file
        .clone()
        .or_else(|| env_file.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut config = TrackerConfig::with_data_path(data_path);
    config.windows = EmaWindows::new(args.short, args.long);
    config
}

fn handle_add(config: &TrackerConfig, args: AddArgs) -> Result<(), AppError> {
    let date = match args.date.as_deref() {
        Some(text) => crate::series::parse_date(text)?,
        None => store::today(),
    };
    store::append_value(&config.data_path, date, args.value)?;
    println!("Value recorded successfully!");
    Ok(())
}

fn handle_show(config: &TrackerConfig, args: ShowArgs) -> Result<(), AppError> {
    let records = pipeline::load_records(config)?;
    print!("{}", format_records(&records, config.windows));
    if args.summary {
        print!("{}", format_summary(&records, config.windows));
    }
    Ok(())
}

fn handle_plot(mut config: TrackerConfig, args: PlotArgs) -> Result<(), AppError> {
    config.channels = args.channel;
    config.bmp_path = args.bmp;
    let (default_w, default_h) = if config.bmp_path.is_some() {
        (bmp::DEFAULT_WIDTH, bmp::DEFAULT_HEIGHT)
    } else {
        (config.plot_width, config.plot_height)
    };
    config.plot_width = args.width.unwrap_or(default_w);
    config.plot_height = args.height.unwrap_or(default_h);
    if config.bmp_path.is_some() {
        bmp::check_dimensions(config.plot_width, config.plot_height)?;
    }

    let records = pipeline::load_records(&config)?;
    if records.is_empty() {
        println!("No records found!");
        return Ok(());
    }

    let series = series_from_records(&records, &config.channels, config.windows);
    match &config.bmp_path {
        Some(path) => {
            let canvas = render_bitmap(&series, config.plot_width, config.plot_height);
            write_bmp(path, &canvas)?;
            println!("BMP image created as {}", path.display());
        }
        None => print!("{}", render_ascii_plot(&series, config.plot_width, config.plot_height)),
    }
    Ok(())
}

fn handle_export(mut config: TrackerConfig, args: ExportArgs) -> Result<(), AppError> {
    config.export_csv = args.csv;
    config.export_json = args.json;
    if config.export_csv.is_none() && config.export_json.is_none() {
        return Err(AppError::new(2, "Nothing to export: pass --csv and/or --json."));
    }

    let records = pipeline::load_records(&config)?;
    if let Some(path) = &config.export_csv {
        export::write_records_csv(path, &records)?;
        println!("Wrote {} record(s) to {}", records.len(), path.display());
    }
    if let Some(path) = &config.export_json {
        export::write_records_json(path, &records)?;
        println!("Wrote {} record(s) to {}", records.len(), path.display());
    }
    Ok(())
}

/// Rewrite argv so `wt` defaults to `wt menu`.
///
/// Rules:
/// - `wt`                      -> `wt menu`
/// - `wt -f w.csv ...`         -> `wt menu -f w.csv ...`
/// - `wt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("menu".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "add" | "show" | "plot" | "export" | "tui" | "menu");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "menu flags".
    if arg1.starts_with('-') {
        argv.insert(1, "menu".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
