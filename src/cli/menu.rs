//! Numbered text menu.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the menu provides the "run `wt` and pick an action" UX
//!
//! I/O is generic over `BufRead`/`Write` so the loop can be driven from tests.

use std::io::{BufRead, Write};

use crate::app::pipeline;
use crate::domain::TrackerConfig;
use crate::error::AppError;
use crate::io::store;
use crate::plot::{render_ascii_plot, series_from_records};
use crate::report::format_records;

/// Run the menu until the user exits or input ends.
pub fn run_menu<R: BufRead, W: Write>(config: &TrackerConfig, input: &mut R, out: &mut W) -> Result<(), AppError> {
    loop {
        say(
            out,
            "\nWeight Tracker Menu:\n1. Record new weight\n2. Show all records\n3. Plot records\n0. Exit\nEnter your choice: ",
        )?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(value) = prompt_weight(input, out)? else {
                    return Ok(());
                };
                match store::append_value(&config.data_path, store::today(), value) {
                    Ok(()) => say(out, "Value recorded successfully!\n")?,
                    Err(err) => say(out, &format!("{err}\n"))?,
                }
                show_records(config, out)?;
            }
            "2" => show_records(config, out)?,
            "3" => plot_records(config, out)?,
            "0" => {
                say(out, "Goodbye!\n")?;
                return Ok(());
            }
            _ => say(out, "Invalid choice! Please try again.\n")?,
        }
    }
}

/// Prompt until a positive number is entered; `None` on end of input.
fn prompt_weight<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<f64>, AppError> {
    say(out, "Enter your weight (kg): ")?;
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => return Ok(Some(v)),
            _ => say(out, "Invalid input. Please enter a valid number: ")?,
        }
    }
}

// Pipeline failures (bad rows, duplicate dates) are reported, not fatal,
// so the user can keep using the menu.
fn show_records<W: Write>(config: &TrackerConfig, out: &mut W) -> Result<(), AppError> {
    match pipeline::load_records(config) {
        Ok(records) => say(out, &format_records(&records, config.windows)),
        Err(err) => say(out, &format!("{err}\n")),
    }
}

fn plot_records<W: Write>(config: &TrackerConfig, out: &mut W) -> Result<(), AppError> {
    match pipeline::load_records(config) {
        Ok(records) if records.is_empty() => say(out, "No records found!\n"),
        Ok(records) => {
            let series = series_from_records(&records, &config.channels, config.windows);
            say(out, &render_ascii_plot(&series, config.plot_width, config.plot_height))
        }
        Err(err) => say(out, &format!("{err}\n")),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn say<W: Write>(out: &mut W, text: &str) -> Result<(), AppError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write output: {e}")))
}
