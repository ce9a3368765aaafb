//! `weight-trend` library crate.
//!
//! The binary (`wt`) is a thin wrapper around this library so that:
//!
//! - the series pipeline is testable without spawning processes
//! - the front-ends (CLI, text menu, TUI) share one load/enrich path
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
