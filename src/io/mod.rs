//! Input/output helpers.
//!
//! - flat-file measurement store (`store`)
//! - record exports (CSV/JSON) (`export`)

pub mod export;
pub mod store;

pub use export::*;
pub use store::*;
