//! # CSV Plotter
//!
//! Load a CSV file, look at its first rows and per-column statistics, and
//! draw a line or bar chart from two of its columns. Charts open in their own
//! window and can be saved as PNG, PDF, JPEG or SVG.
//!
//! The same pipeline runs without a window:
//!
//! ```no_run
//! use csv_plotter::config::AppConfig;
//! use csv_plotter::plotter::logic::{ChartKind, ChartRequest, FileSession, export, render};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let mut session = FileSession::new();
//! let df = session.load(Some(Path::new("sales.csv")))?;
//!
//! let request = ChartRequest::new(df, Some("date"), Some("revenue"), ChartKind::Line)?;
//! let figure = render(&request, &config.chart)?;
//! export(&figure, Path::new("revenue.png"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`plotter::logic`]: loading, validation, preview, statistics, figures and export
//! - [`plotter::controller`]: the load → select → chart state machine
//! - [`plotter::gui`]: the egui front end
//! - [`config`]: styling, limits and user-facing wording
//! - [`error`]: the error taxonomy shown to users
//! - [`logging`]: tracing setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod plotter;
pub mod theme;
pub mod utils;
