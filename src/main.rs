//! # CSV Plotter
//!
//! Without arguments the desktop window opens. With a subcommand the plotter
//! runs headless:
//!
//! ```bash
//! csv_plotter preview sales.csv --rows 20
//! csv_plotter stats sales.csv --json
//! csv_plotter chart sales.csv --x date --y revenue --kind bar --output revenue.pdf
//! ```

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(clippy::print_stdout)] // CLI output

mod cli;

use anyhow::Result;
use clap::Parser as _;
use csv_plotter::config::AppConfig;
use csv_plotter::plotter::App;
use eframe::egui;
use std::sync::Arc;

fn main() -> Result<()> {
    csv_plotter::logging::init();

    let cli = cli::Cli::parse();
    let config = AppConfig::default();

    if let Some(command) = cli.command {
        return cli::run_command(command, &config);
    }

    run_gui(Arc::new(config))
}

fn run_gui(config: Arc<AppConfig>) -> Result<()> {
    let title = config.window.title.clone();
    let viewport = egui::ViewportBuilder::default()
        .with_title(&title)
        .with_inner_size([config.window.width, config.window.height])
        .with_min_inner_size([640.0, 480.0])
        .with_drag_and_drop(true);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!("Starting GUI");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {e}"))
}
