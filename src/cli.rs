use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use csv_plotter::config::AppConfig;
use csv_plotter::plotter::controller::with_default_extension;
use csv_plotter::plotter::logic::{
    ChartKind, ChartRequest, FileSession, compute_statistics, export, preview, render,
    render_statistics,
};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csv_plotter", version, about = "Preview CSV files and plot their columns")]
pub struct Cli {
    /// Without a subcommand the desktop window opens.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the first rows of a CSV file
    Preview {
        file: PathBuf,

        /// Rows to show (5-100, in steps of 5)
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Print per-column statistics
    Stats {
        file: PathBuf,

        /// Emit JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Render a chart straight to a file
    Chart {
        file: PathBuf,

        /// X-axis column
        #[arg(short, long)]
        x: String,

        /// Y-axis column (must be numeric)
        #[arg(short, long)]
        y: String,

        /// Chart kind: line or bar
        #[arg(short, long, default_value = "line")]
        kind: ChartKind,

        /// Output path; PNG, PDF, JPEG or SVG by extension (.png if none)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the default configuration as JSON
    Config,
}

pub fn run_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Preview { file, rows } => handle_preview(&file, rows, config),
        Commands::Stats { file, json } => handle_stats(&file, json, config),
        Commands::Chart {
            file,
            x,
            y,
            kind,
            output,
        } => handle_chart(&file, &x, &y, kind, output, config),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
    }
}

fn open<'a>(session: &'a mut FileSession, file: &Path) -> Result<&'a DataFrame> {
    session
        .load(Some(file))
        .with_context(|| format!("Could not open {}", file.display()))
}

fn handle_preview(file: &Path, rows: Option<usize>, config: &AppConfig) -> Result<()> {
    let mut session = FileSession::new();
    let df = open(&mut session, file)?;

    let rows = config
        .preview
        .clamp_rows(rows.unwrap_or(config.preview.default_rows));
    print!("{}", preview(df, rows, &config.preview)?);
    Ok(())
}

fn handle_stats(file: &Path, json: bool, config: &AppConfig) -> Result<()> {
    let mut session = FileSession::new();
    let df = open(&mut session, file)?;

    let stats = compute_statistics(df, &config.preview)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_statistics(&stats, &config.preview));
    }
    Ok(())
}

fn handle_chart(
    file: &Path,
    x: &str,
    y: &str,
    kind: ChartKind,
    output: PathBuf,
    config: &AppConfig,
) -> Result<()> {
    let mut session = FileSession::new();
    let df = open(&mut session, file)?;

    let request = ChartRequest::new(df, Some(x), Some(y), kind)?;
    let figure = render(&request, &config.chart)?;
    let output = with_default_extension(output);
    export(&figure, &output)?;

    println!("{}", config.messages.chart_saved(&output.display().to_string()));
    Ok(())
}
