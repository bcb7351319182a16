//! Per-column statistics.
//!
//! Numeric columns get count/mean/median/std/min/max/missing; everything else
//! gets count/unique/missing plus its distinct values when there are few of
//! them. The aggregates themselves come straight from polars. Standard
//! deviation is the sample estimate (ddof = 1), which is also what the text
//! report prints.

use super::types::{ColumnType, NonNumericSummary, NumericSummary, TableStatistics};
use crate::config::PreviewSettings;
use crate::utils::fmt_stat;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::collections::HashSet;
use std::fmt::Write as _;

const SAMPLE_DDOF: u8 = 1;

pub fn compute_statistics(df: &DataFrame, settings: &PreviewSettings) -> Result<TableStatistics> {
    let mut column_types = Vec::with_capacity(df.width());
    let mut numeric = Vec::new();
    let mut non_numeric = Vec::new();

    for col in df.get_columns() {
        let name = col.name().to_string();
        let is_numeric = col.dtype().is_primitive_numeric();
        column_types.push(ColumnType {
            name: name.clone(),
            dtype: col.dtype().to_string(),
            is_numeric,
        });

        let series = col.as_materialized_series();
        if is_numeric {
            numeric.push(
                summarise_numeric(series)
                    .with_context(|| format!("Statistics failed for numeric column '{name}'"))?,
            );
        } else {
            non_numeric.push(
                summarise_non_numeric(series, settings.max_listed_values)
                    .with_context(|| format!("Statistics failed for column '{name}'"))?,
            );
        }
    }

    Ok(TableStatistics {
        row_count: df.height(),
        column_count: df.width(),
        estimated_kb: df.estimated_size() as f64 / 1024.0,
        column_types,
        numeric,
        non_numeric,
    })
}

pub fn summarise_numeric(series: &Series) -> Result<NumericSummary> {
    let casted = series.cast(&DataType::Float64)?;
    // NaN is missing, not a value.
    let ca: Float64Chunked = casted
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    let missing = ca.null_count();

    Ok(NumericSummary {
        name: series.name().to_string(),
        count: ca.len() - missing,
        mean: ca.mean(),
        median: ca.median(),
        std_dev: ca.std(SAMPLE_DDOF),
        min: ca.min(),
        max: ca.max(),
        missing,
    })
}

pub fn summarise_non_numeric(series: &Series, max_listed: usize) -> Result<NonNumericSummary> {
    let missing = series.null_count();
    let distinct = distinct_values(series)?;
    let unique = distinct.len();

    Ok(NonNumericSummary {
        name: series.name().to_string(),
        count: series.len() - missing,
        unique,
        missing,
        values: (unique <= max_listed).then_some(distinct),
    })
}

/// Non-null distinct values rendered as text, in first-appearance order.
fn distinct_values(series: &Series) -> Result<Vec<String>> {
    let as_text = series.cast(&DataType::String)?;
    let mut seen = HashSet::new();
    let values = as_text
        .str()?
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect();
    Ok(values)
}

/// Renders the statistics report shown in the Statistics tab.
pub fn statistics(df: &DataFrame, settings: &PreviewSettings) -> Result<String> {
    let stats = compute_statistics(df, settings)?;
    Ok(render_statistics(&stats, settings))
}

pub fn render_statistics(stats: &TableStatistics, settings: &PreviewSettings) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_statistics(&mut out, stats, settings).unwrap_or_default();
    out
}

fn write_statistics(
    out: &mut String,
    stats: &TableStatistics,
    settings: &PreviewSettings,
) -> std::fmt::Result {
    let heavy = "=".repeat(settings.rule_width);
    let light = "-".repeat(settings.rule_width);

    writeln!(out, "DATA STATISTICS")?;
    writeln!(out, "{heavy}\n")?;
    writeln!(out, "Total Rows: {}", stats.row_count)?;
    writeln!(out, "Total Columns: {}", stats.column_count)?;
    writeln!(out, "Memory Usage: {:.2} KB\n", stats.estimated_kb)?;

    writeln!(out, "COLUMN TYPES:")?;
    writeln!(out, "{light}")?;
    for ct in &stats.column_types {
        writeln!(out, "  {}: {}", ct.name, ct.dtype)?;
    }
    writeln!(out)?;

    if !stats.numeric.is_empty() {
        writeln!(out, "NUMERIC COLUMNS SUMMARY:")?;
        writeln!(out, "{light}\n")?;
        for s in &stats.numeric {
            writeln!(out, "{}:", s.name)?;
            writeln!(out, "  Count:   {}", s.count)?;
            writeln!(out, "  Mean:    {}", fmt_stat(s.mean))?;
            writeln!(out, "  Median:  {}", fmt_stat(s.median))?;
            writeln!(out, "  Std Dev: {}", fmt_stat(s.std_dev))?;
            writeln!(out, "  Min:     {}", fmt_stat(s.min))?;
            writeln!(out, "  Max:     {}", fmt_stat(s.max))?;
            writeln!(out, "  Missing: {}\n", s.missing)?;
        }
    }

    if !stats.non_numeric.is_empty() {
        writeln!(out, "NON-NUMERIC COLUMNS SUMMARY:")?;
        writeln!(out, "{light}\n")?;
        for s in &stats.non_numeric {
            writeln!(out, "{}:", s.name)?;
            writeln!(out, "  Count:   {}", s.count)?;
            writeln!(out, "  Unique:  {}", s.unique)?;
            writeln!(out, "  Missing: {}", s.missing)?;
            if let Some(values) = &s.values {
                writeln!(out, "  Values:  {}", values.join(", "))?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}
