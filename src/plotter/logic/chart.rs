//! Chart figures.
//!
//! A [`Figure`] is the toolkit-independent description of one chart: the
//! points to draw, how the x-axis is labelled and the style to draw them in.
//! The interactive window and the file exporter both draw from the same
//! figure, so what the user saves is what they saw.
//!
//! Points keep the table's row order. Nothing is sorted by x, so unsorted
//! x data yields a line that doubles back on itself.

use super::validation::{validate_column_selection, validate_numeric};
use crate::config::ChartStyle;
use crate::error::{AppError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub const ALL: [Self; 2] = [Self::Line, Self::Bar];

    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
        }
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(format!("unknown chart kind '{other}' (expected line or bar)")),
        }
    }
}

/// One render's worth of input, produced after validation.
#[derive(Clone, Copy)]
pub struct ChartRequest<'a> {
    pub df: &'a DataFrame,
    pub x_column: &'a str,
    pub y_column: &'a str,
    pub kind: ChartKind,
}

impl<'a> ChartRequest<'a> {
    /// Validates the selection against `df` and builds a request.
    ///
    /// # Errors
    ///
    /// Fails when a column is missing, both columns are the same, or the
    /// y-column is not numeric.
    pub fn new(
        df: &'a DataFrame,
        x_column: Option<&'a str>,
        y_column: Option<&'a str>,
        kind: ChartKind,
    ) -> Result<Self> {
        validate_column_selection(x_column, y_column)?;
        let (Some(x_column), Some(y_column)) = (x_column, y_column) else {
            return Err(crate::error::SelectionError::NoColumnSelected.into());
        };
        if df.column(x_column).is_err() {
            return Err(crate::error::TypeError::ColumnNotFound(x_column.to_owned()).into());
        }
        validate_numeric(df, y_column)?;
        Ok(Self {
            df,
            x_column,
            y_column,
            kind,
        })
    }
}

/// How x positions map back to tick labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum XAxis {
    /// Points sit at their numeric x value.
    Numeric,
    /// Each distinct label owns the integer slot at its index.
    Categorical(Vec<String>),
}

impl XAxis {
    /// Tick text for an axis position, if the position carries one.
    pub fn tick_label(&self, position: f64) -> Option<String> {
        match self {
            Self::Numeric => Some(crate::utils::fmt_tick(position)),
            Self::Categorical(labels) => {
                let rounded = position.round();
                if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
                    return None;
                }
                labels.get(rounded as usize).cloned()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigurePoint {
    pub x: f64,
    pub label: String,
    /// `None` for a missing y value; lines break there and no bar is drawn.
    pub y: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: XAxis,
    /// One entry per table row, in row order.
    pub points: Vec<FigurePoint>,
    pub bar_width: f64,
    pub style: ChartStyle,
}

impl Figure {
    /// Name offered when saving, e.g. `line_chart_revenue_vs_date`.
    pub fn default_file_stem(&self) -> String {
        let stem = format!("{}_chart_{}_vs_{}", self.kind.name(), self.y_label, self.x_label);
        stem.chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect()
    }

    pub fn window_title(&self) -> String {
        format!("{}: {}", self.kind.label(), self.title)
    }

    /// Line segments split at missing y values.
    pub fn line_segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for p in &self.points {
            match p.y {
                Some(y) if y.is_finite() && p.x.is_finite() => current.push([p.x, y]),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Rows with a finite x and y, with their y, in row order.
    pub fn plotted(&self) -> impl Iterator<Item = (&FigurePoint, f64)> {
        self.points.iter().filter_map(|p| {
            p.y.filter(|y| y.is_finite() && p.x.is_finite())
                .map(|y| (p, y))
        })
    }

    /// Points with both coordinates present, in row order.
    pub fn plotted_points(&self) -> Vec<[f64; 2]> {
        self.plotted().map(|(p, y)| [p.x, y]).collect()
    }

    /// Data extent padded so single points and flat series stay visible.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let pts = self.plotted_points();
        let half_bar = match self.kind {
            ChartKind::Bar => self.bar_width / 2.0,
            ChartKind::Line => 0.0,
        };

        let (mut x_min, mut x_max) = min_max(pts.iter().map(|p| p[0])).unwrap_or((0.0, 1.0));
        x_min -= half_bar;
        x_max += half_bar;
        let (mut y_min, mut y_max) = min_max(pts.iter().map(|p| p[1])).unwrap_or((0.0, 1.0));
        if self.kind == ChartKind::Bar {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }

        let x_pad = pad(x_min, x_max);
        let y_pad = pad(y_min, y_max);
        ([x_min - x_pad, x_max + x_pad], [y_min - y_pad, y_max + y_pad])
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn pad(lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span > 0.0 { span * 0.05 } else { lo.abs().max(1.0) * 0.5 }
}

/// Builds the figure for a validated request.
///
/// # Errors
///
/// Any failure reading the columns is reported as
/// [`AppError::ChartGenerationFailed`].
pub fn render(request: &ChartRequest<'_>, style: &ChartStyle) -> Result<Figure> {
    build_figure(request, style).map_err(|e| AppError::ChartGenerationFailed(format!("{e:#}")))
}

fn build_figure(request: &ChartRequest<'_>, style: &ChartStyle) -> anyhow::Result<Figure> {
    let x_col = request.df.column(request.x_column)?;
    let y_col = request.df.column(request.y_column)?;

    let y_values: Vec<Option<f64>> = y_col
        .as_materialized_series()
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .collect();
    let labels = super::preview::cell_texts(x_col.as_materialized_series())?;

    let (x_axis, xs) = if x_col.dtype().is_primitive_numeric() {
        let xs: Vec<f64> = x_col
            .as_materialized_series()
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        (XAxis::Numeric, xs)
    } else {
        categorical_positions(&labels)
    };

    let bar_width = match &x_axis {
        XAxis::Categorical(_) => style.bar_width,
        XAxis::Numeric => style.bar_width * smallest_gap(&xs).unwrap_or(1.0),
    };

    let points = xs
        .into_iter()
        .zip(labels)
        .zip(y_values)
        .map(|((x, label), y)| FigurePoint { x, label, y })
        .collect();

    Ok(Figure {
        kind: request.kind,
        title: format!("{} vs {}", request.y_column, request.x_column),
        x_label: request.x_column.to_owned(),
        y_label: request.y_column.to_owned(),
        x_axis,
        points,
        bar_width,
        style: style.clone(),
    })
}

/// Assigns each distinct label the slot of its first appearance.
fn categorical_positions(labels: &[String]) -> (XAxis, Vec<f64>) {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut categories = Vec::new();
    let xs = labels
        .iter()
        .map(|label| {
            let slot = *slots.entry(label.as_str()).or_insert_with(|| {
                categories.push(label.clone());
                categories.len() - 1
            });
            slot as f64
        })
        .collect();
    (XAxis::Categorical(categories), xs)
}

/// Smallest positive distance between distinct finite x values.
fn smallest_gap(xs: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = xs.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted
        .windows(2)
        .filter_map(|w| match w {
            [a, b] if b > a => Some(b - a),
            _ => None,
        })
        .min_by(f64::total_cmp)
}
