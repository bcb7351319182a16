//! Error taxonomy for the plotter.
//!
//! Every failure the user can trigger maps to one of the category enums below,
//! and all of them funnel into [`AppError`] at the controller boundary. The
//! `Display` text of each variant is the message shown to the user, both in
//! the modal notice and in the status line.
//!
//! ```
//! use csv_plotter::error::{AppError, SelectionError};
//!
//! let err: AppError = SelectionError::SameColumn.into();
//! assert!(err.to_string().contains("cannot be the same column"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the path the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("No file selected. Please choose a CSV file.")]
    NoFileSelected,

    #[error("The selected file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("The selected path is not a valid file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Problems with the parsed table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("No data has been loaded yet.")]
    NoData,

    #[error("The CSV file is empty. Please select a file with data.")]
    EmptyData,

    #[error("The CSV file has no columns.")]
    NoColumns,
}

/// Problems with the X/Y column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select columns for both X-axis and Y-axis.")]
    NoColumnSelected,

    #[error(
        "X-axis and Y-axis cannot be the same column. Please select different columns."
    )]
    SameColumn,
}

/// Problems with the type of a selected column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Column '{0}' not found in data")]
    ColumnNotFound(String),

    #[error(
        "Y-axis column '{0}' must contain numeric data. Please select a different column."
    )]
    NotNumeric(String),
}

/// Failures while writing a chart to disk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unsupported chart format '{0}'. Use PNG, PDF, JPEG or SVG.")]
    UnsupportedFormat(String),

    #[error("Failed to save chart: {0}")]
    WriteError(String),
}

/// Any failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("Failed to load CSV: {0}")]
    Parse(String),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to generate chart: {0}")]
    ChartGenerationFailed(String),
}

impl AppError {
    /// Short category name, used as the title of the error notice.
    pub fn category(&self) -> &'static str {
        match self {
            Self::File(_) => "File Error",
            Self::Data(_) => "Data Error",
            Self::Selection(_) => "Selection Error",
            Self::Type(_) => "Type Error",
            Self::Parse(_) => "Parse Error",
            Self::Export(_) => "Export Error",
            Self::ChartGenerationFailed(_) => "Chart Error",
        }
    }
}

/// Result type alias for plotter operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypeError::ColumnNotFound("revenue".to_owned());
        assert_eq!(err.to_string(), "Column 'revenue' not found in data");
    }

    #[test]
    fn test_transparent_wrapping_keeps_message() {
        let inner = DataError::EmptyData;
        let err: AppError = inner.into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.category(), "Data Error");
    }

    #[test]
    fn test_file_error_mentions_path() {
        let err = FileError::FileNotFound(PathBuf::from("missing.csv"));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_parse_error_carries_message() {
        let err = AppError::Parse("bad quote".to_owned());
        assert_eq!(err.to_string(), "Failed to load CSV: bad quote");
    }
}
