use super::io;
use super::validation::{validate_file_path, validate_table};
use crate::error::{AppError, DataError, FileError, Result};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

/// The file currently loaded into the application.
///
/// Holds at most one table. A new successful load replaces the previous one
/// wholesale; a failed load leaves it untouched.
#[derive(Default)]
pub struct FileSession {
    current_file: Option<PathBuf>,
    df: Option<DataFrame>,
}

impl FileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `path`, parses it and makes it the current table.
    ///
    /// # Errors
    ///
    /// Returns a [`FileError`] for a bad path, [`AppError::Parse`] when the CSV
    /// cannot be read, and a [`DataError`] when the file or table is empty.
    pub fn load(&mut self, path: Option<&Path>) -> Result<&DataFrame> {
        validate_file_path(path)?;
        let path = path.ok_or(FileError::NoFileSelected)?;

        if std::fs::metadata(path).is_ok_and(|meta| meta.len() == 0) {
            return Err(DataError::EmptyData.into());
        }

        let df = io::load_csv(path).map_err(|e| AppError::Parse(format!("{e:#}")))?;
        validate_table(Some(&df))?;

        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "CSV loaded"
        );
        self.current_file = Some(path.to_path_buf());
        Ok(self.df.insert(df))
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn columns(&self) -> Vec<String> {
        self.df.as_ref().map(io::get_columns).unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.df.is_some()
    }
}
