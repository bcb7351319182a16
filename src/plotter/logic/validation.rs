//! Input checks run before loading a file and before drawing a chart.
//!
//! All of these are pure and total: they inspect their arguments and report a
//! structured failure instead of panicking.

use crate::error::{DataError, FileError, SelectionError, TypeError};
use polars::prelude::DataFrame;
use std::path::Path;

pub fn validate_file_path(path: Option<&Path>) -> Result<(), FileError> {
    let path = match path {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Err(FileError::NoFileSelected),
    };

    if !path.exists() {
        return Err(FileError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

pub fn validate_table(df: Option<&DataFrame>) -> Result<(), DataError> {
    let df = df.ok_or(DataError::NoData)?;
    if df.width() == 0 {
        return Err(DataError::NoColumns);
    }
    if df.height() == 0 {
        return Err(DataError::EmptyData);
    }
    Ok(())
}

pub fn validate_column_selection(x: Option<&str>, y: Option<&str>) -> Result<(), SelectionError> {
    match (x, y) {
        (Some(x), Some(y)) if !x.is_empty() && !y.is_empty() => {
            if x == y {
                Err(SelectionError::SameColumn)
            } else {
                Ok(())
            }
        }
        _ => Err(SelectionError::NoColumnSelected),
    }
}

pub fn validate_numeric(df: &DataFrame, column: &str) -> Result<(), TypeError> {
    let Ok(col) = df.column(column) else {
        return Err(TypeError::ColumnNotFound(column.to_owned()));
    };
    if col.dtype().is_primitive_numeric() {
        Ok(())
    } else {
        Err(TypeError::NotNumeric(column.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_empty_path_is_no_file_selected() {
        assert_eq!(validate_file_path(None), Err(FileError::NoFileSelected));
        assert_eq!(
            validate_file_path(Some(Path::new(""))),
            Err(FileError::NoFileSelected)
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let path = Path::new("definitely/not/here/data.csv");
        assert_eq!(
            validate_file_path(Some(path)),
            Err(FileError::FileNotFound(path.to_path_buf()))
        );
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = std::env::temp_dir();
        assert_eq!(
            validate_file_path(Some(&dir)),
            Err(FileError::NotAFile(dir.clone()))
        );
    }

    #[test]
    fn test_validate_table() -> anyhow::Result<()> {
        assert_eq!(validate_table(None), Err(DataError::NoData));
        assert_eq!(
            validate_table(Some(&DataFrame::empty())),
            Err(DataError::NoColumns)
        );

        let header_only = df!("a" => Vec::<i64>::new(), "b" => Vec::<String>::new())?;
        assert_eq!(validate_table(Some(&header_only)), Err(DataError::EmptyData));

        let df = df!("a" => &[1, 2])?;
        assert_eq!(validate_table(Some(&df)), Ok(()));
        Ok(())
    }

    #[test]
    fn test_column_selection() {
        assert_eq!(
            validate_column_selection(None, Some("y")),
            Err(SelectionError::NoColumnSelected)
        );
        assert_eq!(
            validate_column_selection(Some(""), Some("y")),
            Err(SelectionError::NoColumnSelected)
        );
        for name in ["a", "revenue", "with space", "ünïcode"] {
            assert_eq!(
                validate_column_selection(Some(name), Some(name)),
                Err(SelectionError::SameColumn)
            );
        }
        assert_eq!(validate_column_selection(Some("x"), Some("y")), Ok(()));
    }

    #[test]
    fn test_validate_numeric() -> anyhow::Result<()> {
        let df = df!(
            "int" => &[1i64, 2],
            "float" => &[1.5f64, 2.5],
            "text" => &["a", "b"],
            "flag" => &[true, false]
        )?;

        assert_eq!(validate_numeric(&df, "int"), Ok(()));
        assert_eq!(validate_numeric(&df, "float"), Ok(()));
        assert_eq!(
            validate_numeric(&df, "text"),
            Err(TypeError::NotNumeric("text".to_owned()))
        );
        assert_eq!(
            validate_numeric(&df, "flag"),
            Err(TypeError::NotNumeric("flag".to_owned()))
        );
        assert_eq!(
            validate_numeric(&df, "missing"),
            Err(TypeError::ColumnNotFound("missing".to_owned()))
        );
        Ok(())
    }
}
