use crate::config::{ChartStyle, PreviewSettings};
use crate::error::{AppError, DataError, FileError};
use crate::plotter::logic::chart::{ChartKind, ChartRequest, render};
use crate::plotter::logic::session::FileSession;
use crate::plotter::logic::statistics::compute_statistics;
use anyhow::Result;
use std::io::Write as _;

fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(body.as_bytes())?;
    Ok(path)
}

#[test]
fn test_load_replaces_previous_table() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let first = write_csv(&dir, "first.csv", "a,b\n1,2\n3,4\n")?;
    let second = write_csv(&dir, "second.csv", "x,y,z\n1,2,3\n")?;

    let mut session = FileSession::new();
    assert!(!session.is_loaded());

    session.load(Some(&first))?;
    assert_eq!(session.columns(), vec!["a", "b"]);

    let df = session.load(Some(&second))?;
    assert_eq!(df.shape(), (1, 3));
    assert_eq!(session.current_file(), Some(second.as_path()));
    Ok(())
}

#[test]
fn test_failed_load_keeps_previous_table() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let good = write_csv(&dir, "good.csv", "a,b\n1,2\n")?;
    let missing = dir.path().join("nope.csv");

    let mut session = FileSession::new();
    session.load(Some(&good))?;

    let err = session.load(Some(&missing)).err();
    assert_eq!(err, Some(AppError::File(FileError::FileNotFound(missing))));
    assert_eq!(session.current_file(), Some(good.as_path()));
    assert!(session.is_loaded());
    Ok(())
}

#[test]
fn test_header_only_file_is_empty_data() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_csv(&dir, "header.csv", "a,b\n")?;

    let err = FileSession::new().load(Some(&path)).err();
    assert_eq!(err, Some(AppError::Data(DataError::EmptyData)));
    Ok(())
}

#[test]
fn test_zero_byte_file_is_empty_data() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_csv(&dir, "blank.csv", "")?;

    let err = FileSession::new().load(Some(&path)).err();
    assert_eq!(err, Some(AppError::Data(DataError::EmptyData)));
    Ok(())
}

#[test]
fn test_directory_is_not_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = FileSession::new().load(Some(dir.path())).err();
    assert_eq!(err, Some(AppError::File(FileError::NotAFile(dir.path().to_path_buf()))));
    Ok(())
}

#[test]
fn test_missing_value_markers_load_as_nulls() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_csv(&dir, "markers.csv", "x,y\n1,10\n2,NA\n3,N/A\n4,NaN\n5,30\n6,null\n")?;

    let mut session = FileSession::new();
    let df = session.load(Some(&path))?;
    let y = df.column("y")?;
    assert!(y.dtype().is_primitive_numeric(), "y loaded as {}", y.dtype());
    assert_eq!(y.null_count(), 4);

    let request = ChartRequest::new(df, Some("x"), Some("y"), ChartKind::Line)?;
    let figure = render(&request, &ChartStyle::default())?;
    assert_eq!(figure.plotted_points(), vec![[1.0, 10.0], [5.0, 30.0]]);

    let stats = compute_statistics(df, &PreviewSettings::default())?;
    let y = &stats.numeric[1];
    assert_eq!((y.count, y.missing), (2, 4));
    Ok(())
}
