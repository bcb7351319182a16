use crate::config::ChartStyle;
use crate::error::ExportError;
use crate::plotter::logic::chart::{ChartKind, ChartRequest, Figure, render};
use crate::plotter::logic::export::{ExportFormat, encode, export};
use anyhow::Result;
use polars::prelude::*;
use std::path::Path;

/// A small style keeps the rasters in these tests cheap to draw.
fn small_style() -> ChartStyle {
    ChartStyle {
        figure_width: 6.0,
        figure_height: 4.0,
        export_dpi: 50,
        ..ChartStyle::default()
    }
}

fn figure(kind: ChartKind) -> Result<Figure> {
    let df = df!(
        "month" => &["Jan", "Feb", "Mar", "Apr"],
        "sales" => &[Some(10.0), Some(12.5), None, Some(9.0)]
    )?;
    let request = ChartRequest::new(&df, Some("month"), Some("sales"), kind)?;
    Ok(render(&request, &small_style())?)
}

#[test]
fn test_format_from_extension() {
    assert_eq!(ExportFormat::from_path(Path::new("a.png")), Ok(ExportFormat::Png));
    assert_eq!(ExportFormat::from_path(Path::new("a.JPEG")), Ok(ExportFormat::Jpeg));
    assert_eq!(ExportFormat::from_path(Path::new("a.jpg")), Ok(ExportFormat::Jpeg));
    assert_eq!(ExportFormat::from_path(Path::new("a.Pdf")), Ok(ExportFormat::Pdf));
    assert_eq!(ExportFormat::from_path(Path::new("a.svg")), Ok(ExportFormat::Svg));
    assert_eq!(
        ExportFormat::from_path(Path::new("a.gif")),
        Err(ExportError::UnsupportedFormat("gif".to_owned()))
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("chart")),
        Err(ExportError::UnsupportedFormat(String::new()))
    );
}

#[test]
fn test_encoded_bytes_match_format() -> Result<()> {
    let line = figure(ChartKind::Line)?;
    let bar = figure(ChartKind::Bar)?;

    assert!(encode(&line, ExportFormat::Png)?.starts_with(b"\x89PNG"));
    assert!(encode(&bar, ExportFormat::Jpeg)?.starts_with(&[0xFF, 0xD8, 0xFF]));
    assert!(encode(&line, ExportFormat::Pdf)?.starts_with(b"%PDF"));

    let svg = String::from_utf8(encode(&bar, ExportFormat::Svg)?)?;
    assert!(svg.contains("<svg"));
    Ok(())
}

#[test]
fn test_png_has_export_dimensions() -> Result<()> {
    let bytes = encode(&figure(ChartKind::Line)?, ExportFormat::Png)?;
    // IHDR width and height, big endian
    let width = u32::from_be_bytes(bytes[16..20].try_into()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into()?);
    assert_eq!((width, height), small_style().export_size());
    Ok(())
}

#[test]
fn test_export_writes_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chart.PNG");
    export(&figure(ChartKind::Bar)?, &path)?;
    assert!(std::fs::metadata(&path)?.len() > 0);
    Ok(())
}

#[test]
fn test_export_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let fig = figure(ChartKind::Line)?;

    let err = export(&fig, &dir.path().join("chart.bmp")).err();
    assert_eq!(err, Some(ExportError::UnsupportedFormat("bmp".to_owned())));

    let err = export(&fig, &dir.path().join("missing").join("chart.png")).err();
    assert!(matches!(err, Some(ExportError::WriteError(_))), "got {err:?}");
    Ok(())
}

#[test]
fn test_svg_x_tick_labels_are_rotated() -> Result<()> {
    let svg = String::from_utf8(encode(&figure(ChartKind::Line)?, ExportFormat::Svg)?)?;

    for month in ["Jan", "Feb", "Mar", "Apr"] {
        let content = format!(">{month}<");
        let elements: Vec<&str> = svg.split("<text").filter(|e| e.contains(&content)).collect();
        assert_eq!(elements.len(), 1, "one tick label for {month}");
        assert!(
            elements[0].contains("transform=\"rotate(-45 "),
            "{month} is not turned 45 degrees: {}",
            elements[0]
        );
    }
    Ok(())
}

#[test]
fn test_svg_tick_labels_are_escaped() -> Result<()> {
    let df = df!("pair" => &["R&D", "<none>"], "n" => &[1.0, 2.0])?;
    let request = ChartRequest::new(&df, Some("pair"), Some("n"), ChartKind::Bar)?;
    let svg = String::from_utf8(encode(&render(&request, &small_style())?, ExportFormat::Svg)?)?;

    assert!(svg.contains(">R&amp;D<"));
    assert!(svg.contains(">&lt;none&gt;<"));
    Ok(())
}

#[test]
fn test_pdf_is_vector() -> Result<()> {
    let pdf = encode(&figure(ChartKind::Line)?, ExportFormat::Pdf)?;
    let contains = |needle: &[u8]| pdf.windows(needle.len()).any(|w| w == needle);

    assert!(pdf.starts_with(b"%PDF"));
    assert!(contains(b"/MediaBox"), "has a page");
    assert!(!contains(b"/DCTDecode"), "no JPEG inside");
    assert!(!contains(b"/Subtype /Image"), "no raster image inside");
    Ok(())
}
