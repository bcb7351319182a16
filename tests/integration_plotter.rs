//! End-to-end tests: load fixture files, render charts and write them to disk.

use csv_plotter::config::AppConfig;
use csv_plotter::error::{AppError, DataError, TypeError};
use csv_plotter::plotter::PlotController;
use csv_plotter::plotter::logic::{
    ChartKind, ChartRequest, FileSession, compute_statistics, export, preview, render,
};
use csv_plotter::plotter::model::AppPhase;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

/// Keeps rasters small so the suite stays quick.
fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.chart.figure_width = 6.0;
    config.chart.figure_height = 4.0;
    config.chart.export_dpi = 60;
    config
}

#[test]
fn test_sales_line_chart_in_row_order() -> anyhow::Result<()> {
    let config = small_config();
    let mut session = FileSession::new();
    let df = session.load(Some(&fixture("sales.csv")))?;
    assert_eq!(df.shape(), (5, 4));

    let request = ChartRequest::new(df, Some("date"), Some("revenue"), ChartKind::Line)?;
    let figure = render(&request, &config.chart)?;
    let labels: Vec<&str> = figure.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
    assert_eq!(figure.points.iter().filter(|p| p.y.is_some()).count(), 5);
    Ok(())
}

#[test]
fn test_shuffled_dates_keep_file_order() -> anyhow::Result<()> {
    let config = small_config();
    let mut session = FileSession::new();
    let df = session.load(Some(&fixture("shuffled_dates.csv")))?;

    let request = ChartRequest::new(df, Some("date"), Some("revenue"), ChartKind::Line)?;
    let figure = render(&request, &config.chart)?;
    let labels: Vec<&str> = figure.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        ["2024-03-15", "2024-01-02", "2024-02-28", "2024-01-01", "2024-03-01"]
    );
    let xs: Vec<f64> = figure.points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.0, 1.0, 2.0, 3.0, 4.0]);
    let first_y = figure.points.first().and_then(|p| p.y);
    assert_eq!(first_y, Some(1520.0));
    Ok(())
}

#[test]
fn test_every_export_format_writes_its_marker() -> anyhow::Result<()> {
    let config = small_config();
    let mut session = FileSession::new();
    let df = session.load(Some(&fixture("sales.csv")))?;
    let request = ChartRequest::new(df, Some("region"), Some("units"), ChartKind::Bar)?;
    let figure = render(&request, &config.chart)?;

    let dir = tempfile::tempdir()?;
    let cases: [(&str, &[u8]); 5] = [
        ("chart.png", b"\x89PNG"),
        ("chart.pdf", b"%PDF"),
        ("chart.jpg", &[0xFF, 0xD8, 0xFF]),
        ("chart.JPEG", &[0xFF, 0xD8, 0xFF]),
        ("chart.svg", b"<svg"),
    ];
    for (name, marker) in cases {
        let path = dir.path().join(name);
        export(&figure, &path)?;
        let bytes = std::fs::read(&path)?;
        assert!(bytes.starts_with(marker), "{name} does not start with its format marker");
    }
    Ok(())
}

#[test]
fn test_missing_values_are_counted() -> anyhow::Result<()> {
    let config = AppConfig::default();
    let mut session = FileSession::new();
    let df = session.load(Some(&fixture("missing_values.csv")))?;
    let stats = compute_statistics(df, &config.preview)?;

    let score = stats
        .numeric
        .iter()
        .find(|s| s.name == "score")
        .ok_or_else(|| anyhow::anyhow!("score summary"))?;
    assert_eq!(score.count, 4);
    assert_eq!(score.missing, 2);

    let grade = stats
        .non_numeric
        .iter()
        .find(|s| s.name == "grade")
        .ok_or_else(|| anyhow::anyhow!("grade summary"))?;
    assert_eq!(grade.missing, 1);
    assert_eq!(grade.unique, 3);

    let text = preview(df, 10, &config.preview)?;
    assert!(text.starts_with("Showing first 6 of 6 rows, 4 columns"));
    assert!(text.contains("null"));
    Ok(())
}

#[test]
fn test_header_only_file_is_rejected() {
    let err = FileSession::new().load(Some(&fixture("header_only.csv"))).err();
    assert_eq!(err, Some(AppError::Data(DataError::EmptyData)));
}

#[test]
fn test_controller_keeps_table_when_y_is_text() -> anyhow::Result<()> {
    let mut controller = PlotController::new(Arc::new(small_config()));
    controller.open_file(&fixture("sales.csv"))?;
    let preview_before = controller.preview_text().to_owned();

    controller.select_y("region".to_owned());
    let err = controller.generate().err();

    assert_eq!(err, Some(AppError::Type(TypeError::NotNumeric("region".to_owned()))));
    assert_eq!(controller.phase(), AppPhase::Loaded);
    assert_eq!(controller.preview_text(), preview_before);
    assert!(controller.notice().is_some(), "the failure is shown to the user");
    Ok(())
}

#[test]
fn test_controller_reload_replaces_table() -> anyhow::Result<()> {
    let mut controller = PlotController::new(Arc::new(small_config()));
    controller.open_file(&fixture("sales.csv"))?;
    controller.generate()?;
    assert_eq!(controller.phase(), AppPhase::ChartGenerated);

    controller.open_file(&fixture("text_only.csv"))?;
    assert_eq!(controller.phase(), AppPhase::Loaded);
    assert_eq!(controller.columns(), ["name", "city"]);
    assert_eq!(controller.selection().x(), Some("name"));
    assert_eq!(controller.selection().y(), Some("city"));

    // Nothing numeric to plot in this file.
    assert!(controller.generate().is_err(), "text-only y column");
    Ok(())
}

#[test]
fn test_controller_saves_generated_chart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut controller = PlotController::new(Arc::new(small_config()));
    controller.open_file(&fixture("sales.csv"))?;
    controller.select_kind(ChartKind::Bar);
    controller.generate()?;

    let id = controller
        .charts()
        .first()
        .map(|chart| chart.id)
        .ok_or_else(|| anyhow::anyhow!("no chart window"))?;
    let stem = controller
        .charts()
        .first()
        .map(|chart| chart.figure.default_file_stem())
        .unwrap_or_default();
    assert_eq!(stem, "bar_chart_revenue_vs_date");

    let written = controller.save_chart(id, dir.path().join(&stem))?;
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));
    assert!(std::fs::read(&written)?.starts_with(b"\x89PNG"));
    Ok(())
}
