use crate::config::PreviewSettings;
use anyhow::Result;
use polars::prelude::*;

/// Text shown for a missing cell.
pub const NULL_CELL: &str = "null";

/// Renders the first `row_count` rows as an aligned text table.
///
/// The first line reads `Showing first N of M rows, K columns` and is followed
/// by a rule, the column header and one line per row prefixed with its index.
pub fn preview(df: &DataFrame, row_count: usize, settings: &PreviewSettings) -> Result<String> {
    let head = df.head(Some(row_count));
    let shown = head.height();

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(head.width() + 1);
    columns.push(
        std::iter::once(String::new())
            .chain((0..shown).map(|i| i.to_string()))
            .collect(),
    );
    for col in head.get_columns() {
        let mut cells = Vec::with_capacity(shown + 1);
        cells.push(col.name().to_string());
        cells.extend(cell_texts(col.as_materialized_series())?);
        columns.push(cells);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = format!(
        "Showing first {shown} of {} rows, {} columns\n{}\n",
        df.height(),
        df.width(),
        "=".repeat(settings.rule_width)
    );
    for line in 0..=shown {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(cells, &width)| {
                let cell = cells.get(line).map(String::as_str).unwrap_or_default();
                format!("{cell:>width$}")
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    Ok(out)
}

/// Every value of `series` as display text, with nulls as [`NULL_CELL`].
pub fn cell_texts(series: &Series) -> Result<Vec<String>> {
    let as_text = series.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(NULL_CELL).to_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_header_counts() -> anyhow::Result<()> {
        let df = df!(
            "id" => (0..25).collect::<Vec<i32>>(),
            "name" => (0..25).map(|i| format!("row{i}")).collect::<Vec<_>>()
        )?;
        let text = preview(&df, 10, &PreviewSettings::default())?;
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("Showing first 10 of 25 rows, 2 columns"));
        assert_eq!(lines.next().map(str::len), Some(80));
        // header + 10 rows
        assert_eq!(lines.count(), 11);
        Ok(())
    }

    #[test]
    fn test_preview_shorter_than_requested() -> anyhow::Result<()> {
        let df = df!("a" => &[1, 2, 3])?;
        let text = preview(&df, 50, &PreviewSettings::default())?;
        assert!(text.starts_with("Showing first 3 of 3 rows, 1 columns"));
        Ok(())
    }

    #[test]
    fn test_preview_renders_nulls() -> anyhow::Result<()> {
        let df = df!("a" => &[Some(1.5), None])?;
        let text = preview(&df, 10, &PreviewSettings::default())?;
        assert!(text.contains("1.5"));
        assert!(text.contains(NULL_CELL));
        Ok(())
    }

    #[test]
    fn test_preview_keeps_row_order() -> anyhow::Result<()> {
        let df = df!("city" => &["Zurich", "Amsterdam", "Madrid"])?;
        let text = preview(&df, 10, &PreviewSettings::default())?;
        let zurich = text.find("Zurich");
        let amsterdam = text.find("Amsterdam");
        assert!(zurich < amsterdam);
        Ok(())
    }
}
