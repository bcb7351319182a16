use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;

/// Rows sampled when polars infers column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Cell text read as missing, in addition to empty cells.
const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads a comma-delimited file with a header row into a frame.
///
/// Common missing-value markers such as `NA`, `N/A`, `NaN` and `null` load
/// as nulls, so a numeric column containing them stays numeric.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let null_values = NULL_TOKENS.iter().map(|&t| PlSmallStr::from_static(t)).collect();
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_null_values(Some(NullValues::AllColumns(null_values)))
        .finish()
        .context("Failed to scan CSV")?
        .collect()
        .context("Failed to read CSV")
}

pub fn get_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
