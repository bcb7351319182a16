use serde::{Deserialize, Serialize};

/// Structured form of the statistics report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableStatistics {
    pub row_count: usize,
    pub column_count: usize,
    pub estimated_kb: f64,
    pub column_types: Vec<ColumnType>,
    pub numeric: Vec<NumericSummary>,
    pub non_numeric: Vec<NonNumericSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub name: String,
    pub dtype: String,
    pub is_numeric: bool,
}

/// Summary of a numeric column. Aggregates are `None` when every value is
/// missing, and `std_dev` is `None` with fewer than two values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (ddof = 1).
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub missing: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonNumericSummary {
    pub name: String,
    pub count: usize,
    pub unique: usize,
    pub missing: usize,
    /// Distinct values in first-appearance order, present only for
    /// low-cardinality columns.
    pub values: Option<Vec<String>>,
}
