pub mod chart;
pub mod export;
pub mod io;
pub mod preview;
pub mod session;
pub mod statistics;
pub mod types;
pub mod validation;

pub use chart::{ChartKind, ChartRequest, Figure, FigurePoint, XAxis, render};
pub use export::{ExportFormat, encode, export};
pub use io::{get_columns, is_csv_file, load_csv};
pub use preview::preview;
pub use session::FileSession;
pub use statistics::{compute_statistics, render_statistics, statistics};
pub use types::{ColumnType, NonNumericSummary, NumericSummary, TableStatistics};
pub use validation::{
    validate_column_selection, validate_file_path, validate_numeric, validate_table,
};
