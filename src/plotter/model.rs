use super::logic::Figure;
use crate::error::AppError;

/// Where the user is in the load → select → chart workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Idle,
    FileSelected,
    Loaded,
    ColumnsSelected,
    ChartGenerated,
}

impl AppPhase {
    /// Whether a table is available for selection and charting.
    pub fn has_data(self) -> bool {
        matches!(
            self,
            Self::Loaded | Self::ColumnsSelected | Self::ChartGenerated
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl ColumnSelection {
    /// X defaults to the first column and Y to the second, or the first again
    /// when there is only one.
    pub fn defaults_for(columns: &[String]) -> Self {
        let x = columns.first().cloned();
        let y = columns.get(1).or(columns.first()).cloned();
        Self { x, y }
    }

    pub fn x(&self) -> Option<&str> {
        self.x.as_deref()
    }

    pub fn y(&self) -> Option<&str> {
        self.y.as_deref()
    }
}

/// An error waiting to be acknowledged in the modal notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Self {
            title: err.category().to_owned(),
            message: err.to_string(),
        }
    }
}

/// A chart window the user has opened.
pub struct OpenChart {
    pub id: u64,
    pub figure: Figure,
    pub open: bool,
}
