//! Orchestrates the user's actions.
//!
//! Every action runs to completion on the UI thread. Failures never escape:
//! they become an error status plus a [`Notice`] for the modal, and the
//! controller falls back to the last phase that still makes sense.

use super::logic::{
    ChartKind, ChartRequest, FileSession, Figure, export, preview, render, statistics,
};
use super::model::{AppPhase, ColumnSelection, Notice, OpenChart};
use super::status::{Severity, Status, StatusLine};
use crate::config::AppConfig;
use crate::error::{AppError, DataError, Result, TypeError};
use crate::utils::panic_message;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

pub struct PlotController {
    config: Arc<AppConfig>,
    session: FileSession,
    phase: AppPhase,
    /// Phase to return to when a load fails.
    stable_phase: AppPhase,
    selection: ColumnSelection,
    kind: ChartKind,
    preview_rows: usize,
    preview_text: String,
    statistics_text: String,
    status: StatusLine,
    notice: Option<Notice>,
    toasts: Vec<Status>,
    charts: Vec<OpenChart>,
    next_chart_id: u64,
}

impl PlotController {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let status = StatusLine::new(&config.messages.ready, config.status.clear_after);
        let preview_rows = config.preview.default_rows;
        Self {
            config,
            session: FileSession::new(),
            phase: AppPhase::Idle,
            stable_phase: AppPhase::Idle,
            selection: ColumnSelection::default(),
            kind: ChartKind::default(),
            preview_rows,
            preview_text: String::new(),
            statistics_text: String::new(),
            status,
            notice: None,
            toasts: Vec::new(),
            charts: Vec::new(),
            next_chart_id: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn session(&self) -> &FileSession {
        &self.session
    }

    pub fn columns(&self) -> Vec<String> {
        self.session.columns()
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    pub fn preview_text(&self) -> &str {
        &self.preview_text
    }

    pub fn statistics_text(&self) -> &str {
        &self.statistics_text
    }

    pub fn status(&self) -> &Status {
        self.status.current()
    }

    pub fn status_line_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Feedback to mirror as toasts since the last call.
    pub fn take_toasts(&mut self) -> Vec<Status> {
        std::mem::take(&mut self.toasts)
    }

    pub fn charts(&self) -> &[OpenChart] {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut [OpenChart] {
        &mut self.charts
    }

    /// Drops chart windows the user has closed.
    pub fn prune_closed_charts(&mut self) {
        self.charts.retain(|chart| chart.open);
    }

    /// The file picker is about to open.
    pub fn browse_started(&mut self) {
        self.status.set(self.config.messages.browsing.clone(), Severity::Info);
    }

    /// The picker closed. `None` means it was cancelled, which only clears the
    /// browsing status.
    pub fn file_chosen(&mut self, path: Option<PathBuf>) {
        match path {
            Some(path) => {
                // Outcome is already reflected in status and notice.
                if self.open_file(&path).is_err() {
                    tracing::debug!(path = %path.display(), "Load reported to user");
                }
            }
            None => {
                tracing::debug!("File picker cancelled");
                self.status.clear();
            }
        }
    }

    /// Loads `path`, replacing the current table on success.
    ///
    /// # Errors
    ///
    /// Returns the load failure after reporting it; the previous table and
    /// phase are kept.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        if self.phase != AppPhase::FileSelected {
            self.stable_phase = self.phase;
        }
        self.phase = AppPhase::FileSelected;
        let shown = path.display().to_string();
        self.status.set(self.config.messages.loading(&shown), Severity::Info);

        match self.session.load(Some(path)) {
            Ok(_) => {
                self.phase = AppPhase::Loaded;
                self.stable_phase = AppPhase::Loaded;
                self.selection = ColumnSelection::defaults_for(&self.session.columns());
                self.refresh_texts();
                self.succeed(self.config.messages.loaded(&shown));
                Ok(())
            }
            Err(err) => {
                self.phase = self.stable_phase;
                let message = self.config.messages.load_failed.clone();
                self.fail(&message, &err);
                Err(err)
            }
        }
    }

    pub fn select_x(&mut self, column: String) {
        self.selection.x = Some(column);
        self.mark_columns_selected();
    }

    pub fn select_y(&mut self, column: String) {
        self.selection.y = Some(column);
        self.mark_columns_selected();
    }

    pub fn select_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
        self.mark_columns_selected();
    }

    fn mark_columns_selected(&mut self) {
        if self.phase.has_data() {
            self.phase = AppPhase::ColumnsSelected;
        }
    }

    /// Sets the preview length, snapped to the allowed range, and re-renders.
    pub fn set_preview_rows(&mut self, rows: usize) {
        let rows = self.config.preview.clamp_rows(rows);
        if rows != self.preview_rows {
            self.preview_rows = rows;
            self.refresh_preview();
        }
    }

    fn refresh_texts(&mut self) {
        self.refresh_preview();
        self.statistics_text = match self.session.dataframe() {
            Some(df) => statistics(df, &self.config.preview).unwrap_or_else(|e| {
                tracing::error!("Statistics failed: {e:#}");
                format!("Statistics unavailable: {e:#}")
            }),
            None => String::new(),
        };
    }

    fn refresh_preview(&mut self) {
        self.preview_text = match self.session.dataframe() {
            Some(df) => preview(df, self.preview_rows, &self.config.preview).unwrap_or_else(|e| {
                tracing::error!("Preview failed: {e:#}");
                format!("Preview unavailable: {e:#}")
            }),
            None => String::new(),
        };
    }

    /// Validates the selection and opens a chart window for it.
    ///
    /// # Errors
    ///
    /// Returns the validation or rendering failure after reporting it. The
    /// table and the selection are kept and the phase drops back to
    /// [`AppPhase::Loaded`].
    pub fn generate(&mut self) -> Result<()> {
        self.status.set(
            self.config.messages.generating(self.kind.name()),
            Severity::Info,
        );

        match self.build_figure() {
            Ok(figure) => {
                tracing::info!(
                    kind = self.kind.name(),
                    x = %figure.x_label,
                    y = %figure.y_label,
                    points = figure.points.len(),
                    "Chart generated"
                );
                let message = self.config.messages.generated(
                    self.kind.name(),
                    &figure.x_label,
                    &figure.y_label,
                );
                self.charts.push(OpenChart {
                    id: self.next_chart_id,
                    figure,
                    open: true,
                });
                self.next_chart_id += 1;
                self.phase = AppPhase::ChartGenerated;
                self.succeed(message);
                Ok(())
            }
            Err(err) => {
                if self.phase.has_data() {
                    self.phase = AppPhase::Loaded;
                }
                let messages = &self.config.messages;
                let message = match &err {
                    AppError::Selection(_) => messages.invalid_selection.clone(),
                    AppError::Type(TypeError::NotNumeric(_)) => messages.not_numeric.clone(),
                    _ => messages.chart_failed.clone(),
                };
                self.fail(&message, &err);
                Err(err)
            }
        }
    }

    fn build_figure(&self) -> Result<Figure> {
        let df = self.session.dataframe().ok_or(DataError::NoData)?;
        let request = ChartRequest::new(df, self.selection.x(), self.selection.y(), self.kind)?;
        let style = &self.config.chart;

        catch_unwind(AssertUnwindSafe(|| render(&request, style))).unwrap_or_else(|panic| {
            Err(AppError::ChartGenerationFailed(panic_message(panic.as_ref())))
        })
    }

    /// Writes the figure of chart `id` to `path`, adding `.png` when the path
    /// has no extension. Returns the path actually written.
    ///
    /// # Errors
    ///
    /// Returns the export failure after reporting it.
    pub fn save_chart(&mut self, id: u64, path: PathBuf) -> Result<PathBuf> {
        let path = with_default_extension(path);
        let result = match self.charts.iter().find(|chart| chart.id == id) {
            Some(chart) => export(&chart.figure, &path).map_err(AppError::from),
            None => Err(AppError::ChartGenerationFailed(format!("chart {id} is no longer open"))),
        };

        match result {
            Ok(()) => {
                self.succeed(self.config.messages.chart_saved(&path.display().to_string()));
                Ok(path)
            }
            Err(err) => {
                let message = self.config.messages.save_failed.clone();
                self.fail(&message, &err);
                Err(err)
            }
        }
    }

    /// Clears an expired warning or error status.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.tick(now)
    }

    fn succeed(&mut self, message: String) {
        self.status.set(message.clone(), Severity::Success);
        self.toasts.push(Status {
            message,
            severity: Severity::Success,
        });
    }

    fn fail(&mut self, status: &str, err: &AppError) {
        tracing::warn!(category = err.category(), "{status}: {err}");
        self.status.set(status.to_owned(), Severity::Error);
        self.notice = Some(Notice::from(err));
    }
}

/// Adds `.png` to a save path that has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("png")
    }
}
