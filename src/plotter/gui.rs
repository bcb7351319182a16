//! The egui front end: one main window plus a window per generated chart.
//!
//! All state lives in the [`PlotController`]; this module only turns clicks
//! into controller calls and draws what the controller reports.

use super::controller::PlotController;
use super::logic::is_csv_file;
use super::status::Severity;
use crate::config::AppConfig;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::sync::Arc;
use std::time::Instant;

mod chart_window;
mod controls;
mod preview_panel;

use chart_window::render_chart_windows;
use controls::render_controls;
use preview_panel::{PreviewTab, render_preview_panel};

pub struct App {
    pub controller: PlotController,
    pub tab: PreviewTab,
    toasts: egui_notify::Toasts,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Arc<AppConfig>) -> Self {
        crate::theme::apply_plotter_theme(&cc.egui_ctx);
        Self {
            controller: PlotController::new(config),
            tab: PreviewTab::default(),
            toasts: egui_notify::Toasts::default(),
        }
    }

    /// Opens the native picker and loads whatever the user chooses.
    pub fn browse(&mut self) {
        self.controller.browse_started();
        let picked = rfd::FileDialog::new()
            .set_title("Select CSV File")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file();
        self.controller.file_chosen(picked);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|file| file.path) else {
            return;
        };
        if is_csv_file(&path) {
            self.controller.file_chosen(Some(path));
        } else {
            tracing::warn!(path = %path.display(), "Ignored dropped file that is not a CSV");
            self.toasts.warning("Only .csv files can be opened");
        }
    }

    fn drain_toasts(&mut self) {
        for status in self.controller.take_toasts() {
            match status.severity {
                Severity::Success => self.toasts.success(status.message),
                Severity::Warning => self.toasts.warning(status.message),
                Severity::Error => self.toasts.error(status.message),
                Severity::Info => self.toasts.info(status.message),
            };
        }
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.notice().cloned() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("error_notice")).show(ctx, |ui| {
            ui.set_width(380.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(icons::WARNING_CIRCLE)
                        .size(22.0)
                        .color(crate::theme::ERROR_COLOR),
                );
                ui.heading(&notice.title);
            });
            ui.add_space(crate::theme::SPACING_SMALL);
            ui.label(&notice.message);
            ui.add_space(crate::theme::SPACING_MEDIUM);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(crate::theme::primary_button("OK")).clicked()
            })
            .inner
        });
        if modal.inner || modal.should_close() {
            self.controller.dismiss_notice();
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        let status = self.controller.status();
        let (icon, colour) = match status.severity {
            Severity::Info => (icons::INFO, crate::theme::INFO_COLOR),
            Severity::Success => (icons::CHECK_CIRCLE, crate::theme::SUCCESS_COLOR),
            Severity::Warning => (icons::WARNING, crate::theme::WARNING_COLOR),
            Severity::Error => (icons::X_CIRCLE, crate::theme::ERROR_COLOR),
        };
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(icon).color(colour));
            ui.label(egui::RichText::new(&status.message).color(colour));
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let now = Instant::now();
        self.controller.tick(now);
        if let Some(left) = self.controller.status_line_mut().remaining(now) {
            ctx.request_repaint_after(left);
        }

        egui::TopBottomPanel::top("plotter_top").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(
                egui::RichText::new(format!("{} CSV Plotter", icons::CHART_LINE))
                    .strong()
                    .color(crate::theme::ACCENT_COLOR),
            );
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("plotter_status").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_controls(self, ui);
            ui.add_space(crate::theme::SPACING_MEDIUM);
            render_preview_panel(self, ui);
        });

        render_chart_windows(&mut self.controller, ctx);
        self.render_notice(ctx);
        self.drain_toasts();
        self.toasts.show(ctx);
    }
}
