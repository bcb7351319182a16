use super::App;
use eframe::egui;
use egui_phosphor::regular as icons;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewTab {
    #[default]
    Data,
    Statistics,
}

pub fn render_preview_panel(app: &mut App, ui: &mut egui::Ui) {
    crate::theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut app.tab,
                PreviewTab::Data,
                format!("{} Data Preview", icons::TABLE),
            );
            ui.selectable_value(
                &mut app.tab,
                PreviewTab::Statistics,
                format!("{} Statistics", icons::CALCULATOR),
            );

            if app.tab == PreviewTab::Data {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_row_spinner(app, ui);
                });
            }
        });
        ui.separator();

        let text = match app.tab {
            PreviewTab::Data => app.controller.preview_text(),
            PreviewTab::Statistics => app.controller.statistics_text(),
        };

        egui::ScrollArea::both()
            .id_salt("preview_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if text.is_empty() {
                    ui.label(egui::RichText::new("Load a CSV file to see its contents.").weak());
                } else {
                    ui.add(
                        egui::Label::new(egui::RichText::new(text).monospace())
                            .wrap_mode(egui::TextWrapMode::Extend),
                    );
                }
            });
    });
}

fn render_row_spinner(app: &mut App, ui: &mut egui::Ui) {
    let preview = app.controller.config().preview;
    let mut rows = app.controller.preview_rows();
    let spinner = ui.add_enabled(
        app.controller.phase().has_data(),
        egui::DragValue::new(&mut rows)
            .range(preview.min_rows..=preview.max_rows)
            .speed(preview.row_step as f64 / 4.0),
    );
    ui.label("Rows:");
    if spinner.changed() {
        app.controller.set_preview_rows(rows);
    }
}
