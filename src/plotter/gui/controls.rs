use super::App;
use crate::plotter::logic::ChartKind;
use eframe::egui;
use egui_phosphor::regular as icons;

const NONE_SELECTED: &str = "Select column";

pub fn render_controls(app: &mut App, ui: &mut egui::Ui) {
    render_file_card(app, ui);
    ui.add_space(crate::theme::SPACING_SMALL);
    render_chart_card(app, ui);
}

fn render_file_card(app: &mut App, ui: &mut egui::Ui) {
    crate::theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(icons::FILE_CSV)
                    .size(18.0)
                    .color(crate::theme::ACCENT_COLOR),
            );
            if ui
                .add(crate::theme::primary_button(&format!(
                    "{} Browse...",
                    icons::FOLDER_OPEN
                )))
                .on_hover_text("Choose a CSV file, or drop one onto the window.")
                .clicked()
            {
                app.browse();
            }

            let file_text = match app.controller.session().current_file() {
                Some(path) => egui::RichText::new(
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                )
                .strong(),
                None => egui::RichText::new("No file selected").weak(),
            };
            let label = ui.label(file_text);
            if let Some(path) = app.controller.session().current_file() {
                label.on_hover_text(path.display().to_string());
            }
        });
    });
}

fn render_chart_card(app: &mut App, ui: &mut egui::Ui) {
    let has_data = app.controller.phase().has_data();
    let columns = app.controller.columns();

    crate::theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.add_enabled_ui(has_data, |ui| {
            egui::Grid::new("chart_settings")
                .num_columns(2)
                .spacing([crate::theme::SPACING_MEDIUM, crate::theme::SPACING_SMALL])
                .show(ui, |ui| {
                    ui.label("X-axis:");
                    if let Some(column) =
                        column_picker(ui, "x_column", app.controller.selection().x(), &columns)
                    {
                        app.controller.select_x(column);
                    }
                    ui.end_row();

                    ui.label("Y-axis:");
                    if let Some(column) =
                        column_picker(ui, "y_column", app.controller.selection().y(), &columns)
                    {
                        app.controller.select_y(column);
                    }
                    ui.end_row();

                    ui.label("Chart type:");
                    ui.horizontal(|ui| {
                        let mut kind = app.controller.kind();
                        for option in ChartKind::ALL {
                            ui.radio_value(&mut kind, option, option.label());
                        }
                        if kind != app.controller.kind() {
                            app.controller.select_kind(kind);
                        }
                    });
                    ui.end_row();
                });
        });

        ui.add_space(crate::theme::SPACING_SMALL);
        let generate = ui
            .add_enabled(
                has_data,
                crate::theme::primary_button(&format!("{} Generate Chart", icons::CHART_LINE_UP)),
            )
            .on_disabled_hover_text("Load a CSV file first.");
        if generate.clicked() {
            // Failures are already shown as status and notice.
            if let Err(err) = app.controller.generate() {
                tracing::debug!("Generate reported to user: {err}");
            }
        }
    });
}

/// A column combo box. Returns the newly picked column, if it changed.
fn column_picker(
    ui: &mut egui::Ui,
    id: &str,
    current: Option<&str>,
    columns: &[String],
) -> Option<String> {
    let mut picked = current.map(str::to_owned);
    egui::ComboBox::from_id_salt(id)
        .width(220.0)
        .selected_text(current.unwrap_or(NONE_SELECTED))
        .show_ui(ui, |ui| {
            for column in columns {
                ui.selectable_value(&mut picked, Some(column.clone()), column);
            }
        });
    picked.filter(|column| Some(column.as_str()) != current)
}
