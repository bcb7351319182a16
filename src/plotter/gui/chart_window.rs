//! One floating window per generated chart.

use crate::config::Rgb;
use crate::plotter::controller::PlotController;
use crate::plotter::logic::{ChartKind, ExportFormat, Figure};
use eframe::egui;
use egui_phosphor::regular as icons;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, Points};
use std::ops::RangeInclusive;

const HINT: &str = "Use the mouse to zoom and pan, or click 'Save Chart' to export";

fn colour(rgb: Rgb) -> egui::Color32 {
    let [r, g, b] = rgb;
    egui::Color32::from_rgb(r, g, b)
}

pub fn render_chart_windows(controller: &mut PlotController, ctx: &egui::Context) {
    let mut save_requested = None;

    for chart in controller.charts_mut() {
        let figure = &chart.figure;
        let id = chart.id;
        egui::Window::new(figure.window_title())
            .id(egui::Id::new(("chart_window", id)))
            .open(&mut chart.open)
            .default_size([figure.style.window_width, figure.style.window_height])
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .add(crate::theme::primary_button(&format!(
                            "{} Save Chart",
                            icons::FLOPPY_DISK
                        )))
                        .clicked()
                    {
                        save_requested = Some(id);
                    }
                    ui.label(egui::RichText::new(HINT).weak().italics());
                });
                ui.separator();
                render_plot(ui, id, figure);
            });
    }
    controller.prune_closed_charts();

    if let Some(id) = save_requested {
        save_dialog(controller, id);
    }
}

fn save_dialog(controller: &mut PlotController, id: u64) {
    let Some(stem) = controller
        .charts()
        .iter()
        .find(|chart| chart.id == id)
        .map(|chart| chart.figure.default_file_stem())
    else {
        return;
    };

    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Chart")
        .set_file_name(format!("{stem}.png"));
    for format in ExportFormat::ALL {
        dialog = dialog.add_filter(format.description(), format.extensions());
    }
    if let Some(path) = dialog.save_file() {
        // Failures are already shown as status and notice.
        if let Err(err) = controller.save_chart(id, path) {
            tracing::debug!("Save reported to user: {err}");
        }
    }
}

fn render_plot(ui: &mut egui::Ui, id: u64, figure: &Figure) {
    let style = &figure.style;
    let x_axis = figure.x_axis.clone();
    let ([x_min, x_max], [y_min, y_max]) = figure.bounds();

    let plot = Plot::new(("chart_plot", id))
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            x_axis.tick_label(mark.value).unwrap_or_default()
        })
        .show_grid([figure.kind == ChartKind::Line, true])
        .include_x(x_min)
        .include_x(x_max)
        .include_y(y_min)
        .include_y(y_max)
        .allow_boxed_zoom(true)
        .allow_zoom(true)
        .allow_drag(true)
        .allow_scroll(true);

    ui.label(egui::RichText::new(&figure.title).strong().size(style.title_font_size));

    plot.show(ui, |plot_ui| match figure.kind {
        ChartKind::Line => {
            let line_colour = colour(style.line_color);
            for (n, segment) in figure.line_segments().into_iter().enumerate() {
                plot_ui.line(
                    Line::new(format!("{}_{n}", figure.y_label), segment)
                        .color(line_colour)
                        .width(style.line_width),
                );
            }
            plot_ui.points(
                Points::new(figure.y_label.clone(), figure.plotted_points())
                    .color(line_colour)
                    .radius(style.marker_size / 2.0),
            );
        }
        ChartKind::Bar => {
            let fill = colour(style.bar_color).gamma_multiply(style.bar_alpha);
            let edge = egui::Stroke::new(style.bar_edge_width, colour(style.bar_edge_color));
            let bars = figure
                .plotted()
                .map(|(point, y)| {
                    Bar::new(point.x, y)
                        .width(figure.bar_width)
                        .fill(fill)
                        .stroke(edge)
                        .name(&point.label)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(figure.y_label.clone(), bars));
        }
    });
}
