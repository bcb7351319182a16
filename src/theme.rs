use eframe::egui;
use egui::{Color32, CornerRadius, Margin, Stroke};

pub const ACCENT_COLOR: Color32 = Color32::from_rgb(76, 175, 80);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(69, 160, 73);

pub const INFO_COLOR: Color32 = Color32::from_rgb(33, 33, 33);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 125, 50);
pub const WARNING_COLOR: Color32 = Color32::from_rgb(239, 108, 0);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(198, 40, 40);

pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;

pub const MARGIN_CARD: f32 = 12.0;

pub fn apply_plotter_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();

    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_HOVER);

    visuals.window_corner_radius = CornerRadius::same(10);
    visuals.faint_bg_color = Color32::from_rgb(245, 247, 245);
    visuals.extreme_bg_color = Color32::WHITE;

    ctx.set_visuals(visuals);

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(MARGIN_CARD as i8))
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
}

/// Filled green button used for the main actions.
pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text).strong().color(Color32::WHITE))
        .fill(ACCENT_COLOR)
        .min_size(egui::vec2(0.0, 28.0))
}
