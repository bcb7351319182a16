//! Application configuration.
//!
//! Everything the renderers and the controller need to know about styling,
//! preview limits and user-facing wording lives in one immutable [`AppConfig`].
//! It is built once at startup and shared behind an `Arc`; nothing mutates it
//! afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowSettings,
    pub chart: ChartStyle,
    pub preview: PreviewSettings,
    pub status: StatusSettings,
    pub messages: Messages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "CSV Plotter".to_owned(),
            width: 900.0,
            height: 780.0,
        }
    }
}

/// An sRGB colour stored as `[r, g, b]`.
pub type Rgb = [u8; 3];

/// Shared look of every chart, on screen and on disk.
///
/// Sizes in points follow the usual 72 points per inch, so they scale with
/// [`ChartStyle::export_dpi`] when rendered to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub window_width: f32,
    pub window_height: f32,
    /// Figure size in inches.
    pub figure_width: f32,
    pub figure_height: f32,
    pub export_dpi: u32,
    pub line_width: f32,
    pub marker_size: f32,
    pub bar_alpha: f32,
    pub bar_edge_width: f32,
    /// Fraction of the slot each bar occupies.
    pub bar_width: f64,
    pub grid_alpha: f32,
    pub label_font_size: f32,
    pub title_font_size: f32,
    pub title_pad: f32,
    pub tick_font_size: f32,
    pub x_tick_rotation: f32,
    pub max_x_ticks: usize,
    pub line_color: Rgb,
    pub bar_color: Rgb,
    pub bar_edge_color: Rgb,
    pub background: Rgb,
    pub grid_color: Rgb,
    pub text_color: Rgb,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 700.0,
            figure_width: 12.0,
            figure_height: 7.0,
            export_dpi: 300,
            line_width: 2.0,
            marker_size: 6.0,
            bar_alpha: 0.7,
            bar_edge_width: 1.5,
            bar_width: 0.8,
            grid_alpha: 0.3,
            label_font_size: 14.0,
            title_font_size: 16.0,
            title_pad: 20.0,
            tick_font_size: 10.0,
            x_tick_rotation: 45.0,
            max_x_ticks: 30,
            line_color: [0x21, 0x96, 0xF3],
            bar_color: [0x4C, 0xAF, 0x50],
            bar_edge_color: [0x2E, 0x7D, 0x32],
            background: [0xFF, 0xFF, 0xFF],
            grid_color: [0x80, 0x80, 0x80],
            text_color: [0x21, 0x21, 0x21],
        }
    }
}

impl ChartStyle {
    /// Pixel size of an exported figure.
    pub fn export_size(&self) -> (u32, u32) {
        let dpi = self.export_dpi as f32;
        (
            (self.figure_width * dpi).round() as u32,
            (self.figure_height * dpi).round() as u32,
        )
    }

    /// Converts a size in points to pixels at the export resolution.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.export_dpi as f32 / 72.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub default_rows: usize,
    pub min_rows: usize,
    pub max_rows: usize,
    pub row_step: usize,
    pub rule_width: usize,
    /// Non-numeric columns list their values when they have at most this many.
    pub max_listed_values: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            default_rows: 10,
            min_rows: 5,
            max_rows: 100,
            row_step: 5,
            rule_width: 80,
            max_listed_values: 10,
        }
    }
}

impl PreviewSettings {
    /// Snaps a requested row count onto the allowed `min..=max` grid.
    pub fn clamp_rows(&self, requested: usize) -> usize {
        let step = self.row_step.max(1);
        let clamped = requested.clamp(self.min_rows, self.max_rows);
        let offset = clamped - self.min_rows;
        let snapped = self.min_rows + (offset + step / 2) / step * step;
        snapped.min(self.max_rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSettings {
    #[serde(with = "duration_millis")]
    pub clear_after: Duration,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            clear_after: Duration::from_secs(5),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize as _, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// User-facing status wording. Placeholders are filled by the helpers below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub ready: String,
    pub browsing: String,
    pub loading: String,
    pub loaded: String,
    pub generating: String,
    pub generated: String,
    pub load_failed: String,
    pub invalid_selection: String,
    pub not_numeric: String,
    pub chart_failed: String,
    pub chart_saved: String,
    pub save_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            ready: "Ready".to_owned(),
            browsing: "Browsing for file...".to_owned(),
            loading: "Loading: {path}".to_owned(),
            loaded: "Loaded: {path}".to_owned(),
            generating: "Generating {kind} chart...".to_owned(),
            generated: "{Kind} chart generated: {y} vs {x}".to_owned(),
            load_failed: "Failed to load file".to_owned(),
            invalid_selection: "Invalid column selection".to_owned(),
            not_numeric: "Y-axis must be numeric".to_owned(),
            chart_failed: "Chart generation failed".to_owned(),
            chart_saved: "Chart saved to: {path}".to_owned(),
            save_failed: "Failed to save chart".to_owned(),
        }
    }
}

impl Messages {
    pub fn loading(&self, path: &str) -> String {
        self.loading.replace("{path}", path)
    }

    pub fn loaded(&self, path: &str) -> String {
        self.loaded.replace("{path}", path)
    }

    pub fn generating(&self, kind: &str) -> String {
        self.generating.replace("{kind}", kind)
    }

    pub fn generated(&self, kind: &str, x: &str, y: &str) -> String {
        self.generated
            .replace("{Kind}", &capitalise(kind))
            .replace("{x}", x)
            .replace("{y}", y)
    }

    pub fn chart_saved(&self, path: &str) -> String {
        self.chart_saved.replace("{path}", path)
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
