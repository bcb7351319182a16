//! Writing figures to disk.
//!
//! Raster formats are drawn with plotters' bitmap backend at the configured
//! DPI and encoded with `image`; SVG uses plotters' SVG backend. PDF is the SVG
//! converted by `svg2pdf`, so it stays vector.
//!
//! plotters can only turn text by quarter turns, so the x tick labels are
//! placed here instead: as `rotate` transforms in SVG and as rotated glyph
//! coverage on bitmaps.

use super::chart::{ChartKind, Figure, XAxis};
use crate::config::{ChartStyle, Rgb};
use crate::error::ExportError;
use crate::utils::{fmt_tick, panic_message};
use anyhow::{Context as _, Result};
use image::ImageEncoder as _;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::codecs::png::PngEncoder;
use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged as _;
use plotters::prelude::*;
use plotters::style::FontDesc;
use std::path::Path;
use std::sync::OnceLock;
use svg2pdf::usvg;

const FONT_FAMILY: &str = "sans-serif";
const JPEG_QUALITY: u8 = 95;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Png, Self::Pdf, Self::Jpeg, Self::Svg];

    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Png => "PNG Image",
            Self::Pdf => "PDF Document",
            Self::Jpeg => "JPEG Image",
            Self::Svg => "SVG Vector",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Pdf => &["pdf"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Svg => &["svg"],
        }
    }
}

/// Writes `figure` to `path` in the format named by its extension.
///
/// # Errors
///
/// [`ExportError::UnsupportedFormat`] for an unknown extension and
/// [`ExportError::WriteError`] when drawing, encoding or writing fails.
pub fn export(figure: &Figure, path: &Path) -> Result<(), ExportError> {
    let format = ExportFormat::from_path(path)?;

    let bytes = std::panic::catch_unwind(|| encode(figure, format))
        .map_err(|panic| ExportError::WriteError(panic_message(panic.as_ref())))?
        .map_err(|e| ExportError::WriteError(format!("{e:#}")))?;

    std::fs::write(path, bytes).map_err(|e| ExportError::WriteError(e.to_string()))?;
    tracing::info!(path = %path.display(), ?format, "Chart exported");
    Ok(())
}

/// Renders `figure` to the bytes of a file in `format`.
pub fn encode(figure: &Figure, format: ExportFormat) -> Result<Vec<u8>> {
    register_fonts();
    let dpi = figure.style.export_dpi;
    match format {
        ExportFormat::Svg => Ok(render_svg(figure)?.into_bytes()),
        ExportFormat::Png => {
            let (rgb, w, h) = render_rgb(figure)?;
            let mut out = Vec::new();
            PngEncoder::new(&mut out)
                .write_image(&rgb, w, h, image::ExtendedColorType::Rgb8)
                .context("Failed to encode PNG")?;
            Ok(out)
        }
        ExportFormat::Jpeg => {
            let (rgb, w, h) = render_rgb(figure)?;
            encode_jpeg(&rgb, w, h, dpi)
        }
        ExportFormat::Pdf => svg_to_pdf(&render_svg(figure)?, dpi),
    }
}

/// Converts a rendered chart SVG into a one-page vector PDF sized at `dpi`.
fn svg_to_pdf(svg: &str, dpi: u32) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    let fonts = options.fontdb_mut();
    fonts.load_font_data(epaint_default_fonts::UBUNTU_LIGHT.to_vec());
    let family = fonts
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    if let Some(family) = family {
        fonts.set_sans_serif_family(family);
    }

    let tree = usvg::Tree::from_str(svg, &options).context("Failed to parse chart SVG")?;
    let page = svg2pdf::PageOptions { dpi: dpi as f32 };
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|e| anyhow::anyhow!("Failed to convert chart to PDF: {e:?}"))
}

fn encode_jpeg(rgb: &[u8], w: u32, h: u32, dpi: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder.set_pixel_density(PixelDensity::dpi(u16::try_from(dpi).unwrap_or(u16::MAX)));
    encoder
        .encode(rgb, w, h, image::ExtendedColorType::Rgb8)
        .context("Failed to encode JPEG")?;
    Ok(out)
}

fn render_rgb(figure: &Figure) -> Result<(Vec<u8>, u32, u32)> {
    let (w, h) = figure.style.export_size();
    let mut buf = vec![0_u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        let labels = draw_figure(&root, figure)?;
        for label in &labels {
            draw_rotated_label(&root, label, &figure.style)?;
        }
        root.present().map_err(draw_error)?;
    }
    Ok((buf, w, h))
}

fn render_svg(figure: &Figure) -> Result<String> {
    let (w, h) = figure.style.export_size();
    let mut svg = String::new();
    let labels = {
        let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
        let labels = draw_figure(&root, figure)?;
        root.present().map_err(draw_error)?;
        labels
    };

    let elements: String = labels.iter().map(|label| svg_label(label, &figure.style)).collect();
    match svg.rfind("</svg>") {
        Some(end) => svg.insert_str(end, &elements),
        None => svg.push_str(&elements),
    }
    Ok(svg)
}

fn draw_error(err: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}

/// Makes the bundled egui font available to plotters, once per process.
fn register_fonts() {
    static REGISTERED: OnceLock<()> = OnceLock::new();
    REGISTERED.get_or_init(|| {
        for style in [FontStyle::Normal, FontStyle::Bold] {
            if plotters::style::register_font(FONT_FAMILY, style, epaint_default_fonts::UBUNTU_LIGHT)
                .is_err()
            {
                tracing::warn!("Could not register chart font; text may be missing from exports");
            }
        }
    });
}

fn rgb(c: Rgb) -> RGBColor {
    let [r, g, b] = c;
    RGBColor(r, g, b)
}

/// An x tick label still to be drawn.
struct TickLabel {
    text: String,
    /// Backend pixel where the label ends; it hangs down and left from here.
    anchor: (i32, i32),
}

fn tick_font(style: &ChartStyle) -> FontDesc<'static> {
    (FONT_FAMILY, f64::from(style.points_to_px(style.tick_font_size))).into_font()
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn svg_label(label: &TickLabel, style: &ChartStyle) -> String {
    let (x, y) = label.anchor;
    let [r, g, b] = style.text_color;
    format!(
        "<text x=\"{x}\" y=\"{y}\" text-anchor=\"end\" dominant-baseline=\"hanging\" \
         font-family=\"{FONT_FAMILY}\" font-size=\"{size:.1}\" fill=\"#{r:02X}{g:02X}{b:02X}\" \
         transform=\"rotate(-{angle} {x} {y})\">{text}</text>\n",
        size = style.points_to_px(style.tick_font_size),
        angle = style.x_tick_rotation,
        text = xml_escape(&label.text),
    )
}

/// Rasterises `label` upright, then samples it turned counter-clockwise by
/// `x_tick_rotation` about the end of its top edge.
fn draw_rotated_label<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    label: &TickLabel,
    style: &ChartStyle,
) -> Result<()> {
    let font = tick_font(style);
    let (text_w, text_h) = font.box_size(&label.text).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let pad = text_h / 2 + 2;
    let (buf_w, buf_h) = (text_w + 2 * pad, text_h + 2 * pad);
    let mut coverage = vec![0.0_f32; buf_w as usize * buf_h as usize];

    let drawn = font
        .draw(&label.text, (pad as i32, pad as i32), |x, y, alpha| {
            let inside = (0..buf_w as i32).contains(&x) && (0..buf_h as i32).contains(&y);
            let cell = inside
                .then(|| y as usize * buf_w as usize + x as usize)
                .and_then(|i| coverage.get_mut(i));
            if let Some(cell) = cell {
                *cell = cell.max(alpha);
            }
            Ok::<(), std::convert::Infallible>(())
        })
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    if let Err(never) = drawn {
        match never {}
    }

    let (sin, cos) = f64::from(style.x_tick_rotation).to_radians().sin_cos();
    let origin = (f64::from(pad + text_w), f64::from(pad));
    let (ax, ay) = (f64::from(label.anchor.0), f64::from(label.anchor.1));

    // Destination box covering the turned buffer.
    let (bw, bh) = (f64::from(buf_w), f64::from(buf_h));
    let corners = [(0.0, 0.0), (bw, 0.0), (0.0, bh), (bw, bh)];
    let turned = corners.map(|(u, v)| {
        let (su, sv) = (u - origin.0, v - origin.1);
        (su * cos + sv * sin, -su * sin + sv * cos)
    });
    let lo_x = turned.iter().map(|c| c.0).fold(f64::INFINITY, f64::min).floor() as i32;
    let hi_x = turned.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max).ceil() as i32;
    let lo_y = turned.iter().map(|c| c.1).fold(f64::INFINITY, f64::min).floor() as i32;
    let hi_y = turned.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i32;

    let colour = rgb(style.text_color);
    for dy in lo_y..=hi_y {
        for dx in lo_x..=hi_x {
            let (fx, fy) = (f64::from(dx), f64::from(dy));
            let u = fx * cos - fy * sin + origin.0;
            let v = fx * sin + fy * cos + origin.1;
            if u < 0.0 || v < 0.0 || u >= bw || v >= bh {
                continue;
            }
            let alpha = coverage
                .get(v as usize * buf_w as usize + u as usize)
                .copied()
                .unwrap_or_default();
            if alpha > 0.0 {
                let at = ((ax + fx) as i32, (ay + fy) as i32);
                root.draw_pixel(at, &colour.mix(f64::from(alpha)))
                    .map_err(draw_error)?;
            }
        }
    }
    Ok(())
}

/// Draws everything except the x tick labels, which are returned with their
/// anchors for the backend-specific rotated pass.
fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<Vec<TickLabel>> {
    let style = &figure.style;
    let px = |points: f32| f64::from(style.points_to_px(points));
    let text = rgb(style.text_color);

    root.fill(&rgb(style.background)).map_err(draw_error)?;

    let ([x0, x1], [y0, y1]) = figure.bounds();
    let mut chart = ChartBuilder::on(root)
        .caption(
            &figure.title,
            (FONT_FAMILY, px(style.title_font_size))
                .into_font()
                .style(FontStyle::Bold)
                .color(&text),
        )
        .margin(px(style.title_pad))
        .x_label_area_size(px(style.tick_font_size * 8.0 + style.label_font_size * 2.0))
        .y_label_area_size(px(style.tick_font_size * 5.0 + style.label_font_size * 2.0))
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_error)?;

    let x_formatter = |_: &f64| String::new();
    let y_formatter = |y: &f64| fmt_tick(*y);
    let x_ticks = match &figure.x_axis {
        XAxis::Categorical(labels) => labels.len().min(style.max_x_ticks).max(1),
        XAxis::Numeric => style.max_x_ticks.min(12),
    };

    {
        let grid = rgb(style.grid_color)
            .mix(f64::from(style.grid_alpha))
            .stroke_width(px(0.8).round().max(1.0) as u32);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .axis_desc_style(
                (FONT_FAMILY, px(style.label_font_size))
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&text),
            )
            .label_style((FONT_FAMILY, px(style.tick_font_size)).into_font().color(&text))
            .x_labels(x_ticks)
            .y_labels(10)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .light_line_style(TRANSPARENT)
            .bold_line_style(grid);
        if figure.kind == ChartKind::Bar {
            mesh.disable_x_mesh();
        }
        mesh.draw().map_err(draw_error)?;
    }

    // Same key points the mesh used for its ticks.
    let below_axis = px(style.tick_font_size * 0.6).round() as i32;
    let tick_labels = chart
        .as_coord_spec()
        .x_spec()
        .key_points(x_ticks)
        .into_iter()
        .filter_map(|x| {
            let text = figure.x_axis.tick_label(x).filter(|t| !t.is_empty())?;
            let (px_x, px_y) = chart.backend_coord(&(x, y0));
            Some(TickLabel {
                text,
                anchor: (px_x, px_y + below_axis),
            })
        })
        .collect();

    match figure.kind {
        ChartKind::Line => {
            let colour = rgb(style.line_color);
            let stroke = colour.stroke_width(px(style.line_width).round().max(1.0) as u32);
            for segment in figure.line_segments() {
                chart
                    .draw_series(LineSeries::new(segment.into_iter().map(|[x, y]| (x, y)), stroke))
                    .map_err(draw_error)?;
            }
            let radius = (px(style.marker_size) / 2.0).round().max(1.0) as u32;
            chart
                .draw_series(
                    figure
                        .plotted_points()
                        .into_iter()
                        .map(|[x, y]| Circle::new((x, y), radius, colour.filled())),
                )
                .map_err(draw_error)?;
        }
        ChartKind::Bar => {
            let half = figure.bar_width / 2.0;
            let fill = rgb(style.bar_color).mix(f64::from(style.bar_alpha)).filled();
            let edge = rgb(style.bar_edge_color)
                .stroke_width(px(style.bar_edge_width).round().max(1.0) as u32);
            let bars = figure.plotted_points();
            chart
                .draw_series(
                    bars.iter()
                        .map(|&[x, y]| Rectangle::new([(x - half, 0.0), (x + half, y)], fill)),
                )
                .map_err(draw_error)?;
            chart
                .draw_series(
                    bars.iter()
                        .map(|&[x, y]| Rectangle::new([(x - half, 0.0), (x + half, y)], edge)),
                )
                .map_err(draw_error)?;
        }
    }

    Ok(tick_labels)
}
