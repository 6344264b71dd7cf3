use std::f32::consts::PI;
use std::io::Cursor;

use ab_glyph::{FontRef, PxScale};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut, text_size,
};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::rect::Rect;

use crate::error::ChartError;
use crate::lexical::WordCount;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

struct ChartStyle {
    width: u32,
    height: u32,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    margin_bottom_bars: f32,
    panel_gap: f32,
    title_px: f32,
    label_px: f32,
    tick_px: f32,
    max_label_chars: usize,
    line_thickness: i32,
    marker_radius: i32,
    background: Rgba<u8>,
    ink: Rgba<u8>,
    grid: Rgba<u8>,
    polarity: Rgba<u8>,
    subjectivity: Rgba<u8>,
    bar: Rgba<u8>,
}

static STYLE: ChartStyle = ChartStyle {
    width: 1000,
    height: 600,
    margin_left: 80.0,
    margin_right: 30.0,
    margin_top: 40.0,
    margin_bottom_bars: 150.0,
    panel_gap: 90.0,
    title_px: 20.0,
    label_px: 16.0,
    tick_px: 13.0,
    max_label_chars: 18,
    line_thickness: 2,
    marker_radius: 4,
    background: Rgba([255, 255, 255, 255]),
    ink: Rgba([0, 0, 0, 255]),
    grid: Rgba([221, 221, 221, 255]),
    polarity: Rgba([31, 119, 180, 255]),
    subjectivity: Rgba([44, 160, 44, 255]),
    bar: Rgba([135, 206, 235, 255]),
};

const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

fn label_font() -> Result<FontRef<'static>, ChartError> {
    FontRef::try_from_slice(FONT_BYTES).map_err(|_| ChartError::Font)
}

fn blank_canvas() -> RgbaImage {
    RgbaImage::from_pixel(STYLE.width, STYLE.height, STYLE.background)
}

fn encode_png(canvas: RgbaImage) -> Result<String, ChartError> {
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Scales and ticks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Panel {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Panel {
    fn px_x(&self, x: f64) -> f32 {
        let t = (x - self.x_min) / (self.x_max - self.x_min);
        self.left + t as f32 * (self.right - self.left)
    }

    fn px_y(&self, y: f64) -> f32 {
        let t = (y - self.y_min) / (self.y_max - self.y_min);
        self.bottom - t as f32 * (self.bottom - self.top)
    }

    fn frame(&self) -> Rect {
        Rect::at(self.left as i32, self.top as i32).of_size(
            ((self.right - self.left) as u32).max(1),
            ((self.bottom - self.top) as u32).max(1),
        )
    }
}

fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    for k in first..=last {
        out.push(k as f64 * step);
    }
    out
}

fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let v = if value.abs() < step * 1e-6 { 0.0 } else { value };
    format!("{v:.decimals$}")
}

fn padded_range(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return (-0.05, 0.05);
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < 1e-9 {
        return (lo - 0.05, hi + 0.05);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

// ---------------------------------------------------------------------------
// Drawing primitives
// ---------------------------------------------------------------------------

fn draw_thick_line(canvas: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>) {
    let half = STYLE.line_thickness / 2;
    for dx in -half..=half {
        for dy in -half..=half {
            let (ox, oy) = (dx as f32, dy as f32);
            draw_line_segment_mut(canvas, (from.0 + ox, from.1 + oy), (to.0 + ox, to.1 + oy), color);
        }
    }
}

fn draw_centered_text(canvas: &mut RgbaImage, font: &FontRef, px: f32, cx: f32, y: f32, text: &str) {
    let scale = PxScale::from(px);
    let (w, _) = text_size(scale, font, text);
    draw_text_mut(canvas, STYLE.ink, (cx - w as f32 / 2.0) as i32, y as i32, scale, font, text);
}

fn draw_rotated_text(
    canvas: &mut RgbaImage,
    font: &FontRef,
    px: f32,
    degrees: f32,
    center: (f32, f32),
    text: &str,
) {
    let scale = PxScale::from(px);
    let (w, h) = text_size(scale, font, text);
    let side = (w as f32).hypot(h as f32).ceil() as u32 + 4;

    let mut tile = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));
    let tx = (side as i32 - w as i32) / 2;
    let ty = (side as i32 - h as i32) / 2;
    draw_text_mut(&mut tile, STYLE.ink, tx, ty, scale, font, text);

    let theta = -degrees * PI / 180.0;
    let rotated = rotate_about_center(&tile, theta, Interpolation::Bilinear, Rgba([0, 0, 0, 0]));
    let x = center.0 as i64 - side as i64 / 2;
    let y = center.1 as i64 - side as i64 / 2;
    image::imageops::overlay(canvas, &rotated, x, y);
}

fn shorten_label(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars.saturating_sub(1)) {
        Some((cut, _)) if text.chars().count() > max_chars => format!("{}…", &text[..cut]),
        _ => text.to_string(),
    }
}

fn slanted_extent(font: &FontRef, px: f32, text: &str) -> f32 {
    let (w, h) = text_size(PxScale::from(px), font, text);
    (w + h) as f32 / std::f32::consts::SQRT_2
}

fn draw_axes(canvas: &mut RgbaImage, font: &FontRef, panel: &Panel, y_label: &str) {
    let tick_scale = PxScale::from(STYLE.tick_px);
    let step = nice_step(panel.y_max - panel.y_min, 5);
    for value in ticks(panel.y_min, panel.y_max, step) {
        let y = panel.px_y(value);
        draw_line_segment_mut(canvas, (panel.left, y), (panel.right, y), STYLE.grid);
        let label = tick_label(value, step);
        let (w, h) = text_size(tick_scale, font, &label);
        draw_text_mut(
            canvas,
            STYLE.ink,
            (panel.left - 6.0 - w as f32) as i32,
            (y - h as f32 / 2.0) as i32,
            tick_scale,
            font,
            &label,
        );
    }
    draw_hollow_rect_mut(canvas, panel.frame(), STYLE.ink);

    let mid = (panel.top + panel.bottom) / 2.0;
    draw_rotated_text(canvas, font, STYLE.label_px, 90.0, (22.0, mid), y_label);
}

fn draw_legend(canvas: &mut RgbaImage, font: &FontRef, panel: &Panel, label: &str, color: Rgba<u8>) {
    let scale = PxScale::from(STYLE.tick_px);
    let (w, h) = text_size(scale, font, label);
    let box_w = w as f32 + 50.0;
    let box_h = h as f32 + 14.0;
    let x = panel.right - box_w - 10.0;
    let y = panel.top + 10.0;

    let frame = Rect::at(x as i32, y as i32).of_size(box_w as u32, box_h as u32);
    draw_filled_rect_mut(canvas, frame, STYLE.background);
    draw_hollow_rect_mut(canvas, frame, STYLE.grid);

    let line_y = y + box_h / 2.0;
    draw_thick_line(canvas, (x + 8.0, line_y), (x + 32.0, line_y), color);
    draw_filled_circle_mut(canvas, ((x + 20.0) as i32, line_y as i32), STYLE.marker_radius, color);
    draw_text_mut(
        canvas,
        STYLE.ink,
        (x + 40.0) as i32,
        (line_y - h as f32 / 2.0) as i32,
        scale,
        font,
        label,
    );
}

// ---------------------------------------------------------------------------
// Sentiment chart
// ---------------------------------------------------------------------------

struct Series<'a> {
    values: &'a [f64],
    color: Rgba<u8>,
    title: &'a str,
    y_label: &'a str,
    legend: &'a str,
}

fn draw_series_panel(canvas: &mut RgbaImage, font: &FontRef, top: f32, bottom: f32, series: &Series) {
    let n = series.values.len();
    let last = n.saturating_sub(1) as f64;
    let x_pad = if n <= 1 { 0.5 } else { last * 0.05 };
    let (y_min, y_max) = padded_range(series.values);
    let panel = Panel {
        left: STYLE.margin_left,
        top,
        right: STYLE.width as f32 - STYLE.margin_right,
        bottom,
        x_min: -x_pad,
        x_max: last + x_pad,
        y_min,
        y_max,
    };

    draw_centered_text(
        canvas,
        font,
        STYLE.title_px,
        (panel.left + panel.right) / 2.0,
        top - STYLE.title_px - 8.0,
        series.title,
    );

    // Vertical grid and x ticks on whole chunk indices.
    let tick_scale = PxScale::from(STYLE.tick_px);
    let x_step = nice_step(last.max(1.0), 10).max(1.0);
    for value in ticks(0.0, last, x_step) {
        let x = panel.px_x(value);
        draw_line_segment_mut(canvas, (x, panel.top), (x, panel.bottom), STYLE.grid);
        let label = tick_label(value, x_step);
        let (w, _) = text_size(tick_scale, font, &label);
        draw_text_mut(
            canvas,
            STYLE.ink,
            (x - w as f32 / 2.0) as i32,
            (panel.bottom + 4.0) as i32,
            tick_scale,
            font,
            &label,
        );
    }
    draw_axes(canvas, font, &panel, series.y_label);
    draw_centered_text(
        canvas,
        font,
        STYLE.label_px,
        (panel.left + panel.right) / 2.0,
        panel.bottom + STYLE.tick_px + 8.0,
        "Chunk",
    );

    let points: Vec<(f32, f32)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (panel.px_x(i as f64), panel.px_y(*v)))
        .collect();
    for pair in points.windows(2) {
        draw_thick_line(canvas, pair[0], pair[1], series.color);
    }
    for (x, y) in &points {
        draw_filled_circle_mut(canvas, (*x as i32, *y as i32), STYLE.marker_radius, series.color);
    }

    draw_legend(canvas, font, &panel, series.legend, series.color);
}

pub fn render_sentiment_chart(polarity: &[f64], subjectivity: &[f64]) -> Result<String, ChartError> {
    if polarity.len() != subjectivity.len() {
        return Err(ChartError::LengthMismatch {
            polarity: polarity.len(),
            subjectivity: subjectivity.len(),
        });
    }
    let font = label_font()?;
    let mut canvas = blank_canvas();

    let footer = STYLE.label_px + STYLE.tick_px + 20.0;
    let usable = STYLE.height as f32 - STYLE.margin_top - footer - STYLE.panel_gap;
    let panel_h = usable / 2.0;

    let upper_top = STYLE.margin_top;
    let lower_top = upper_top + panel_h + STYLE.panel_gap;

    draw_series_panel(
        &mut canvas,
        &font,
        upper_top,
        upper_top + panel_h,
        &Series {
            values: polarity,
            color: STYLE.polarity,
            title: "Polarity Analysis of Paragraphs",
            y_label: "Polarity Score",
            legend: "Polarity",
        },
    );
    draw_series_panel(
        &mut canvas,
        &font,
        lower_top,
        lower_top + panel_h,
        &Series {
            values: subjectivity,
            color: STYLE.subjectivity,
            title: "Subjectivity Analysis of Paragraphs",
            y_label: "Subjectivity Score",
            legend: "Subjectivity",
        },
    );

    tracing::debug!(points = polarity.len(), "rendered sentiment chart");
    encode_png(canvas)
}

// ---------------------------------------------------------------------------
// Frequency chart
// ---------------------------------------------------------------------------

pub fn render_frequency_chart(frequencies: &[WordCount], num_words: usize) -> Result<String, ChartError> {
    let shown: Vec<&WordCount> = frequencies.iter().take(num_words).collect();
    if shown.is_empty() {
        return Err(ChartError::EmptyFrequencies);
    }
    let font = label_font()?;
    let mut canvas = blank_canvas();

    let max_count = shown.iter().map(|w| w.count).max().unwrap_or(1).max(1) as f64;
    let panel = Panel {
        left: STYLE.margin_left,
        top: STYLE.margin_top,
        right: STYLE.width as f32 - STYLE.margin_right,
        bottom: STYLE.height as f32 - STYLE.margin_bottom_bars,
        x_min: 0.0,
        x_max: shown.len() as f64,
        y_min: 0.0,
        y_max: max_count * 1.05,
    };

    draw_centered_text(
        &mut canvas,
        &font,
        STYLE.title_px,
        (panel.left + panel.right) / 2.0,
        panel.top - STYLE.title_px - 8.0,
        &format!("Top {num_words} Most Frequently Used Words"),
    );
    draw_axes(&mut canvas, &font, &panel, "Frequency");

    let slot = (panel.right - panel.left) / shown.len() as f32;
    let bar_w = (slot * 0.8).max(1.0);
    for (i, entry) in shown.iter().enumerate() {
        let center = panel.px_x(i as f64 + 0.5);
        let top = panel.px_y(entry.count as f64);
        let height = (panel.bottom - top).max(1.0);
        let rect = Rect::at((center - bar_w / 2.0) as i32, top as i32).of_size(bar_w as u32, height as u32);
        draw_filled_rect_mut(&mut canvas, rect, STYLE.bar);

        let label = shorten_label(&entry.word, STYLE.max_label_chars);
        let extent = slanted_extent(&font, STYLE.tick_px, &label);
        draw_rotated_text(
            &mut canvas,
            &font,
            STYLE.tick_px,
            45.0,
            (center - extent / 2.0, panel.bottom + 6.0 + extent / 2.0),
            &label,
        );
    }
    // Redraw the frame over bar edges.
    draw_hollow_rect_mut(&mut canvas, panel.frame(), STYLE.ink);

    draw_centered_text(
        &mut canvas,
        &font,
        STYLE.label_px,
        (panel.left + panel.right) / 2.0,
        STYLE.height as f32 - STYLE.label_px - 12.0,
        "Words",
    );

    tracing::debug!(bars = shown.len(), "rendered frequency chart");
    encode_png(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(b64: &str) -> image::DynamicImage {
        let bytes = STANDARD.decode(b64).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap()
    }

    #[test]
    fn frequency_chart_is_a_png_of_the_canvas_size() {
        let table = vec![
            WordCount::new("cat", 2),
            WordCount::new("sat", 1),
            WordCount::new("mat", 1),
        ];
        let img = decode(&render_frequency_chart(&table, 25).unwrap());
        assert_eq!((img.width(), img.height()), (1000, 600));
    }

    #[test]
    fn bars_use_sky_blue() {
        let table = vec![WordCount::new("only", 4)];
        let img = decode(&render_frequency_chart(&table, 25).unwrap()).to_rgba8();
        assert!(img.pixels().any(|p| *p == STYLE.bar));
    }

    #[test]
    fn very_long_word_is_charted() {
        let long = "x".repeat(10_000);
        let table = vec![WordCount::new(&long, 3), WordCount::new("cat", 1)];
        let img = decode(&render_frequency_chart(&table, 25).unwrap());
        assert_eq!((img.width(), img.height()), (1000, 600));
    }

    #[test]
    fn long_labels_end_in_ellipsis() {
        assert_eq!(shorten_label("cat", 18), "cat");
        assert_eq!(shorten_label(&"a".repeat(18), 18), "a".repeat(18));
        let cut = shorten_label(&"é".repeat(40), 18);
        assert_eq!(cut.chars().count(), 18);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn empty_frequency_table_fails() {
        assert!(matches!(
            render_frequency_chart(&[], 25),
            Err(ChartError::EmptyFrequencies)
        ));
        let table = vec![WordCount::new("cat", 1)];
        assert!(matches!(
            render_frequency_chart(&table, 0),
            Err(ChartError::EmptyFrequencies)
        ));
    }

    #[test]
    fn sentiment_chart_renders_series() {
        let polarity = [0.1, -0.3, 0.5, 0.0];
        let subjectivity = [0.2, 0.6, 0.9, 0.4];
        let img = decode(&render_sentiment_chart(&polarity, &subjectivity).unwrap()).to_rgba8();
        assert_eq!(img.dimensions(), (1000, 600));
        assert!(img.pixels().any(|p| *p == STYLE.polarity));
        assert!(img.pixels().any(|p| *p == STYLE.subjectivity));
    }

    #[test]
    fn sentiment_chart_handles_empty_and_single_point() {
        assert!(render_sentiment_chart(&[], &[]).is_ok());
        assert!(render_sentiment_chart(&[0.25], &[0.5]).is_ok());
    }

    #[test]
    fn mismatched_series_fail() {
        match render_sentiment_chart(&[0.1, 0.2], &[0.3]) {
            Err(ChartError::LengthMismatch { polarity, subjectivity }) => {
                assert_eq!((polarity, subjectivity), (2, 1));
            }
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn nice_steps() {
        assert!((nice_step(1.0, 5) - 0.2).abs() < 1e-12);
        assert!((nice_step(10.0, 5) - 2.0).abs() < 1e-12);
        assert!((nice_step(30.0, 5) - 10.0).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 5), 1.0);
    }

    #[test]
    fn ticks_stay_within_range() {
        let t = ticks(-0.12, 0.53, 0.2);
        assert_eq!(t.len(), 3);
        assert!(t.iter().all(|v| *v >= -0.12 && *v <= 0.53));
        assert_eq!(tick_label(0.4, 0.2), "0.4");
        assert_eq!(tick_label(3.0, 1.0), "3");
    }

    #[test]
    fn padded_range_never_collapses() {
        let (lo, hi) = padded_range(&[0.3, 0.3]);
        assert!(hi > lo);
        let (lo, hi) = padded_range(&[]);
        assert!(hi > lo);
        let (lo, hi) = padded_range(&[0.0, 1.0]);
        assert!(lo < 0.0 && hi > 1.0);
    }
}
