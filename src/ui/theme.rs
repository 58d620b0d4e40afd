use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Light visuals on a pale blue page
    let mut visuals = Visuals::light();

    let (bg, stroke, text) = grid_colors();
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.extreme_bg_color = bg;
    visuals.override_text_color = Some(text);

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, stroke);
    visuals.widgets.noninteractive.rounding = Rounding::ZERO;
    visuals.window_rounding = Rounding::ZERO;

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}

/// Returns (page_bg, grid_stroke, text) for the timetable
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0xEB, 0xF5, 0xFB),  // page bg
        Color32::from_rgb(0x28, 0x74, 0xA6),  // frame and row lines
        Color32::BLACK,
    )
}

/// Faint per-hour guide lines inside the rows
pub fn hour_guide_color() -> Color32 {
    Color32::from_rgb(0xC9, 0xDF, 0xEC)
}

pub fn day_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub const GRID_STROKE_WIDTH: f32 = 3.0;
pub const HEADER_FONT_SIZE: f32 = 18.0;
