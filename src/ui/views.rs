use chrono::Weekday;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Ui};

use crate::schedule::{
    fit_label, hour_labels, EntryLayout, TextMeasure, DAY_ROWS, ENTRY_HEIGHT, FRAME_MAX,
    FRAME_MIN, GRID_END_HOUR, GRID_ORIGIN_X, GRID_START_HOUR, HEADER_BOTTOM, HOUR_WIDTH,
    ROW_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use super::theme::{day_color, grid_colors, hour_guide_color, GRID_STROKE_WIDTH, HEADER_FONT_SIZE};

/// Measures label widths with egui's font atlas
impl TextMeasure for egui::Context {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_string(), FontId::proportional(font_size), Color32::BLACK)
                .size()
                .x
        })
    }
}

/// Left edge of the day label boxes
const DAY_LABEL_X: i32 = 12;
const DAY_LABEL_WIDTH: i32 = 100;

/// Maps grid pixel coordinates onto the allocated canvas
struct Canvas {
    origin: Pos2,
}

impl Canvas {
    fn pos(&self, x: i32, y: i32) -> Pos2 {
        egui::pos2(self.origin.x + x as f32, self.origin.y + y as f32)
    }

    fn rect(&self, x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect::from_min_size(self.pos(x, y), egui::vec2(width as f32, height as f32))
    }
}

/// Render the weekly grid with every laid-out entry.
/// `font_range` is (largest, smallest) label size; `today` gets an outlined day label.
pub fn render_timetable(
    ui: &mut Ui,
    layouts: &[EntryLayout],
    font_range: (f32, f32),
    today: Option<Weekday>,
) {
    let (canvas_rect, _) = ui.allocate_exact_size(
        egui::vec2(WINDOW_WIDTH, WINDOW_HEIGHT),
        egui::Sense::hover(),
    );
    let canvas = Canvas { origin: canvas_rect.min };
    let ctx = ui.ctx().clone();
    let painter = ui.painter();
    let (_, grid_color, text_color) = grid_colors();
    let grid_stroke = Stroke::new(GRID_STROKE_WIDTH, grid_color);
    let header_font = FontId::proportional(HEADER_FONT_SIZE);

    // Hour guides first so row lines and entries paint over them
    for hour in GRID_START_HOUR + 1..=GRID_END_HOUR {
        let x = GRID_ORIGIN_X + (hour - GRID_START_HOUR) * HOUR_WIDTH;
        painter.line_segment(
            [canvas.pos(x, HEADER_BOTTOM), canvas.pos(x, FRAME_MAX.1)],
            Stroke::new(1.0, hour_guide_color()),
        );
    }

    // Frame, header line and day label divider
    let (min_x, min_y) = FRAME_MIN;
    let (max_x, max_y) = FRAME_MAX;
    painter.rect_stroke(
        canvas.rect(min_x, min_y, max_x - min_x, max_y - min_y),
        0.0,
        grid_stroke,
    );
    painter.line_segment([canvas.pos(min_x, HEADER_BOTTOM), canvas.pos(max_x, HEADER_BOTTOM)], grid_stroke);
    painter.line_segment([canvas.pos(GRID_ORIGIN_X, min_y), canvas.pos(GRID_ORIGIN_X, max_y)], grid_stroke);

    // Row separators between days
    for row in DAY_ROWS.iter().skip(1) {
        painter.line_segment(
            [canvas.pos(min_x, row.row_origin), canvas.pos(max_x, row.row_origin)],
            grid_stroke,
        );
    }

    // Hour ticks and labels in the header
    painter.text(
        canvas.pos((min_x + GRID_ORIGIN_X) / 2, (min_y + HEADER_BOTTOM) / 2),
        Align2::CENTER_CENTER,
        "DAY/TIME",
        header_font.clone(),
        text_color,
    );
    for (x, label) in hour_labels() {
        if x > GRID_ORIGIN_X {
            painter.line_segment([canvas.pos(x, min_y), canvas.pos(x, HEADER_BOTTOM)], grid_stroke);
        }
        painter.text(
            canvas.pos(x + HOUR_WIDTH / 2, (min_y + HEADER_BOTTOM) / 2),
            Align2::CENTER_CENTER,
            label,
            header_font.clone(),
            text_color,
        );
    }

    // Day labels
    for row in DAY_ROWS.iter() {
        let label_rect = canvas.rect(DAY_LABEL_X, row.row_origin + 10, DAY_LABEL_WIDTH, ENTRY_HEIGHT);
        painter.rect_filled(label_rect, 0.0, day_color(row.color));
        if today == Some(row.weekday) {
            painter.rect_stroke(label_rect, 0.0, Stroke::new(2.0, grid_color));
        }
        painter.text(
            label_rect.center(),
            Align2::CENTER_CENTER,
            row.label,
            header_font.clone(),
            text_color,
        );
    }

    // Entries, in insertion order so later ones paint on top
    let (max_size, min_size) = font_range;
    for layout in layouts {
        let rect = layout.rect;
        painter.rect_filled(
            canvas.rect(rect.x, rect.y, rect.width.max(0), rect.height),
            0.0,
            day_color(layout.color),
        );

        let font_size = fit_label(&layout.subject, rect.width as f32, max_size, min_size, &ctx);
        let font = FontId::proportional(font_size);
        let row_top = rect.y - 10;
        painter.text(
            canvas.pos(rect.x, row_top + 40),
            Align2::LEFT_BOTTOM,
            &layout.subject,
            font.clone(),
            text_color,
        );
        painter.text(
            canvas.pos(rect.x, row_top + 65),
            Align2::LEFT_BOTTOM,
            &layout.time_range,
            font,
            text_color,
        );
    }
}
