//! Pixel geometry of the weekly grid: days as rows, hours as columns

use super::time::FormatError;
use super::types::{DayRow, ScheduleEntry, ScheduleSet};

// Window and frame
pub const WINDOW_WIDTH: f32 = 1400.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const FRAME_MIN: (i32, i32) = (5, 5);
pub const FRAME_MAX: (i32, i32) = (1380, 755);

/// Bottom edge of the hour header, also the top of the MON row
pub const HEADER_BOTTOM: i32 = 50;
pub const ROW_HEIGHT: i32 = 100;

/// X of 08.00, which is also the right edge of the day label column
pub const GRID_ORIGIN_X: i32 = 118;
pub const GRID_START_HOUR: i32 = 8;
pub const GRID_END_HOUR: i32 = 20;
pub const HOUR_WIDTH: i32 = 97;

pub const ENTRY_INSET_X: i32 = 3;
pub const ENTRY_INSET_Y: i32 = 10;
pub const ENTRY_HEIGHT: i32 = 80;

/// Pixels kept free on the right when fitting a label into an entry
pub const LABEL_PADDING: f32 = 4.0;

/// Axis-aligned rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Everything the renderer needs to draw one entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryLayout {
    pub rect: EntryRect,
    pub subject: String,
    pub time_range: String,
    pub color: [u8; 3],
}

/// Text width measurement, supplied by whatever draws the labels
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Top of the row for `day`. Unknown days use the MON row.
pub fn day_row_origin(day: &str) -> i32 {
    DayRow::lookup(day).row_origin
}

/// Left edge of the column for a clock time.
///
/// Only a minute value of exactly 30 moves the position within the hour.
/// Hours outside 08..20 are not clamped; extreme hours saturate at the i32 bounds.
pub fn time_column_origin(hour: i32, minute: i32) -> i32 {
    let mut x = hour
        .saturating_sub(GRID_START_HOUR)
        .saturating_mul(HOUR_WIDTH)
        .saturating_add(GRID_ORIGIN_X);
    if minute == 30 {
        x = x.saturating_add(HOUR_WIDTH / 2);
    }
    x
}

/// Rectangle for one entry. A range that ends before it starts yields a
/// zero or negative width rather than an error.
pub fn entry_rect(entry: &ScheduleEntry) -> Result<EntryRect, FormatError> {
    let slot = entry.time_slot()?;
    let start_x = time_column_origin(slot.start.hour, slot.start.minute);
    let end_x = time_column_origin(slot.end.hour, slot.end.minute);

    Ok(EntryRect {
        x: start_x.saturating_add(ENTRY_INSET_X),
        y: day_row_origin(entry.day()) + ENTRY_INSET_Y,
        width: end_x.saturating_sub(start_x),
        height: ENTRY_HEIGHT,
    })
}

/// Largest font size in `max_size` down to `min_size` (1pt steps) whose
/// rendered width fits in `max_width - 4`. Falls back to `min_size`.
pub fn fit_label(
    text: &str,
    max_width: f32,
    max_size: f32,
    min_size: f32,
    measure: &impl TextMeasure,
) -> f32 {
    let limit = max_width - LABEL_PADDING;
    let mut size = max_size;
    while size >= min_size {
        if measure.text_width(text, size) <= limit {
            return size;
        }
        size -= 1.0;
    }
    min_size
}

/// Lay out every entry of a set in insertion order.
/// Entries whose time range does not parse are skipped.
pub fn layout_entries(set: &ScheduleSet) -> Vec<EntryLayout> {
    set.entries()
        .iter()
        .filter_map(|entry| match entry_rect(entry) {
            Ok(rect) => Some(EntryLayout {
                rect,
                subject: entry.subject().to_string(),
                time_range: entry.time_range().to_string(),
                color: entry.day_row().color,
            }),
            Err(e) => {
                tracing::warn!(subject = entry.subject(), error = %e, "skipping entry with bad time range");
                None
            }
        })
        .collect()
}

/// Column header texts "08.00" through "20.00" with their left edges
pub fn hour_labels() -> Vec<(i32, String)> {
    (GRID_START_HOUR..=GRID_END_HOUR)
        .map(|hour| (time_column_origin(hour, 0), format!("{:02}.00", hour)))
        .collect()
}
