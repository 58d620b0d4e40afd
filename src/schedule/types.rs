use chrono::Weekday;

use super::time::{parse_time_range, FormatError, TimeSlot};

/// One subject/time/day record. The day is kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    subject: String,
    time_range: String,
    day: String,
}

impl ScheduleEntry {
    pub fn new(
        subject: impl Into<String>,
        time_range: impl Into<String>,
        day: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            time_range: time_range.into(),
            day: day.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn time_range(&self) -> &str {
        &self.time_range
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn time_slot(&self) -> Result<TimeSlot, FormatError> {
        parse_time_range(&self.time_range)
    }

    /// Row of the day table this entry renders in
    pub fn day_row(&self) -> &'static DayRow {
        DayRow::lookup(&self.day)
    }
}

/// Ordered entries of one schedule; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSet {
    entries: Vec<ScheduleEntry>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Swap in a loaded set; nothing from the previous content survives
    pub fn replace(&mut self, other: ScheduleSet) {
        *self = other;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One weekday row of the grid: label, vertical origin and fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRow {
    pub weekday: Weekday,
    pub label: &'static str,
    pub row_origin: i32,
    pub color: [u8; 3],
}

pub const DAY_ROWS: [DayRow; 7] = [
    DayRow { weekday: Weekday::Mon, label: "MON", row_origin: 50, color: [0xF9, 0xE7, 0x9F] },
    DayRow { weekday: Weekday::Tue, label: "TUE", row_origin: 150, color: [0xFA, 0xDB, 0xD8] },
    DayRow { weekday: Weekday::Wed, label: "WED", row_origin: 250, color: [0xD4, 0xEF, 0xDF] },
    DayRow { weekday: Weekday::Thu, label: "THU", row_origin: 350, color: [0xED, 0xBB, 0x99] },
    DayRow { weekday: Weekday::Fri, label: "FRI", row_origin: 450, color: [0xAE, 0xD6, 0xF1] },
    DayRow { weekday: Weekday::Sat, label: "SAT", row_origin: 550, color: [0xD7, 0xBD, 0xE2] },
    DayRow { weekday: Weekday::Sun, label: "SUN", row_origin: 650, color: [0xD9, 0x88, 0x80] },
];

impl DayRow {
    /// Case-insensitive lookup by three-letter label. Unknown days fall back to Monday.
    pub fn lookup(day: &str) -> &'static DayRow {
        DAY_ROWS
            .iter()
            .find(|row| row.label.eq_ignore_ascii_case(day))
            .unwrap_or(&DAY_ROWS[0])
    }

    pub fn is_known(day: &str) -> bool {
        DAY_ROWS.iter().any(|row| row.label.eq_ignore_ascii_case(day))
    }
}
