mod layout;
mod time;
mod types;

pub use layout::*;
pub use time::{has_conflict, parse_time_range};
pub use types::{DayRow, ScheduleEntry, ScheduleSet, DAY_ROWS};
