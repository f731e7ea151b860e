// src/timeline/mod.rs
//
// Pure calendar/aggregation core: week window math, day-by-day segmentation
// of sessions for the admin calendar, and per-category duration totals.
// Everything here is side-effect free; the handlers feed it rows and a clock.

pub mod segment;
pub mod totals;
pub mod week;

pub use segment::{week_segments, Segment, SessionSpan};
pub use totals::{effective_seconds, seconds_between, totals_by_category, CategoryTotal};
pub use week::{monday_of, WeekWindow};
