use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;

use super::week::WeekWindow;

/// A session as the segmentation engine sees it. `ended_at = None` means the
/// session is still running; its end is taken to be `now` at computation time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionSpan {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// One day-bounded slice of a session, ready for calendar rendering.
/// Offsets are real minutes since local midnight (a slice running to the day
/// boundary ends at 1440); clamping to the visible 06:00-19:00 rows is the
/// client's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub id: String,
    /// 0 = Monday .. 6 = Sunday.
    pub day_index: u32,
    pub start_min: i64,
    pub end_min: i64,
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
}

/// Clips every span to the week window and walks the remainder day by day,
/// emitting one segment per calendar day touched. Segment ids are
/// deterministic per (session, day, slice start) so repeated fetches of the
/// same data render stably.
pub fn week_segments(
    spans: &[SessionSpan],
    window: &WeekWindow,
    now: DateTime<Utc>,
) -> Vec<Segment> {
    let tz = window.start.timezone();
    let mut segments = Vec::new();

    for span in spans {
        let started = span.started_at.with_timezone(&tz);
        let ended = span.ended_at.unwrap_or(now).with_timezone(&tz);

        let start = started.max(window.start);
        let end = ended.min(window.end);
        if end <= start {
            continue;
        }

        let mut cur = start;
        while cur < end {
            let day_start = tz
                .from_local_datetime(&cur.date_naive().and_hms_opt(0, 0, 0).unwrap())
                .unwrap();
            let day_end = day_start + Duration::days(1);
            let seg_end = if end < day_end { end } else { day_end };

            let day_index = cur.date_naive().weekday().num_days_from_monday();

            segments.push(Segment {
                id: format!("{}-{}-{}", span.id, day_index, cur.timestamp_millis()),
                day_index,
                start_min: (cur - day_start).num_minutes(),
                end_min: (seg_end - day_start).num_minutes(),
                category_id: span.category_id,
                category_name: span.category_name.clone(),
                description: span.description.clone(),
            });

            cur = day_end;
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    /// 2025-01-13 is a Monday.
    fn window() -> WeekWindow {
        WeekWindow::for_monday(NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(), tz())
    }

    /// Local organizational time, converted to the UTC instant we store.
    fn local(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        tz().with_ymd_and_hms(2025, 1, d, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn span(id: i64, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> SessionSpan {
        SessionSpan {
            id,
            category_id: 7,
            category_name: "Emails".into(),
            description: None,
            started_at: start,
            ended_at: end,
        }
    }

    #[test]
    fn midnight_crossing_session_splits_into_two_segments() {
        // Wednesday 22:00 -> Thursday 02:00
        let spans = [span(1, local(15, 22, 0), Some(local(16, 2, 0)))];
        let segs = week_segments(&spans, &window(), local(17, 12, 0));

        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].day_index, segs[0].start_min, segs[0].end_min), (2, 1320, 1440));
        assert_eq!((segs[1].day_index, segs[1].start_min, segs[1].end_min), (3, 0, 120));

        // total minutes across segments equals the original interval
        let total: i64 = segs.iter().map(|s| s.end_min - s.start_min).sum();
        assert_eq!(total, 240);
    }

    #[test]
    fn session_spanning_several_midnights_emits_one_segment_per_day() {
        // Friday 23:00 -> Sunday 01:00
        let spans = [span(2, local(17, 23, 0), Some(local(19, 1, 0)))];
        let segs = week_segments(&spans, &window(), local(19, 12, 0));

        assert_eq!(segs.len(), 3);
        assert_eq!((segs[0].day_index, segs[0].start_min, segs[0].end_min), (4, 1380, 1440));
        assert_eq!((segs[1].day_index, segs[1].start_min, segs[1].end_min), (5, 0, 1440));
        assert_eq!((segs[2].day_index, segs[2].start_min, segs[2].end_min), (6, 0, 60));
    }

    #[test]
    fn sessions_outside_the_window_are_dropped() {
        // previous Sunday, entirely before the window
        let spans = [span(3, local(12, 9, 0), Some(local(12, 10, 0)))];
        assert!(week_segments(&spans, &window(), local(15, 12, 0)).is_empty());
    }

    #[test]
    fn overlap_is_clipped_to_the_window() {
        // Sunday 23:00 -> next Monday 01:00; only the Sunday hour is in-week
        let spans = [span(4, local(19, 23, 0), Some(local(20, 1, 0)))];
        let segs = week_segments(&spans, &window(), local(20, 12, 0));

        assert_eq!(segs.len(), 1);
        assert_eq!((segs[0].day_index, segs[0].start_min, segs[0].end_min), (6, 1380, 1440));
    }

    #[test]
    fn open_session_ends_at_now_and_grows_on_recomputation() {
        let spans = [span(5, local(15, 9, 0), None)];

        let early = week_segments(&spans, &window(), local(15, 9, 30));
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].end_min - early[0].start_min, 30);

        let later = week_segments(&spans, &window(), local(15, 11, 0));
        assert_eq!(later[0].end_min - later[0].start_min, 120);

        // identity is stable across recomputations
        assert_eq!(early[0].id, later[0].id);
    }

    #[test]
    fn segment_ids_are_unique_per_day_slice() {
        let spans = [span(6, local(15, 22, 0), Some(local(16, 2, 0)))];
        let segs = week_segments(&spans, &window(), local(17, 12, 0));
        assert_ne!(segs[0].id, segs[1].id);
        assert!(segs[0].id.starts_with("6-2-"));
        assert!(segs[1].id.starts_with("6-3-"));
    }

    #[test]
    fn segment_carries_category_and_description() {
        let mut s = span(7, local(14, 9, 0), Some(local(14, 10, 0)));
        s.description = Some("fix invoice".into());
        let segs = week_segments(&[s], &window(), local(14, 12, 0));
        assert_eq!(segs[0].category_id, 7);
        assert_eq!(segs[0].category_name, "Emails");
        assert_eq!(segs[0].description.as_deref(), Some("fix invoice"));
    }
}
