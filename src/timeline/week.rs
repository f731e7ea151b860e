use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Monday of the ISO week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// One ISO week in the organizational timezone: Monday 00:00 (inclusive)
/// through the following Monday 00:00 (exclusive).
#[derive(Clone, Copy, Debug)]
pub struct WeekWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl WeekWindow {
    pub fn for_monday(monday: NaiveDate, tz: FixedOffset) -> Self {
        let start = tz
            .from_local_datetime(&monday.and_hms_opt(0, 0, 0).unwrap())
            .unwrap();
        Self {
            start,
            end: start + Duration::days(7),
        }
    }

    pub fn containing(instant: DateTime<Utc>, tz: FixedOffset) -> Self {
        let local = instant.with_timezone(&tz);
        Self::for_monday(monday_of(local.date_naive()), tz)
    }

    pub fn monday(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brussels() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn monday_of_resolves_any_weekday_to_monday() {
        // 2025-01-15 is a Wednesday
        let wed = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(monday_of(wed), NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
        // a Monday maps to itself
        let mon = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        assert_eq!(monday_of(mon), mon);
        // a Sunday still belongs to the week that started the previous Monday
        let sun = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
        assert_eq!(monday_of(sun), mon);
    }

    #[test]
    fn window_spans_exactly_seven_days() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let window = WeekWindow::for_monday(monday, brussels());
        assert_eq!(window.end - window.start, Duration::days(7));
        assert_eq!(window.monday(), monday);
    }

    #[test]
    fn containing_uses_local_date_not_utc_date() {
        // 22:30 UTC on Sunday is already Monday 00:30 in UTC+2, so the
        // instant belongs to the next week locally.
        let tz = brussels();
        let instant = Utc.with_ymd_and_hms(2025, 1, 19, 22, 30, 0).unwrap();
        let window = WeekWindow::containing(instant, tz);
        assert_eq!(window.monday(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    }
}
