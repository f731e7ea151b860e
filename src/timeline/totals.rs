use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whole seconds between two instants, floored, clamped at zero so clock
/// skew can never produce a negative duration.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_seconds().max(0)
}

/// Effective duration of a session: the stored duration when closed,
/// otherwise the elapsed time up to `now`.
pub fn effective_seconds(
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    duration_sec: Option<i64>,
    now: DateTime<Utc>,
) -> i64 {
    match (ended_at, duration_sec) {
        (_, Some(d)) => d.max(0),
        (Some(end), None) => seconds_between(started_at, end),
        (None, None) => seconds_between(started_at, now),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category_name: String,
    pub seconds: i64,
}

/// Sums seconds per category, ordered by total descending. Ties keep
/// first-seen order, so the result is deterministic for a given input order.
pub fn totals_by_category<I>(entries: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = (i64, String, i64)>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for (category_id, category_name, seconds) in entries {
        match totals.iter_mut().find(|t| t.category_id == category_id) {
            Some(t) => t.seconds += seconds,
            None => totals.push(CategoryTotal {
                category_id,
                category_name,
                seconds,
            }),
        }
    }
    totals.sort_by(|a, b| b.seconds.cmp(&a.seconds));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn seconds_between_floors_and_never_goes_negative() {
        assert_eq!(seconds_between(at(9, 0, 0), at(9, 30, 15)), 1815);
        // skewed clock: end before start clamps to zero
        assert_eq!(seconds_between(at(10, 0, 0), at(9, 59, 0)), 0);
    }

    #[test]
    fn effective_seconds_prefers_the_stored_duration() {
        assert_eq!(
            effective_seconds(at(9, 0, 0), Some(at(10, 0, 0)), Some(1815), at(12, 0, 0)),
            1815
        );
    }

    #[test]
    fn effective_seconds_of_an_open_session_runs_to_now() {
        assert_eq!(
            effective_seconds(at(9, 0, 0), None, None, at(9, 30, 15)),
            1815
        );
    }

    #[test]
    fn effective_seconds_falls_back_to_the_interval_when_duration_missing() {
        assert_eq!(
            effective_seconds(at(9, 0, 0), Some(at(9, 29, 45)), None, at(12, 0, 0)),
            1785
        );
    }

    #[test]
    fn totals_group_and_sort_descending() {
        let totals = totals_by_category(vec![
            (1, "Emails".to_string(), 600),
            (2, "Facturatie".to_string(), 1800),
            (1, "Emails".to_string(), 300),
        ]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category_name, "Facturatie");
        assert_eq!(totals[0].seconds, 1800);
        assert_eq!(totals[1].category_name, "Emails");
        assert_eq!(totals[1].seconds, 900);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let totals = totals_by_category(vec![
            (3, "DG".to_string(), 500),
            (4, "Magazijn".to_string(), 500),
        ]);
        assert_eq!(totals[0].category_id, 3);
        assert_eq!(totals[1].category_id, 4);
    }

    #[test]
    fn summed_totals_match_the_per_session_sum() {
        let entries = vec![
            (1, "Emails".to_string(), 1815),
            (2, "Facturatie".to_string(), 1785),
            (1, "Emails".to_string(), 60),
        ];
        let naive: i64 = entries.iter().map(|e| e.2).sum();
        let grouped: i64 = totals_by_category(entries).iter().map(|t| t.seconds).sum();
        assert_eq!(grouped, naive);
    }
}
