// src/config.rs
use chrono::FixedOffset;

/// Core-relevant parameters: the single organizational timezone used for all
/// day/week boundary math, and the visible daily window the calendar renders.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub tz_offset: FixedOffset,
    pub day_start_min: i64,
    pub day_end_min: i64,
    pub slot_min: i64,
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        let tz_offset = std::env::var("ORG_TZ_OFFSET")
            .ok()
            .and_then(|s| parse_offset(&s))
            .unwrap_or_else(|| FixedOffset::east_opt(2 * 3600).unwrap());

        let day_start_min = env_i64("DAY_START_MIN", 6 * 60);
        let day_end_min = env_i64("DAY_END_MIN", 19 * 60);
        let slot_min = env_i64("SLOT_MIN", 30);

        Self {
            tz_offset,
            day_start_min,
            day_end_min,
            slot_min,
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

/// Parses "+02:00" / "-05:30" style offsets.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };
    let (h, m) = rest.split_once(':')?;
    let hours: i32 = h.parse().ok()?;
    let minutes: i32 = m.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_and_negative_offsets() {
        assert_eq!(
            parse_offset("+02:00"),
            FixedOffset::east_opt(2 * 3600)
        );
        assert_eq!(
            parse_offset("-05:30"),
            FixedOffset::east_opt(-(5 * 3600 + 30 * 60))
        );
        assert_eq!(parse_offset("01:00"), FixedOffset::east_opt(3600));
        assert_eq!(parse_offset("garbage"), None);
    }
}
