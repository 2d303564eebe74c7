/// Win/loss/push record parsed from a compact `"W-L-P"` string.
///
/// A zero record (`total == 0`) is the "unknown sample" sentinel: it is what
/// absent or malformed input degrades to, and the scorer's minimum-sample
/// thresholds exclude it naturally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SituationalRecord {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub total: u32,
}

impl SituationalRecord {
    pub fn new(wins: u32, losses: u32, pushes: u32) -> Self {
        SituationalRecord {
            wins,
            losses,
            pushes,
            total: wins + losses + pushes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Parse a `"W-L-P"` record string.
///
/// Trailing parts may be omitted (`"7-3"` has zero pushes).  `None`, empty
/// input, more than three parts, or any segment that is not a non-negative
/// integer all yield the zero record instead of an error.
pub fn parse_record(s: Option<&str>) -> SituationalRecord {
    let Some(raw) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return SituationalRecord::default();
    };

    let mut counts = [0u32; 3];
    let mut parts = 0usize;
    for segment in raw.split('-') {
        if parts == counts.len() {
            return SituationalRecord::default();
        }
        match segment.trim().parse::<u32>() {
            Ok(n) => counts[parts] = n,
            Err(_) => return SituationalRecord::default(),
        }
        parts += 1;
    }

    let [wins, losses, pushes] = counts;
    match wins.checked_add(losses).and_then(|t| t.checked_add(pushes)) {
        Some(_) => SituationalRecord::new(wins, losses, pushes),
        None => SituationalRecord::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let r = parse_record(Some("15-3-0"));
        assert_eq!(r, SituationalRecord::new(15, 3, 0));
        assert_eq!(r.total, 18);
    }

    #[test]
    fn total_is_sum_of_parts() {
        for (s, expected) in [("1-2-3", 6), ("0-0-0", 0), ("10-9-1", 20), ("42-0-7", 49)] {
            let r = parse_record(Some(s));
            assert_eq!(r.total, r.wins + r.losses + r.pushes);
            assert_eq!(r.total, expected, "record {s}");
        }
    }

    #[test]
    fn trailing_parts_default_to_zero() {
        assert_eq!(parse_record(Some("7-3")), SituationalRecord::new(7, 3, 0));
        assert_eq!(parse_record(Some("4")), SituationalRecord::new(4, 0, 0));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_record(Some(" 8 - 2 - 1 ")), SituationalRecord::new(8, 2, 1));
    }

    #[test]
    fn missing_or_empty_is_zero() {
        assert!(parse_record(None).is_empty());
        assert!(parse_record(Some("")).is_empty());
        assert!(parse_record(Some("   ")).is_empty());
    }

    #[test]
    fn garbage_is_zero() {
        for s in ["abc", "5-x-1", "5--1", "-3-2", "1-2-3-4", "1.5-2-0", "N/A"] {
            assert_eq!(parse_record(Some(s)).total, 0, "record {s:?}");
        }
    }

    #[test]
    fn overflowing_record_is_zero() {
        let s = format!("{}-{}-0", u32::MAX, 1);
        assert!(parse_record(Some(&s)).is_empty());
    }
}
