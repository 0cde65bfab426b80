use std::time::Duration;

/// Whole seconds, as shown on the score board ("42s", "3m 05s").
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        s if s < 60 => format!("{s}s"),
        s => format!("{}m {:02}s", s / 60, s % 60),
    }
}

/// Score as a percentage of the session, rounded to a whole number.
pub fn accuracy(score: usize, total: usize) -> Option<f64> {
    match total {
        0 => None,
        t => Some((score as f64 / t as f64 * 100.0).round()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(999)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(42)), "42s");
    }

    #[test]
    fn test_format_elapsed_minutes() {
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m 00s");
        assert_eq!(format_elapsed(Duration::from_secs(185)), "3m 05s");
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(5, 5), Some(100.0));
        assert_eq!(accuracy(2, 3), Some(67.0));
        assert_eq!(accuracy(0, 20), Some(0.0));
    }

    #[test]
    fn test_accuracy_empty_session() {
        assert_eq!(accuracy(0, 0), None);
    }
}
