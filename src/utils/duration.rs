//! Time value formatting.
//!
//! Lingua Franca writes time values as `<integer> <unit>`. Durations from
//! the YAML configuration are rendered with the coarsest unit that keeps
//! the value exact.

use std::time::Duration;

/// Render a duration as an LF time value
///
/// # Examples
/// ```
/// use lfcompose::utils::duration::format_lf_time;
/// use std::time::Duration;
///
/// assert_eq!(format_lf_time(Duration::from_secs(1)), "1 sec");
/// assert_eq!(format_lf_time(Duration::from_millis(250)), "250 msec");
/// assert_eq!(format_lf_time(Duration::from_micros(1500)), "1500 usec");
/// ```
pub fn format_lf_time(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0 sec".to_string();
    }

    const UNITS: [(u128, &str); 3] = [
        (1_000_000_000, "sec"),
        (1_000_000, "msec"),
        (1_000, "usec"),
    ];

    for (scale, unit) in UNITS {
        if nanos % scale == 0 {
            return format!("{} {}", nanos / scale, unit);
        }
    }
    format!("{} nsec", nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_seconds() {
        assert_eq!(format_lf_time(Duration::from_secs(1)), "1 sec");
        assert_eq!(format_lf_time(Duration::from_secs(90)), "90 sec");
    }

    #[test]
    fn test_sub_second_units() {
        assert_eq!(format_lf_time(Duration::from_millis(500)), "500 msec");
        assert_eq!(format_lf_time(Duration::from_millis(1500)), "1500 msec");
        assert_eq!(format_lf_time(Duration::from_micros(33)), "33 usec");
        assert_eq!(format_lf_time(Duration::from_nanos(7)), "7 nsec");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_lf_time(Duration::ZERO), "0 sec");
    }
}
