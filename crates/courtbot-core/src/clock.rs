//! 12/24-hour clock conversions for command parsing and message rendering.
//! Everything internal runs on 24-hour values; 12-hour readings exist only
//! at the text boundary.

/// Render a 24-hour value the way messages show it, e.g. `19` -> `"7 PM"`.
pub fn twelve_hour(hour: u8) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {period}")
}

/// 24-hour value for a 12-hour clock reading.
pub fn to_24_hour(hour12: u8, pm: bool) -> u8 {
    match (hour12 % 12, pm) {
        (0, false) => 0,
        (0, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_hour_rendering() {
        assert_eq!(twelve_hour(0), "12 AM");
        assert_eq!(twelve_hour(7), "7 AM");
        assert_eq!(twelve_hour(12), "12 PM");
        assert_eq!(twelve_hour(19), "7 PM");
        assert_eq!(twelve_hour(23), "11 PM");
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(to_24_hour(12, false), 0);
        assert_eq!(to_24_hour(12, true), 12);
        assert_eq!(to_24_hour(8, false), 8);
        assert_eq!(to_24_hour(8, true), 20);
        assert_eq!(to_24_hour(11, true), 23);
    }

    #[test]
    fn test_round_trip_on_bookable_hours() {
        for hour in 0..24u8 {
            let text = twelve_hour(hour);
            let pm = text.ends_with("PM");
            let h12: u8 = text
                .split_whitespace()
                .next()
                .and_then(|s| s.parse().ok())
                .unwrap();
            assert_eq!(to_24_hour(h12, pm), hour, "mismatch at {hour}");
        }
    }
}
