use chrono::{NaiveTime, Timelike};

/// Parse a wire-format time of day, accepting "HH:MM" and "HH:MM:SS".
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("invalid time: {}", value))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn minutes_since_midnight(time: NaiveTime) -> i32 {
    (time.num_seconds_from_midnight() / 60) as i32
}

/// Inverse of [`minutes_since_midnight`]; `minutes` must be below 24h.
pub fn time_from_minutes(minutes: i32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(minutes as u32 * 60, 0)
        .expect("minutes within a day")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_wire_formats() {
        assert_eq!(parse_hhmm("09:00").unwrap(), parse_hhmm("09:00:00").unwrap());
        assert!(parse_hhmm("9 am").is_err());
        assert!(parse_hhmm("25:00").is_err());
    }

    #[test]
    fn minute_conversion_round_trips() {
        let half_past_ten = parse_hhmm("10:30").unwrap();
        assert_eq!(630, minutes_since_midnight(half_past_ten));
        assert_eq!(half_past_ten, time_from_minutes(630));
        assert_eq!("10:30", format_hhmm(half_past_ten));
    }
}
