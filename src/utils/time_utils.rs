use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const AXIS_TIME_FORMAT: &str = "%H:%M";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

fn format_epoch_sec(epoch_sec: i64, format: &str) -> String {
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(format).to_string(),
        None => "--:--".to_string(),
    }
}

/// `HH:MM` in UTC. Used for the x-axis labels.
pub fn epoch_sec_to_hm(epoch_sec: i64) -> String {
    format_epoch_sec(epoch_sec, TimeUtils::AXIS_TIME_FORMAT)
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    format_epoch_sec(epoch_sec, TimeUtils::STANDARD_TIME_FORMAT)
}

pub fn now_timestamp_sec() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_are_utc_hours_and_minutes() {
        assert_eq!(epoch_sec_to_hm(0), "00:00");
        assert_eq!(epoch_sec_to_hm(13 * 3600 + 7 * 60 + 59), "13:07");
        assert_eq!(epoch_sec_to_utc(86_400), "1970-01-02 00:00");
    }

    #[test]
    fn out_of_range_timestamp_does_not_panic() {
        assert_eq!(epoch_sec_to_hm(i64::MAX), "--:--");
    }
}
