//! Clock access and date formatting shared by the views.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};

/// Local wall-clock time, matching the zone-less timestamps the backend sends.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// "Jan 5, 2024"
pub fn format_date(t: NaiveDateTime) -> String {
    t.format("%b %-d, %Y").to_string()
}

/// "Jan 5, 2024 14:30"
pub fn format_date_time(t: NaiveDateTime) -> String {
    t.format("%b %-d, %Y %H:%M").to_string()
}

pub fn format_optional(t: Option<NaiveDateTime>) -> String {
    t.map(format_date_time).unwrap_or_else(|| "N/A".to_string())
}

/// Relative age for notification lists: "just now", "5m ago", "3h ago",
/// "2d ago", then the date.
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 7 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else {
        format_date(then)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_time_ago() {
        assert_eq!(time_ago(at(12, 0), at(12, 0)), "just now");
        assert_eq!(time_ago(at(12, 0), at(12, 7)), "7m ago");
        assert_eq!(time_ago(at(9, 0), at(12, 0)), "3h ago");
        let later = at(12, 0) + chrono::Duration::days(2);
        assert_eq!(time_ago(at(12, 0), later), "2d ago");
        let much_later = at(12, 0) + chrono::Duration::days(30);
        assert_eq!(time_ago(at(12, 0), much_later), "Jan 5, 2024");
    }

    #[test]
    fn test_formats() {
        assert_eq!(format_date_time(at(14, 30)), "Jan 5, 2024 14:30");
        assert_eq!(format_optional(None), "N/A");
    }
}
