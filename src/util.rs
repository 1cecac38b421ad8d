//! Time and formatting helpers — business-timezone conversions
//!
//! All date → instant conversions happen here; the query layer only ever
//! receives UTC instants, and the report layer only ever receives
//! preformatted labels.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Today's calendar date in the business timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Half-open UTC window `[start, start + 24h)` covering one calendar day
/// in the business timezone.
///
/// DST gap fallback: if local midnight does not exist, fall back to the
/// latest valid interpretation, then to naive-as-UTC.
pub fn day_bounds_utc(day: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = day.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let start = tz
        .from_local_datetime(&midnight)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    (start, start + Duration::hours(24))
}

/// Report date label, `DD/MM/YYYY`.
pub fn date_label(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

/// Attachment date stamp, `YYYY-MM-DD`.
pub fn date_stamp(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Footer timestamp, `DD/MM/YYYY at HH:MM`, in the business timezone.
pub fn generated_at_label(tz: Tz) -> String {
    Utc::now()
        .with_timezone(&tz)
        .format("%d/%m/%Y at %H:%M")
        .to_string()
}

/// Record timestamp for CSV cells, `DD/MM/YYYY HH:MM`, in the business
/// timezone.
pub fn format_record_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
}

/// Filename-safe location slug: every non-alphanumeric character becomes
/// `-`, the result is lower-cased.
pub fn location_slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

/// Thousands-grouped rupee figure: `1234567` → `1,234,567`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;

    #[test]
    fn test_day_bounds_are_half_open_utc() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_bounds_utc(day, Kolkata);

        // IST is UTC+5:30, so local midnight is 18:30 UTC the previous day.
        assert_eq!(start.to_rfc3339(), "2024-03-14T18:30:00+00:00");
        assert_eq!(end - start, Duration::hours(24));
        assert_eq!(end.to_rfc3339(), "2024-03-15T18:30:00+00:00");
    }

    #[test]
    fn test_boundary_instant_belongs_to_exactly_one_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let (_, end_of_first) = day_bounds_utc(day, Kolkata);
        let (start_of_second, _) = day_bounds_utc(next, Kolkata);

        // `< end` on day one excludes the instant that `>= start` on day
        // two includes: no record is counted twice or dropped.
        assert_eq!(end_of_first, start_of_second);
    }

    #[test]
    fn test_date_labels() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_label(day), "05/01/2024");
        assert_eq!(date_stamp(day), "2024-01-05");
    }

    #[test]
    fn test_format_record_time_converts_to_business_tz() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 4, 45, 0).unwrap();
        // 04:45 UTC = 10:15 IST
        assert_eq!(format_record_time(at, Kolkata), "15/03/2024 10:15");
    }

    #[test]
    fn test_location_slug() {
        assert_eq!(location_slug("MG Road, Kochi"), "mg-road--kochi");
        assert_eq!(location_slug("Downtown"), "downtown");
        assert_eq!(location_slug("Unit #4"), "unit--4");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(800), "800");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-50000), "-50,000");
    }
}
