use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today_string() -> String {
    format_date(today())
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Convert a spreadsheet serial day number into a calendar date.
///
/// The serial is applied as `(serial - 1)` days of millisecond offset from
/// 1899-12-30T00:00Z, one further day is added, and the UTC date part is
/// kept. Files produced by spreadsheet tools depend on this exact mapping,
/// so serial 1 is 1899-12-31 and serial 45000 is 2023-03-15.
///
/// Returns `None` when the serial is not finite or falls outside the
/// representable date range.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let offset_ms = ((serial - 1.0) * MILLIS_PER_DAY).trunc();
    if offset_ms.abs() > i64::MAX as f64 {
        return None;
    }

    let shifted = epoch.checked_add_signed(Duration::try_milliseconds(offset_ms as i64)?)?;
    let next_day = shifted.checked_add_signed(Duration::days(1))?;

    Some(next_day.date())
}

/// Serial conversion formatted as `YYYY-MM-DD`.
pub fn excel_serial_to_string(serial: f64) -> Option<String> {
    excel_serial_to_date(serial).map(format_date)
}

/// Normalize a stored date for display (`YYYY-MM-DD`).
///
/// Plain dates, naive date-times and RFC 3339 stamps are reduced to their
/// date part; anything else is shown as-is.
pub fn display_date(s: &str) -> String {
    let trimmed = s.trim();

    if let Some(d) = parse_date(trimmed) {
        return format_date(d);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return format_date(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return format_date(dt.date_naive());
    }

    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn serial_one_is_last_day_of_1899() {
        assert_eq!(excel_serial_to_date(1.0), Some(ymd(1899, 12, 31)));
    }

    #[test]
    fn serial_45000() {
        assert_eq!(excel_serial_to_string(45000.0).as_deref(), Some("2023-03-15"));
    }

    #[test]
    fn serial_around_the_1900_leap_quirk() {
        assert_eq!(excel_serial_to_date(0.0), Some(ymd(1899, 12, 30)));
        assert_eq!(excel_serial_to_date(60.0), Some(ymd(1900, 2, 28)));
        assert_eq!(excel_serial_to_date(61.0), Some(ymd(1900, 3, 1)));
        assert_eq!(excel_serial_to_date(44986.0), Some(ymd(2023, 3, 1)));
    }

    #[test]
    fn fractional_serial_keeps_the_date_part() {
        assert_eq!(excel_serial_to_date(45000.75), Some(ymd(2023, 3, 15)));
        assert_eq!(excel_serial_to_date(-0.5), Some(ymd(1899, 12, 29)));
    }

    #[test]
    fn non_finite_serial_has_no_date() {
        assert_eq!(excel_serial_to_date(f64::NAN), None);
        assert_eq!(excel_serial_to_date(f64::INFINITY), None);
        assert_eq!(excel_serial_to_date(1e300), None);
    }

    #[test]
    fn display_date_trims_time_parts() {
        assert_eq!(display_date("2024-05-01"), "2024-05-01");
        assert_eq!(display_date("2024-05-01T10:30:00"), "2024-05-01");
        assert_eq!(display_date("2024-05-01T23:30:00+00:00"), "2024-05-01");
        assert_eq!(display_date("last tuesday"), "last tuesday");
    }
}
