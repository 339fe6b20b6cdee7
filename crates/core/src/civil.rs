//! Civil-date math for the fixed operating time zone.
//!
//! Reminder dates are plain calendar dates compared against "today" in
//! Europe/Warsaw. An instant near UTC midnight must resolve to the correct
//! civil day for that zone, so "today" is always derived from a UTC instant
//! through the zone conversion here rather than from `Utc::now().date_naive()`.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// The time zone in which event dates are interpreted.
pub const OPERATING_ZONE: Tz = chrono_tz::Europe::Warsaw;

/// Civil date of the given instant in the operating zone.
pub fn civil_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&OPERATING_ZONE).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // Winter (CET, UTC+1)
    // -----------------------------------------------------------------------

    #[test]
    fn late_utc_evening_is_next_day_in_winter() {
        // 23:30 UTC on Jan 15 is 00:30 local on Jan 16.
        assert_eq!(civil_date(utc(2026, 1, 15, 23, 30)), date(2026, 1, 16));
    }

    #[test]
    fn earlier_utc_evening_stays_same_day_in_winter() {
        // 22:30 UTC on Jan 15 is 23:30 local, still Jan 15.
        assert_eq!(civil_date(utc(2026, 1, 15, 22, 30)), date(2026, 1, 15));
    }

    // -----------------------------------------------------------------------
    // Summer (CEST, UTC+2)
    // -----------------------------------------------------------------------

    #[test]
    fn late_utc_evening_is_next_day_in_summer() {
        // 22:30 UTC on Jun 30 is 00:30 local on Jul 1.
        assert_eq!(civil_date(utc(2026, 6, 30, 22, 30)), date(2026, 7, 1));
    }

    #[test]
    fn utc_midnight_maps_to_same_civil_day() {
        // Midnight UTC is already 01:00 or 02:00 local, same civil day.
        assert_eq!(civil_date(utc(2026, 6, 15, 0, 0)), date(2026, 6, 15));
    }
}
