// OilLog - core/estimator.rs
//
// Current-mileage extrapolation from dated oil change records.
// Core layer: pure arithmetic; "today" is injected so results are testable.

use crate::core::model::OilChangeRecord;
use chrono::{Local, NaiveDate};

/// Parse a "Month Year" heading as the first day of that month.
///
/// Returns `None` for anything chrono cannot read as `%B %Y`.
pub fn parse_month_year(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {}", text.trim()), "%d %B %Y").ok()
}

/// Dated (date, mileage) pairs sorted by date. Records whose date is
/// missing or unparseable are left out; ties keep source order.
fn dated_points(records: &[OilChangeRecord]) -> Vec<(NaiveDate, u64)> {
    let mut points: Vec<(NaiveDate, u64)> = records
        .iter()
        .filter_map(|r| {
            let date = r.date.as_deref().and_then(parse_month_year);
            if date.is_none() {
                tracing::trace!(mileage = r.mileage, date = ?r.date, "Record excluded from estimate");
            }
            date.map(|d| (d, r.mileage))
        })
        .collect();
    points.sort_by_key(|(date, _)| *date);
    points
}

/// Average miles per day between the earliest and latest dated records.
///
/// `None` when fewer than two records are dated or the extremes share a
/// month.
pub fn average_miles_per_day(records: &[OilChangeRecord]) -> Option<f64> {
    let points = dated_points(records);
    rate_between(&points)
}

fn rate_between(points: &[(NaiveDate, u64)]) -> Option<f64> {
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let total_days = (last.0 - first.0).num_days();
    if total_days <= 0 {
        return None;
    }
    // Mileages may exceed i64::MAX; subtract in f64.
    let total_mileage = last.1 as f64 - first.1 as f64;
    Some(total_mileage / total_days as f64)
}

/// Estimate the odometer reading on `today`.
///
/// Two-endpoint linear extrapolation: the rate comes from the earliest and
/// latest dated records only, then is projected from the latest record's
/// date to `today`.
pub fn estimate_at(records: &[OilChangeRecord], today: NaiveDate) -> Option<i64> {
    let points = dated_points(records);
    let rate = rate_between(&points)?;
    let (last_date, last_mileage) = *points.last()?;

    let days_since_last = (today - last_date).num_days();
    let estimate = (last_mileage as f64 + rate * days_since_last as f64).floor() as i64;

    tracing::debug!(
        dated = points.len(),
        rate,
        days_since_last,
        estimate,
        "Mileage estimated"
    );
    Some(estimate)
}

/// Estimate the odometer reading as of the local current date.
pub fn estimate(records: &[OilChangeRecord]) -> Option<i64> {
    estimate_at(records, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(mileage: u64, date: Option<&str>) -> OilChangeRecord {
        OilChangeRecord {
            mileage,
            date: date.map(str::to_string),
            oil_type: None,
            filter_type: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_month_year() {
        assert_eq!(parse_month_year("January 2020"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_month_year("  December   1999 "), Some(ymd(1999, 12, 1)));
        assert_eq!(parse_month_year("Smarch 2020"), None);
        assert_eq!(parse_month_year(""), None);
    }

    #[test]
    fn test_estimate_one_year_after_second_record() {
        let records = vec![
            rec(10000, Some("January 2020")),
            rec(20000, Some("January 2021")),
        ];
        // 2020 is a leap year: 366 days between the headings.
        let rate = 10000.0 / 366.0;
        let today = ymd(2022, 1, 1);
        let expected = (20000.0 + rate * 365.0_f64).floor() as i64;
        assert_eq!(estimate_at(&records, today), Some(expected));
        assert_eq!(expected, 29972);
    }

    #[test]
    fn test_estimate_on_last_date_is_last_mileage() {
        let records = vec![rec(100, Some("March 2019")), rec(5000, Some("March 2020"))];
        assert_eq!(estimate_at(&records, ymd(2020, 3, 1)), Some(5000));
    }

    #[test]
    fn test_fewer_than_two_dated_records_is_unknown() {
        assert_eq!(estimate_at(&[], ymd(2024, 1, 1)), None);
        assert_eq!(
            estimate_at(&[rec(100, Some("May 2020"))], ymd(2024, 1, 1)),
            None
        );
        let records = vec![rec(100, Some("May 2020")), rec(200, None)];
        assert_eq!(estimate_at(&records, ymd(2024, 1, 1)), None);
    }

    #[test]
    fn test_same_month_extremes_is_unknown() {
        let records = vec![rec(100, Some("May 2020")), rec(900, Some("May 2020"))];
        assert_eq!(estimate_at(&records, ymd(2024, 1, 1)), None);
        assert_eq!(average_miles_per_day(&records), None);
    }

    #[test]
    fn test_unparseable_dates_are_excluded() {
        let records = vec![
            rec(0, Some("Sometime 2019")),
            rec(1000, Some("January 2020")),
            rec(2000, Some("February 2020")),
        ];
        // 31 days, 1000 miles.
        let rate = average_miles_per_day(&records).unwrap();
        assert!((rate - 1000.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_records_sorted_by_date_before_rate() {
        let records = vec![
            rec(20000, Some("January 2021")),
            rec(15000, Some("July 2020")),
            rec(10000, Some("January 2020")),
        ];
        let rate = average_miles_per_day(&records).unwrap();
        assert!((rate - 10000.0 / 366.0).abs() < 1e-9);
        // Intermediate point does not influence the rate.
        let with_outlier = vec![
            rec(10000, Some("January 2020")),
            rec(99999, Some("July 2020")),
            rec(20000, Some("January 2021")),
        ];
        assert_eq!(average_miles_per_day(&with_outlier), Some(rate));
    }

    #[test]
    fn test_mileage_beyond_i64_range_does_not_overflow() {
        let records = vec![
            rec(100, Some("January 2020")),
            rec(9_223_372_036_854_775_808, Some("January 2021")),
        ];
        let rate = average_miles_per_day(&records).unwrap();
        assert!(rate > 0.0);
        // Projection saturates instead of wrapping negative.
        assert_eq!(estimate_at(&records, ymd(2022, 1, 1)), Some(i64::MAX));

        let falling = vec![
            rec(u64::MAX, Some("January 2020")),
            rec(0, Some("January 2021")),
        ];
        assert!(average_miles_per_day(&falling).unwrap() < 0.0);
        assert!(estimate_at(&falling, ymd(2021, 1, 1)).is_some());
    }

    #[test]
    fn test_estimate_floors() {
        // 10 miles over 31 days, projected 1 day: 10 + 0.32.. -> 10.
        let records = vec![rec(0, Some("January 2020")), rec(10, Some("February 2020"))];
        assert_eq!(estimate_at(&records, ymd(2020, 2, 2)), Some(10));
    }
}
