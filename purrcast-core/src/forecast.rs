//! Reduction of the 3-hourly forecast series to daily representatives.

use std::collections::HashSet;

use chrono::Local;

use crate::model::ForecastPoint;

/// Maximum number of days kept by [`daily_buckets`].
pub const MAX_FORECAST_DAYS: usize = 5;

/// Reduce a chronological 3-hourly series to one point per local calendar
/// day, capped at [`MAX_FORECAST_DAYS`].
///
/// The kept point is the first one seen for its date, not a daily mean;
/// callers must not treat it as an aggregate.
pub fn daily_buckets(series: &[ForecastPoint]) -> Vec<ForecastPoint> {
    let mut seen_dates = HashSet::new();
    let mut daily = Vec::new();

    for point in series {
        let date = point.timestamp.with_timezone(&Local).date_naive();
        if seen_dates.insert(date) {
            daily.push(point.clone());
            if daily.len() == MAX_FORECAST_DAYS {
                break;
            }
        }
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Wind};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn point_at(timestamp: DateTime<Utc>, temperature_c: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp,
            temperature_c,
            feels_like_c: temperature_c - 1.0,
            humidity_pct: 70,
            pressure_hpa: 1013,
            condition: Condition::Clouds,
            description: "scattered clouds".to_string(),
            wind: Wind::new(4.0, 90.0),
        }
    }

    /// Midday in local time, so +/- a few hours never crosses a date line.
    fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_series_yields_empty() {
        assert!(daily_buckets(&[]).is_empty());
    }

    #[test]
    fn single_day_yields_one_point() {
        let noon = local_noon(2026, 8, 3);
        let series = vec![
            point_at(noon, 18.0),
            point_at(noon + Duration::hours(3), 20.0),
            point_at(noon + Duration::hours(6), 17.0),
        ];

        let daily = daily_buckets(&series);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].temperature_c, 18.0);
    }

    #[test]
    fn long_series_caps_at_five_first_of_each_day() {
        // Eight 3-hourly points per day over seven days, each day starting at
        // 00:30 local so no slot crosses midnight.
        let mut series = Vec::new();
        for day in 0..7 {
            let start = Local
                .with_ymd_and_hms(2026, 8, 3, 0, 30, 0)
                .unwrap()
                .with_timezone(&Utc)
                + Duration::days(day);
            for slot in 0..8i64 {
                // Temperatures encode (day, slot) so the kept point is identifiable.
                series.push(point_at(
                    start + Duration::hours(3 * slot),
                    day as f64 * 10.0 + slot as f64,
                ));
            }
        }

        let daily = daily_buckets(&series);

        assert_eq!(daily.len(), 5);
        for (day, point) in daily.iter().enumerate() {
            assert_eq!(point.temperature_c, day as f64 * 10.0);
        }
    }

    #[test]
    fn first_point_per_date_is_kept_even_when_unaligned() {
        let noon = local_noon(2026, 8, 3);
        // Two points on day one, one on day two.
        let series = vec![
            point_at(noon + Duration::hours(1), 21.0),
            point_at(noon + Duration::hours(4), 23.0),
            point_at(noon + Duration::days(1), 15.0),
        ];

        let daily = daily_buckets(&series);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].temperature_c, 21.0);
        assert_eq!(daily[1].temperature_c, 15.0);
    }
}
