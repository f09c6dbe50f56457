//! Rebasing a series so its first value is 100.

use crate::models::point::{NormalizedPoint, PricePoint};

/// `100 * close / first_close` for every point, in input order.
///
/// A first close of zero yields non-finite values; bars from a source are
/// expected to carry positive prices.
pub fn normalize<P: PricePoint>(series: &[P]) -> Vec<NormalizedPoint> {
    let Some(first) = series.first().map(PricePoint::close) else {
        return Vec::new();
    };
    series
        .iter()
        .map(|p| NormalizedPoint {
            date: p.date(),
            value: 100.0 * p.close() / first,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::point::SeriesPoint;

    fn series(values: &[f64]) -> Vec<SeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2019, 6, 3).unwrap();
        values
            .iter()
            .zip(start.iter_days())
            .map(|(&value, date)| SeriesPoint { date, value })
            .collect()
    }

    #[test]
    fn rebases_to_one_hundred() {
        let out = normalize(&series(&[50.0, 75.0, 25.0]));
        let values: Vec<f64> = out.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 150.0, 50.0]);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(normalize::<SeriesPoint>(&[]).is_empty());
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let once = normalize(&series(&[40.0, 52.0, 61.0, 38.0]));
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn zero_base_is_not_finite() {
        let out = normalize(&series(&[0.0, 10.0]));
        assert!(out.iter().all(|p| !p.value.is_finite()));
    }
}
