use crate::models::TrendPoint;
use crate::store::ResultStore;
use chrono::{Local, Months, NaiveDate};
use std::collections::BTreeMap;

const TREND_MONTHS: u32 = 6;
const TREND_SCALE: f64 = 100.0;

pub fn build_trend(store: &ResultStore) -> Vec<TrendPoint> {
    build_trend_at(Local::now().date_naive(), store)
}

pub fn build_trend_at(today: NaiveDate, store: &ResultStore) -> Vec<TrendPoint> {
    let cutoff = today
        .checked_sub_months(Months::new(TREND_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    // Running mean per month; a plain sum overflows for values near f64::MAX.
    let mut months: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let recent = store
        .records()
        .iter()
        .filter(|record| record.test_date >= cutoff);
    for record in recent {
        let (mean, samples) = months.entry(month_key(record.test_date)).or_insert((0.0, 0));
        *samples += 1;
        *mean += (record.test_value - *mean) / *samples as f64;
    }

    let count = months.len();
    months
        .into_iter()
        .enumerate()
        .map(|(index, (month, (average, samples)))| {
            // A lone month sits at the left edge.
            let left = if count > 1 {
                index as f64 / (count - 1) as f64 * 100.0
            } else {
                0.0
            };

            TrendPoint {
                month,
                average,
                samples,
                left,
                bottom: (average * 100.0 / TREND_SCALE).clamp(0.0, 100.0),
            }
        })
        .collect()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
