use crate::classify::progress_percentage;
use crate::models::ProgressCard;
use crate::ranges::RangeTable;
use crate::store::ResultStore;
use chrono::NaiveDate;

pub fn build_cards(store: &ResultStore, table: &RangeTable) -> Vec<ProgressCard> {
    store
        .latest_by_type()
        .into_iter()
        .map(|result| {
            let change = result
                .previous_value
                .map(|previous| result.test_value - previous)
                .unwrap_or(0.0);

            ProgressCard {
                nutrient_type: result.nutrient_type,
                nutrient_name: result.nutrient_name(),
                status: result.status,
                status_label: result.status.label(),
                test_value: result.test_value,
                unit: result.unit.clone(),
                previous_value: result.previous_value,
                change,
                progress_percentage: progress_percentage(
                    table,
                    result.nutrient_type.key(),
                    result.test_value,
                ),
                test_date: result.test_date,
                last_tested: format_date(result.test_date),
            }
        })
        .collect()
}

/// `Aug 1, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewResult, NutrientType, Status};

    fn b12(value: f64, date: &str, previous: Option<f64>) -> NewResult {
        NewResult {
            nutrient_type: NutrientType::B12,
            test_value: value,
            unit: "pg/mL".to_string(),
            test_date: date.parse().unwrap(),
            previous_value: previous,
            status: Status::NeedsAttention,
        }
    }

    #[test]
    fn card_reflects_latest_b12_result() {
        let mut store = ResultStore::new();
        store.append(b12(410.0, "2024-08-01", Some(380.0)));
        store.append(b12(380.0, "2024-07-01", None));

        let cards = build_cards(&store, &RangeTable::standard());
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.test_value, 410.0);
        assert_eq!(card.previous_value, Some(380.0));
        assert_eq!(card.change, 30.0);
        assert_eq!(card.last_tested, "Aug 1, 2024");
        assert!((card.progress_percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn change_is_zero_without_previous_value() {
        let mut store = ResultStore::new();
        store.append(b12(500.0, "2024-08-01", None));

        let cards = build_cards(&store, &RangeTable::standard());
        assert_eq!(cards[0].change, 0.0);
        assert_eq!(cards[0].previous_value, None);
    }

    #[test]
    fn missing_range_defaults_progress() {
        let mut store = ResultStore::new();
        store.append(b12(500.0, "2024-08-01", None));

        let cards = build_cards(&store, &RangeTable::default());
        assert_eq!(cards[0].progress_percentage, 50.0);
    }

    #[test]
    fn seeded_store_renders_one_card_per_type() {
        let cards = build_cards(&ResultStore::seeded(), &RangeTable::standard());
        let names: Vec<_> = cards.iter().map(|card| card.nutrient_name).collect();
        assert_eq!(names, ["Vitamin D", "Iron", "B12"]);
        assert_eq!(cards[0].change, 30.0);
        assert_eq!(cards[2].status_label, "Needs More Fuel");
    }

    #[test]
    fn formats_dates_in_short_us_style() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_date(date), "Dec 25, 2024");
    }
}
