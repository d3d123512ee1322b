use crate::models::{NewResult, NutrientType, Status, TestResult};
use chrono::NaiveDate;

/// Append-only, in-memory list of test results.
#[derive(Debug, Clone)]
pub struct ResultStore {
    records: Vec<TestResult>,
    next_id: u64,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the sample results the dashboard ships with.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for (nutrient_type, test_value, unit, previous_value, status) in [
            (NutrientType::VitaminD, 75.0, "ng/mL", 45.0, Status::Improving),
            (NutrientType::Iron, 90.0, "µg/dL", 65.0, Status::Optimal),
            (NutrientType::B12, 200.0, "pg/mL", 180.0, Status::NeedsAttention),
        ] {
            store.append(NewResult {
                nutrient_type,
                test_value,
                unit: unit.to_string(),
                test_date: seed_date(),
                previous_value: Some(previous_value),
                status,
            });
        }
        store
    }

    pub fn append(&mut self, result: NewResult) -> &TestResult {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.records.push(TestResult {
            id,
            nutrient_type: result.nutrient_type,
            test_value: result.test_value,
            unit: result.unit,
            test_date: result.test_date,
            previous_value: result.previous_value,
            status: result.status,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[TestResult] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest record per nutrient type, in order of each type's first appearance.
    ///
    /// A later record only replaces the current pick when its date is strictly
    /// greater, so the first record seen among equal dates is kept.
    pub fn latest_by_type(&self) -> Vec<&TestResult> {
        let mut latest: Vec<&TestResult> = Vec::new();
        for record in &self.records {
            match latest
                .iter_mut()
                .find(|current| current.nutrient_type == record.nutrient_type)
            {
                Some(current) => {
                    if record.test_date > current.test_date {
                        *current = record;
                    }
                }
                None => latest.push(record),
            }
        }
        latest
    }

    pub fn latest_for(&self, nutrient_type: NutrientType) -> Option<&TestResult> {
        self.records
            .iter()
            .filter(|record| record.nutrient_type == nutrient_type)
            .fold(None, |current: Option<&TestResult>, record| match current {
                Some(current) if record.test_date <= current.test_date => Some(current),
                _ => Some(record),
            })
    }
}

fn seed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(nutrient_type: NutrientType, value: f64, date: &str) -> NewResult {
        NewResult {
            nutrient_type,
            test_value: value,
            unit: "pg/mL".to_string(),
            test_date: date.parse().unwrap(),
            previous_value: None,
            status: Status::Improving,
        }
    }

    #[test]
    fn append_assigns_unique_ids() {
        let mut store = ResultStore::new();
        let first = store.append(result(NutrientType::B12, 300.0, "2024-07-01")).id;
        let second = store.append(result(NutrientType::B12, 310.0, "2024-07-02")).id;
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn seeded_store_has_sample_results() {
        let store = ResultStore::seeded();
        assert_eq!(store.len(), 3);
        let iron = store.latest_for(NutrientType::Iron).expect("iron seeded");
        assert_eq!(iron.test_value, 90.0);
        assert_eq!(iron.previous_value, Some(65.0));
        assert_eq!(iron.status, Status::Optimal);
        assert!(store.latest_for(NutrientType::Zinc).is_none());
    }

    #[test]
    fn latest_by_type_picks_max_date() {
        let mut store = ResultStore::new();
        store.append(result(NutrientType::B12, 300.0, "2024-07-01"));
        store.append(result(NutrientType::Iron, 80.0, "2024-06-01"));
        store.append(result(NutrientType::B12, 420.0, "2024-08-01"));
        store.append(result(NutrientType::B12, 250.0, "2024-05-01"));

        let latest = store.latest_by_type();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].nutrient_type, NutrientType::B12);
        assert_eq!(latest[0].test_value, 420.0);
        assert_eq!(latest[1].nutrient_type, NutrientType::Iron);
    }

    #[test]
    fn equal_dates_keep_first_seen() {
        let mut store = ResultStore::new();
        store.append(result(NutrientType::Zinc, 70.0, "2024-08-01"));
        store.append(result(NutrientType::Zinc, 95.0, "2024-08-01"));

        assert_eq!(store.latest_by_type()[0].test_value, 70.0);
        assert_eq!(store.latest_for(NutrientType::Zinc).unwrap().test_value, 70.0);
    }
}
