use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::NutrientType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeEntry {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl RangeEntry {
    pub const fn new(min: f64, max: f64, optimal: f64) -> Self {
        Self { min, max, optimal }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Inclusive band of +/-20% around the optimal value.
    pub fn is_near_optimal(&self, value: f64) -> bool {
        value >= self.optimal * 0.8 && value <= self.optimal * 1.2
    }
}

/// Reference ranges keyed by nutrient identifier.
///
/// Keys are plain strings so lookups for identifiers outside the known set
/// simply miss instead of failing.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    entries: BTreeMap<String, RangeEntry>,
}

impl RangeTable {
    pub fn standard() -> Self {
        let mut table = Self::default();
        table.insert(NutrientType::VitaminD.key(), RangeEntry::new(30.0, 100.0, 50.0));
        table.insert(NutrientType::Iron.key(), RangeEntry::new(60.0, 170.0, 100.0));
        table.insert(NutrientType::B12.key(), RangeEntry::new(200.0, 900.0, 500.0));
        table.insert(NutrientType::Magnesium.key(), RangeEntry::new(1.7, 2.2, 2.0));
        table.insert(NutrientType::VitaminA.key(), RangeEntry::new(20.0, 80.0, 50.0));
        table.insert(NutrientType::Zinc.key(), RangeEntry::new(60.0, 120.0, 90.0));
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: RangeEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&RangeEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_nutrient() {
        let table = RangeTable::standard();
        assert_eq!(table.len(), NutrientType::ALL.len());
        for nutrient in NutrientType::ALL {
            let entry = table.get(nutrient.key()).expect("missing range");
            assert!(entry.min < entry.optimal && entry.optimal < entry.max);
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let entry = RangeEntry::new(30.0, 100.0, 50.0);
        assert!(entry.contains(30.0));
        assert!(entry.contains(100.0));
        assert!(!entry.contains(100.5));
        assert!(entry.is_near_optimal(40.0));
        assert!(entry.is_near_optimal(60.0));
        assert!(!entry.is_near_optimal(61.0));
    }
}
