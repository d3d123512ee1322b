use crate::models::Status;
use crate::ranges::RangeTable;

const DEFAULT_PROGRESS: f64 = 50.0;

pub fn classify_status(table: &RangeTable, nutrient: &str, value: f64) -> Status {
    let Some(range) = table.get(nutrient) else {
        return Status::NeedsAttention;
    };

    if !range.contains(value) {
        Status::NeedsAttention
    } else if range.is_near_optimal(value) {
        Status::Optimal
    } else {
        Status::Improving
    }
}

/// Position of `value` inside its reference range, as a percentage in [0, 100].
pub fn progress_percentage(table: &RangeTable, nutrient: &str, value: f64) -> f64 {
    match table.get(nutrient) {
        Some(range) => ((value - range.min) / (range.max - range.min) * 100.0).clamp(0.0, 100.0),
        None => DEFAULT_PROGRESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::RangeEntry;

    #[test]
    fn unknown_nutrients_need_attention() {
        let table = RangeTable::standard();
        for value in [0.0, 50.0, 1_000.0, -3.5] {
            assert_eq!(classify_status(&table, "vitamin-k", value), Status::NeedsAttention);
            assert_eq!(classify_status(&table, "", value), Status::NeedsAttention);
        }
    }

    #[test]
    fn vitamin_d_boundaries() {
        let table = RangeTable::standard();
        assert_ne!(classify_status(&table, "vitamin-d", 100.0), Status::NeedsAttention);
        assert_eq!(classify_status(&table, "vitamin-d", 101.0), Status::NeedsAttention);
        assert_eq!(classify_status(&table, "vitamin-d", 29.9), Status::NeedsAttention);
        assert_eq!(classify_status(&table, "vitamin-d", 30.0), Status::Improving);
        assert_eq!(classify_status(&table, "vitamin-d", 50.0), Status::Optimal);
        assert_eq!(classify_status(&table, "vitamin-d", 40.0), Status::Optimal);
        assert_eq!(classify_status(&table, "vitamin-d", 60.0), Status::Optimal);
        assert_eq!(classify_status(&table, "vitamin-d", 61.0), Status::Improving);
    }

    #[test]
    fn iron_progress_is_linear_within_range() {
        let table = RangeTable::standard();
        let progress = progress_percentage(&table, "iron", 90.0);
        assert!((progress - 27.2727).abs() < 0.001, "got {progress}");
    }

    #[test]
    fn progress_is_clamped() {
        let table = RangeTable::standard();
        assert_eq!(progress_percentage(&table, "iron", 10.0), 0.0);
        assert_eq!(progress_percentage(&table, "iron", 500.0), 100.0);
        assert_eq!(progress_percentage(&table, "iron", 170.0), 100.0);
    }

    #[test]
    fn progress_defaults_without_range() {
        let mut table = RangeTable::default();
        assert_eq!(progress_percentage(&table, "zinc", 90.0), 50.0);

        table.insert("zinc", RangeEntry::new(60.0, 120.0, 90.0));
        assert_eq!(progress_percentage(&table, "zinc", 90.0), 50.0);
        assert_eq!(progress_percentage(&table, "zinc", 60.0), 0.0);
    }
}
