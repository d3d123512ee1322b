use crate::classify::classify_status;
use crate::errors::FormError;
use crate::models::{NewResult, NutrientType, ResultSubmission, TestResult};
use crate::ranges::RangeTable;
use crate::store::ResultStore;
use chrono::NaiveDate;
use tracing::info;

/// Field values that passed boundary parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSubmission {
    pub test_date: NaiveDate,
    pub nutrient_type: NutrientType,
    pub test_value: f64,
    pub unit: String,
}

pub fn parse_submission(submission: &ResultSubmission) -> Result<ParsedSubmission, FormError> {
    let test_date = NaiveDate::parse_from_str(submission.test_date.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::invalid("testDate", "expected a YYYY-MM-DD date"))?;

    let nutrient_key = submission.nutrient_type.trim();
    let nutrient_type = NutrientType::from_key(nutrient_key).ok_or_else(|| {
        FormError::invalid("nutrientType", format!("unknown nutrient '{nutrient_key}'"))
    })?;

    let test_value = submission
        .test_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormError::invalid("testValue", "expected a number"))?;

    Ok(ParsedSubmission {
        test_date,
        nutrient_type,
        test_value,
        unit: submission.unit.trim().to_string(),
    })
}

/// Validates a submission and appends it to the store.
///
/// The previous value is taken from the latest stored result of the same
/// nutrient type, and the status is classified once here.
pub fn submit_result(
    store: &mut ResultStore,
    table: &RangeTable,
    submission: &ResultSubmission,
) -> Result<TestResult, FormError> {
    let parsed = parse_submission(submission)?;
    let previous_value = store
        .latest_for(parsed.nutrient_type)
        .map(|previous| previous.test_value);
    let status = classify_status(table, parsed.nutrient_type.key(), parsed.test_value);

    let result = store
        .append(NewResult {
            nutrient_type: parsed.nutrient_type,
            test_value: parsed.test_value,
            unit: parsed.unit,
            test_date: parsed.test_date,
            previous_value,
            status,
        })
        .clone();

    info!(
        id = result.id,
        nutrient = %result.nutrient_type,
        status = result.status.key(),
        "test result added"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn submission(nutrient: &str, value: &str, date: &str) -> ResultSubmission {
        ResultSubmission {
            test_date: date.to_string(),
            nutrient_type: nutrient.to_string(),
            test_value: value.to_string(),
            unit: " ng/mL ".to_string(),
        }
    }

    #[test]
    fn new_result_links_previous_value() {
        let mut store = ResultStore::seeded();
        let table = RangeTable::standard();

        let added = submit_result(&mut store, &table, &submission("vitamin-d", "55", "2024-09-10"))
            .expect("valid submission");
        assert_eq!(added.previous_value, Some(75.0));
        assert_eq!(added.status, Status::Optimal);
        assert_eq!(added.unit, "ng/mL");
        assert_eq!(added.nutrient_name(), "Vitamin D");

        let latest = store.latest_for(NutrientType::VitaminD).unwrap();
        assert_eq!(latest.id, added.id);
        assert_eq!(store.latest_for(NutrientType::Iron).unwrap().test_value, 90.0);
        assert_eq!(store.latest_for(NutrientType::B12).unwrap().test_value, 200.0);
    }

    #[test]
    fn first_result_has_no_previous_value() {
        let mut store = ResultStore::seeded();
        let added = submit_result(
            &mut store,
            &RangeTable::standard(),
            &submission("magnesium", "2.1", "2024-09-10"),
        )
        .unwrap();
        assert_eq!(added.previous_value, None);
        assert_eq!(added.status, Status::Optimal);
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let mut store = ResultStore::seeded();
        for value in ["", "abc", "NaN", "inf"] {
            let err = submit_result(
                &mut store,
                &RangeTable::standard(),
                &submission("iron", value, "2024-09-10"),
            )
            .unwrap_err();
            assert!(matches!(err, FormError::InvalidInput { field: "testValue", .. }));
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn unknown_nutrient_and_bad_date_are_rejected() {
        let bad_nutrient =
            parse_submission(&submission("vitamin-k", "10", "2024-09-10")).unwrap_err();
        assert!(matches!(bad_nutrient, FormError::InvalidInput { field: "nutrientType", .. }));

        let bad_date = parse_submission(&submission("zinc", "10", "09/10/2024")).unwrap_err();
        assert!(matches!(bad_date, FormError::InvalidInput { field: "testDate", .. }));
    }
}
