use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NutrientType {
    VitaminD,
    Iron,
    B12,
    Magnesium,
    VitaminA,
    Zinc,
}

impl NutrientType {
    pub const ALL: [NutrientType; 6] = [
        NutrientType::VitaminD,
        NutrientType::Iron,
        NutrientType::B12,
        NutrientType::Magnesium,
        NutrientType::VitaminA,
        NutrientType::Zinc,
    ];

    pub fn key(self) -> &'static str {
        match self {
            NutrientType::VitaminD => "vitamin-d",
            NutrientType::Iron => "iron",
            NutrientType::B12 => "b12",
            NutrientType::Magnesium => "magnesium",
            NutrientType::VitaminA => "vitamin-a",
            NutrientType::Zinc => "zinc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|nutrient| nutrient.key() == key)
    }

    /// Display label shown on cards and in the form's select.
    pub fn display_name(self) -> &'static str {
        match self {
            NutrientType::VitaminD => "Vitamin D",
            NutrientType::Iron => "Iron",
            NutrientType::B12 => "B12",
            NutrientType::Magnesium => "Magnesium",
            NutrientType::VitaminA => "Vitamin A",
            NutrientType::Zinc => "Zinc",
        }
    }
}

impl fmt::Display for NutrientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Optimal,
    Improving,
    NeedsAttention,
}

impl Status {
    pub fn key(self) -> &'static str {
        match self {
            Status::Optimal => "optimal",
            Status::Improving => "improving",
            Status::NeedsAttention => "needs-attention",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Improving => "Burning Brighter",
            Status::Optimal => "Fully Fueled",
            Status::NeedsAttention => "Needs More Fuel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: u64,
    pub nutrient_type: NutrientType,
    pub test_value: f64,
    pub unit: String,
    pub test_date: NaiveDate,
    pub previous_value: Option<f64>,
    pub status: Status,
}

impl TestResult {
    pub fn nutrient_name(&self) -> &'static str {
        self.nutrient_type.display_name()
    }
}

/// A result that has been validated but not yet given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub nutrient_type: NutrientType,
    pub test_value: f64,
    pub unit: String,
    pub test_date: NaiveDate,
    pub previous_value: Option<f64>,
    pub status: Status,
}

/// Raw field values as posted by the add-result form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSubmission {
    #[serde(default)]
    pub test_date: String,
    #[serde(default)]
    pub nutrient_type: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub test_value: String,
    #[serde(default)]
    pub unit: String,
}

/// Accepts `"55"` from forms and `55` from JSON clients alike. Other scalars
/// pass through as text so the form controller can reject them.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
        Flag(bool),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Flag(flag) => flag.to_string(),
        Raw::Null => String::new(),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub id: u64,
    pub nutrient_type: NutrientType,
    pub nutrient_name: &'static str,
    pub test_value: f64,
    pub unit: String,
    pub test_date: NaiveDate,
    pub previous_value: Option<f64>,
    pub status: Status,
}

impl From<&TestResult> for ResultView {
    fn from(result: &TestResult) -> Self {
        Self {
            id: result.id,
            nutrient_type: result.nutrient_type,
            nutrient_name: result.nutrient_name(),
            test_value: result.test_value,
            unit: result.unit.clone(),
            test_date: result.test_date,
            previous_value: result.previous_value,
            status: result.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressCard {
    pub nutrient_type: NutrientType,
    pub nutrient_name: &'static str,
    pub status: Status,
    pub status_label: &'static str,
    pub test_value: f64,
    pub unit: String,
    pub previous_value: Option<f64>,
    pub change: f64,
    pub progress_percentage: f64,
    pub test_date: NaiveDate,
    pub last_tested: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub average: f64,
    pub samples: usize,
    pub left: f64,
    pub bottom: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub cards: Vec<ProgressCard>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub result: ResultView,
    pub notification: crate::notify::Notification,
}
