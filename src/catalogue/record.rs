//! Listing records as returned by the car API.
//!
//! The controller never interprets a record beyond counting them. The helpers
//! here exist for the card renderer, and every one tolerates missing fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const BASE_PRICE_PER_DAY: f64 = 50.0;
const MILEAGE_FACTOR: f64 = 0.1;
const AGE_FACTOR: f64 = 0.05;

/// One car listing, kept as the raw JSON object the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarRecord(Value);

impl CarRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// String field by name, if present and a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Numeric field by name, accepting integers or floats.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// Card title: "Make Model" with each word capitalised.
    pub fn title(&self) -> String {
        let joined = [self.text("make"), self.text("model")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            return "Unknown car".to_string();
        }
        joined
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn transmission_label(&self) -> &'static str {
        match self.text("transmission") {
            Some("a") => "Automatic",
            _ => "Manual",
        }
    }

    pub fn drive_label(&self) -> String {
        self.text("drive")
            .map(str::to_uppercase)
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn city_mpg(&self) -> Option<f64> {
        self.number("city_mpg")
    }

    /// Estimated daily rental price, rounded to whole units.
    ///
    /// Base 50, plus 0.1 per city MPG, plus 0.05 per year of age.
    pub fn daily_rent(&self, current_year: i32) -> Option<u32> {
        let mpg = self.city_mpg()?;
        let year = self.number("year")?;
        let rent = BASE_PRICE_PER_DAY + mpg * MILEAGE_FACTOR + (current_year as f64 - year) * AGE_FACTOR;
        Some(rent.round().max(0.0) as u32)
    }

    /// All fields as `(name, display value)` pairs, for the details panel.
    pub fn fields(&self) -> Vec<(String, String)> {
        match &self.0 {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let shown = match value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    (key.replace('_', " "), shown)
                })
                .collect(),
            other => vec![("value".to_string(), other.to_string())],
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The records currently held by the controller.
///
/// The API answers with a JSON array on success, but error payloads such as
/// `{"message": "..."}` arrive as plain objects. Those are kept as
/// [`ResultSet::Malformed`]: not a sequence, so they have no length and render
/// as the empty state.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    Records(Vec<CarRecord>),
    Malformed(Value),
}

impl Default for ResultSet {
    fn default() -> Self {
        ResultSet::Records(Vec::new())
    }
}

impl From<Vec<CarRecord>> for ResultSet {
    fn from(records: Vec<CarRecord>) -> Self {
        ResultSet::Records(records)
    }
}

impl ResultSet {
    /// Classify a decoded response body.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => ResultSet::Records(items.into_iter().map(CarRecord::new).collect()),
            other => ResultSet::Malformed(other),
        }
    }

    /// Number of records, or `None` when the payload was not a sequence.
    pub fn len(&self) -> Option<usize> {
        match self {
            ResultSet::Records(records) => Some(records.len()),
            ResultSet::Malformed(_) => None,
        }
    }

    /// True when the payload is not a sequence or holds no records.
    pub fn is_empty(&self) -> bool {
        self.len().map_or(true, |len| len < 1)
    }

    pub fn records(&self) -> &[CarRecord] {
        match self {
            ResultSet::Records(records) => records,
            ResultSet::Malformed(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn camry() -> CarRecord {
        CarRecord::new(json!({
            "make": "toyota",
            "model": "camry hybrid",
            "year": 2020,
            "city_mpg": 51,
            "transmission": "a",
            "drive": "fwd",
            "fuel_type": "gas"
        }))
    }

    #[test]
    fn card_labels() {
        let car = camry();
        assert_eq!(car.title(), "Toyota Camry Hybrid");
        assert_eq!(car.transmission_label(), "Automatic");
        assert_eq!(car.drive_label(), "FWD");

        let bare = CarRecord::new(json!({"transmission": "m"}));
        assert_eq!(bare.title(), "Unknown car");
        assert_eq!(bare.transmission_label(), "Manual");
        assert_eq!(bare.drive_label(), "-");
    }

    #[test]
    fn daily_rent_follows_pricing_sheet() {
        // 50 + 51 * 0.1 + (2024 - 2020) * 0.05 = 55.3
        assert_eq!(camry().daily_rent(2024), Some(55));
        assert_eq!(CarRecord::new(json!({"make": "kia"})).daily_rent(2024), None);
    }

    #[test]
    fn fields_are_listed_for_details() {
        let fields = camry().fields();
        assert!(fields.contains(&("city mpg".to_string(), "51".to_string())));
        assert!(fields.contains(&("make".to_string(), "toyota".to_string())));
    }

    #[test]
    fn result_set_classification() {
        let records = ResultSet::from_json(json!([{"make": "bmw"}, {"make": "audi"}]));
        assert_eq!(records.len(), Some(2));
        assert!(!records.is_empty());

        let empty = ResultSet::from_json(json!([]));
        assert_eq!(empty.len(), Some(0));
        assert!(empty.is_empty());

        let malformed = ResultSet::from_json(json!({"message": "You are not subscribed"}));
        assert_eq!(malformed.len(), None);
        assert!(malformed.is_empty());
        assert!(malformed.records().is_empty());
    }
}
