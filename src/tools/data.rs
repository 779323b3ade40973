//! Static demo lookup tables
//!
//! Handlers hold a shared reference to these tables at construction time;
//! there is no process-wide mutable state.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

/// Temperature unit used across the table.
pub const UNIT: &str = "Celsius";

/// One row of the weather table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherEntry {
    pub temperature: i64,
    pub condition: &'static str,
    pub humidity: i64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: i64,
}

/// Fixed four-city weather table.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    entries: BTreeMap<&'static str, WeatherEntry>,
}

impl WeatherTable {
    /// The demo table: four Indian cities with fixed readings.
    pub fn demo() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "Bengaluru",
            WeatherEntry {
                temperature: 28,
                condition: "Partly Cloudy",
                humidity: 65,
                wind_speed: 12,
            },
        );
        entries.insert(
            "Mumbai",
            WeatherEntry {
                temperature: 32,
                condition: "Sunny",
                humidity: 75,
                wind_speed: 15,
            },
        );
        entries.insert(
            "Delhi",
            WeatherEntry {
                temperature: 35,
                condition: "Hot",
                humidity: 45,
                wind_speed: 10,
            },
        );
        entries.insert(
            "Chennai",
            WeatherEntry {
                temperature: 30,
                condition: "Humid",
                humidity: 80,
                wind_speed: 18,
            },
        );
        Self { entries }
    }

    pub fn get(&self, location: &str) -> Option<&WeatherEntry> {
        self.entries.get(location)
    }

    /// Distinct conditions appearing in the table, used as the enum for
    /// the downstream food tool's `condition` input.
    pub fn conditions(&self) -> Vec<Value> {
        let mut conditions = Vec::new();
        for entry in self.entries.values() {
            let value = json!(entry.condition);
            if !conditions.contains(&value) {
                conditions.push(value);
            }
        }
        conditions
    }

    /// JSON dump of the table, served as a resource.
    pub fn as_json(&self) -> Value {
        let mut dump = serde_json::Map::new();
        for (city, entry) in &self.entries {
            dump.insert((*city).to_string(), json!(entry));
        }
        Value::Object(dump)
    }
}

/// Food recommendation for a weather condition and temperature.
///
/// The rules are keyed on condition keywords first, temperature second.
pub fn recommend_food(condition: &str, temperature: i64) -> &'static str {
    let condition = condition.to_lowercase();
    if condition.contains("rain") || condition.contains("cloudy") {
        "Hot Masala Dosa with Sambar and Chutney - perfect for a cozy rainy day!"
    } else if condition.contains("sunny") || temperature > 30 {
        "Cool Raita, Fresh Fruit Salad, and Lemon Rice - refreshing for hot weather!"
    } else if condition.contains("cold") || temperature < 20 {
        "Hot Biryani with Raita and Gulab Jamun - warming comfort food!"
    } else {
        "Butter Chicken with Naan and Mango Lassi - a balanced meal for pleasant weather!"
    }
}

/// JSON dump of the recommendation rules, served as a resource.
pub fn food_rules_json() -> Value {
    json!({
        "rainy_or_cloudy": recommend_food("Rainy", 20),
        "sunny_or_hot": recommend_food("Sunny", 32),
        "cold": recommend_food("Cold", 10),
        "default": recommend_food("Humid", 25),
    })
}
