//! orderFood: weather-driven food recommendation

use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::data::{recommend_food, WeatherTable};
use crate::registry::{ToolDescriptor, ToolHandler};
use crate::schema::{FieldSpec, FieldType, Schema};

/// Assumed temperature when the caller does not pass one through from
/// getWeather.
const DEFAULT_TEMPERATURE: i64 = 25;

pub fn descriptor(table: &WeatherTable) -> ToolDescriptor {
    let conditions = table.conditions();
    let handler: ToolHandler = Arc::new(|args| {
        let condition = args
            .get("condition")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let temperature = args
            .get("temperature")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_TEMPERATURE);
        let order = recommend_food(&condition, temperature);
        let mut output = Map::new();
        output.insert("condition".to_string(), json!(condition));
        output.insert("order".to_string(), json!(order));
        output.insert("status".to_string(), json!("Ordered"));
        output.insert(
            "message".to_string(),
            json!(format!("Food ordered for {} weather.", condition)),
        );
        Ok(output)
    });
    ToolDescriptor {
        name: "orderFood".to_string(),
        description: "Recommend and order food for a weather condition. Obtain the condition \
                      from getWeather's condition output field."
            .to_string(),
        input_schema: Schema::new(vec![
            FieldSpec::new("condition", FieldType::String, true)
                .describe("Weather condition from getWeather")
                .allowed(conditions)
                .examples(vec![json!("Sunny")]),
            FieldSpec::new("temperature", FieldType::Integer, false)
                .describe("Temperature in Celsius from getWeather"),
        ]),
        output_schema: Schema::new(vec![
            FieldSpec::new("condition", FieldType::String, true),
            FieldSpec::new("order", FieldType::String, true),
            FieldSpec::new("status", FieldType::String, true),
            FieldSpec::new("message", FieldType::String, true),
        ]),
        handler,
    }
}
