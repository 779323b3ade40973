//! getWeather: fixed-table weather lookup keyed by city name

use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::data::{WeatherTable, UNIT};
use crate::error::ToolError;
use crate::registry::{ToolDescriptor, ToolHandler};
use crate::schema::{FieldSpec, FieldType, Schema};

pub fn descriptor(table: Arc<WeatherTable>) -> ToolDescriptor {
    let handler: ToolHandler = Arc::new(move |args| {
        let location = args
            .get("location")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let entry = table.get(&location).ok_or_else(|| {
            ToolError::Execution(format!(
                "weather data not available for location: {}",
                location
            ))
        })?;
        let mut output = Map::new();
        output.insert("location".to_string(), json!(location));
        output.insert("temperature".to_string(), json!(entry.temperature));
        output.insert("condition".to_string(), json!(entry.condition));
        output.insert("humidity".to_string(), json!(entry.humidity));
        output.insert("windSpeed".to_string(), json!(entry.wind_speed));
        output.insert("unit".to_string(), json!(UNIT));
        output.insert(
            "message".to_string(),
            json!(format!("Weather retrieved for {}.", location)),
        );
        Ok(output)
    });
    ToolDescriptor {
        name: "getWeather".to_string(),
        description: "Get weather information for a location. Obtain the location from \
                      getCurrentLocation or the user; pass the condition field to orderFood."
            .to_string(),
        input_schema: Schema::new(vec![FieldSpec::new("location", FieldType::String, true)
            .describe("City to get weather for, e.g. from getCurrentLocation")
            .examples(vec![json!("Bengaluru"), json!("Mumbai")])]),
        output_schema: Schema::new(vec![
            FieldSpec::new("location", FieldType::String, true),
            FieldSpec::new("temperature", FieldType::Integer, true),
            FieldSpec::new("condition", FieldType::String, true)
                .describe("Weather condition; feeds orderFood's condition input"),
            FieldSpec::new("humidity", FieldType::Integer, true),
            FieldSpec::new("windSpeed", FieldType::Integer, true),
            FieldSpec::new("unit", FieldType::String, true),
            FieldSpec::new("message", FieldType::String, true),
        ]),
        handler,
    }
}
