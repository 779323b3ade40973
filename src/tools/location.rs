//! getCurrentLocation: the location-producing end of the tool chain

use std::sync::Arc;

use serde_json::{json, Map};

use crate::registry::{ToolDescriptor, ToolHandler};
use crate::schema::{FieldSpec, FieldType, Schema};

const HOME_LOCATION: &str = "Bengaluru";

pub fn descriptor() -> ToolDescriptor {
    let handler: ToolHandler = Arc::new(|_args| {
        let mut output = Map::new();
        output.insert("location".to_string(), json!(HOME_LOCATION));
        output.insert(
            "message".to_string(),
            json!("Current location retrieved successfully."),
        );
        Ok(output)
    });
    ToolDescriptor {
        name: "getCurrentLocation".to_string(),
        description: format!(
            "Get the current location. Returns {}. Pass the location field to getWeather.",
            HOME_LOCATION
        ),
        input_schema: Schema::default(),
        output_schema: Schema::new(vec![
            FieldSpec::new("location", FieldType::String, true)
                .describe("The user's current city"),
            FieldSpec::new("message", FieldType::String, true),
        ]),
        handler,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_home_location() {
        let tool = descriptor();
        let output = (tool.handler)(Map::new()).expect("handler output");
        assert_eq!(output["location"], json!("Bengaluru"));
        assert!(output["message"].is_string());
    }
}
