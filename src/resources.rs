//! Built-in static resources

use crate::error::Result;
use crate::registry::{ResourceDescriptor, ResourceRegistry};
use crate::tools::data::{food_rules_json, WeatherTable};

pub const WEATHER_DATA_URI: &str = "tiffin://weather-data";
pub const FOOD_RECOMMENDATIONS_URI: &str = "tiffin://food-recommendations";
pub const HELP_URI: &str = "tiffin://help";

const HELP_TEXT: &str = "\
Tiffin MCP Server
=================

Tools (call them in this order):
  1. getCurrentLocation  - returns the current city
  2. getWeather          - takes a location, returns conditions
  3. orderFood           - takes a condition (and optional temperature),
                           returns a food order

Each tool's output names the field the next tool expects; the client
carries values between calls. The server keeps no session state.

Prompts:
  weather_food_guide(location)  - guided weather-and-food walkthrough
  quick_weather_check(location) - one-line weather question

Resources:
  tiffin://weather-data         - the weather lookup table (JSON)
  tiffin://food-recommendations - the food recommendation rules (JSON)
  tiffin://help                 - this document
";

pub fn register_builtin_resources(
    registry: &mut ResourceRegistry,
    table: &WeatherTable,
) -> Result<()> {
    registry.register(ResourceDescriptor {
        uri: WEATHER_DATA_URI.to_string(),
        name: "Weather Data".to_string(),
        description: "Per-city weather readings backing getWeather".to_string(),
        mime_type: "application/json".to_string(),
        text: serde_json::to_string_pretty(&table.as_json())?,
    })?;
    registry.register(ResourceDescriptor {
        uri: FOOD_RECOMMENDATIONS_URI.to_string(),
        name: "Food Recommendations".to_string(),
        description: "Condition-to-dish rules backing orderFood".to_string(),
        mime_type: "application/json".to_string(),
        text: serde_json::to_string_pretty(&food_rules_json())?,
    })?;
    registry.register(ResourceDescriptor {
        uri: HELP_URI.to_string(),
        name: "Help".to_string(),
        description: "How to use this server".to_string(),
        mime_type: "text/plain".to_string(),
        text: HELP_TEXT.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_builtin_resources_registered() {
        let mut registry = ResourceRegistry::new();
        register_builtin_resources(&mut registry, &WeatherTable::demo())
            .expect("register resources");
        let uris: Vec<&str> = registry
            .list_all()
            .iter()
            .map(|r| r.uri.as_str())
            .collect();
        assert_eq!(
            uris,
            vec![WEATHER_DATA_URI, FOOD_RECOMMENDATIONS_URI, HELP_URI]
        );
    }

    #[test]
    fn test_weather_data_is_valid_json() {
        let mut registry = ResourceRegistry::new();
        register_builtin_resources(&mut registry, &WeatherTable::demo())
            .expect("register resources");
        let resource = registry.lookup(WEATHER_DATA_URI).expect("weather data");
        assert_eq!(resource.mime_type, "application/json");
        let parsed: Value = serde_json::from_str(&resource.text).expect("valid JSON");
        assert_eq!(parsed["Bengaluru"]["temperature"], 28);
        assert_eq!(parsed["Mumbai"]["windSpeed"], 15);
    }

    #[test]
    fn test_help_names_every_tool() {
        let mut registry = ResourceRegistry::new();
        register_builtin_resources(&mut registry, &WeatherTable::demo())
            .expect("register resources");
        let help = registry.lookup(HELP_URI).expect("help resource");
        assert_eq!(help.mime_type, "text/plain");
        for tool in ["getCurrentLocation", "getWeather", "orderFood"] {
            assert!(help.text.contains(tool), "help missing {tool}");
        }
    }
}
