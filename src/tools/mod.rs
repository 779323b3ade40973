//! Built-in tool set
//!
//! The tools form a dependency chain managed by the caller, not the
//! server: `getCurrentLocation` produces `location`, which `getWeather`
//! requires; `getWeather` produces `condition`, which `orderFood`
//! requires. Each call is still an ordinary, independent `tools/call`
//! with no cross-call session state.

pub mod data;
mod food;
mod location;
mod weather;

use std::sync::Arc;

use crate::error::Result;
use crate::registry::ToolRegistry;
use data::WeatherTable;

/// Register the built-in tools against a shared weather table.
///
/// Registration order is the chain order, so `tools/list` reads as the
/// intended call sequence.
pub fn register_builtin_tools(registry: &mut ToolRegistry, table: Arc<WeatherTable>) -> Result<()> {
    registry.register(location::descriptor())?;
    registry.register(weather::descriptor(table.clone()))?;
    registry.register(food::descriptor(&table))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registration_order_is_chain_order() {
        let mut registry = ToolRegistry::new();
        register_builtin_tools(&mut registry, Arc::new(WeatherTable::demo()))
            .expect("register builtins");
        let names: Vec<&str> = registry.list_all().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["getCurrentLocation", "getWeather", "orderFood"]);
    }

    #[test]
    fn test_chain_fields_are_compatible() {
        // The edge between two tools is a shared field name with a
        // compatible type: location feeds weather, condition feeds food.
        let mut registry = ToolRegistry::new();
        register_builtin_tools(&mut registry, Arc::new(WeatherTable::demo()))
            .expect("register builtins");

        let location_out = registry
            .lookup("getCurrentLocation")
            .and_then(|t| t.output_schema.field("location"))
            .expect("location output field");
        let weather_in = registry
            .lookup("getWeather")
            .and_then(|t| t.input_schema.field("location"))
            .expect("location input field");
        assert!(location_out.field_type.is_compatible(&weather_in.field_type));

        let weather_out = registry
            .lookup("getWeather")
            .and_then(|t| t.output_schema.field("condition"))
            .expect("condition output field");
        let food_in = registry
            .lookup("orderFood")
            .and_then(|t| t.input_schema.field("condition"))
            .expect("condition input field");
        assert!(weather_out.field_type.is_compatible(&food_in.field_type));
        assert!(food_in.required);
    }
}
