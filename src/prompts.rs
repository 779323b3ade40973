//! Built-in prompt templates

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::registry::{PromptArgument, PromptDescriptor, PromptMessage, PromptRegistry};

/// Pull a string argument out of a prompt argument map, defaulting to the
/// empty string when absent or not a string.
fn str_arg<'a>(args: &'a Map<String, Value>, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn weather_food_guide() -> PromptDescriptor {
    PromptDescriptor {
        name: "weather_food_guide".to_string(),
        description: "Guided walk through the weather-and-food tool chain for a location"
            .to_string(),
        arguments: vec![PromptArgument {
            name: "location".to_string(),
            description: "City to check the weather for".to_string(),
            required: true,
        }],
        renderer: Arc::new(|args| {
            let location = str_arg(args, "location");
            vec![PromptMessage::user(format!(
                "I'm at {location}. Can you help me:\n\
                 1. Check the current weather\n\
                 2. Recommend food based on the weather\n\
                 3. Make it fun and entertaining!"
            ))]
        }),
    }
}

fn quick_weather_check() -> PromptDescriptor {
    PromptDescriptor {
        name: "quick_weather_check".to_string(),
        description: "One-line weather question for a location".to_string(),
        arguments: vec![PromptArgument {
            name: "location".to_string(),
            description: "City to check the weather for".to_string(),
            required: true,
        }],
        renderer: Arc::new(|args| {
            let location = str_arg(args, "location");
            vec![PromptMessage::user(format!(
                "What's the weather like in {location}?"
            ))]
        }),
    }
}

pub fn register_builtin_prompts(registry: &mut PromptRegistry) -> Result<()> {
    registry.register(weather_food_guide())?;
    registry.register(quick_weather_check())?;
    Ok(())
}
