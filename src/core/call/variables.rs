use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_NAME: &str = "default name";
pub const DEFAULT_CALLBACK_NUMBER: &str = "default callback number";
pub const DEFAULT_SPECIAL_REQUESTS: &str = "default notes";
pub const DEFAULT_PURPOSE: &str = "default purpose";
pub const DEFAULT_QUERY: &str = "default query";
pub const DEFAULT_TIME: &str = "default time";
pub const DEFAULT_PEOPLE: &str = "default people";
pub const DEFAULT_BUSINESS_NUMBER: &str = "default business number";

/// Caller-supplied fields for an outbound call
///
/// Keys follow the front end's camelCase names. Unknown keys are ignored and
/// `null` counts as absent. `people` accepts any JSON value because the front
/// end sends it either as a number or as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallFields {
    pub name: Option<String>,
    pub callback_number: Option<String>,
    pub special_requests: Option<String>,
    pub purpose: Option<String>,
    pub query: Option<String>,
    pub time: Option<String>,
    pub people: Option<Value>,
    pub business_number: Option<String>,
}

/// The eight dynamic variables substituted into the voice agent's script
///
/// Every slot is always present: either the caller's value or its default literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DynamicVariables {
    pub name: String,
    pub callback_number: String,
    pub special_requests: String,
    pub purpose: String,
    pub query: String,
    pub time: String,
    pub people: String,
    pub business_number: String,
}

impl Default for DynamicVariables {
    fn default() -> Self {
        Self::from(&CallFields::default())
    }
}

impl From<&CallFields> for DynamicVariables {
    fn from(fields: &CallFields) -> Self {
        fn or_default(value: &Option<String>, default: &str) -> String {
            value.clone().unwrap_or_else(|| default.to_string())
        }

        Self {
            name: or_default(&fields.name, DEFAULT_NAME),
            callback_number: or_default(&fields.callback_number, DEFAULT_CALLBACK_NUMBER),
            special_requests: or_default(&fields.special_requests, DEFAULT_SPECIAL_REQUESTS),
            purpose: or_default(&fields.purpose, DEFAULT_PURPOSE),
            query: or_default(&fields.query, DEFAULT_QUERY),
            time: or_default(&fields.time, DEFAULT_TIME),
            people: fields
                .people
                .as_ref()
                .map(people_text)
                .unwrap_or_else(|| DEFAULT_PEOPLE.to_string()),
            business_number: or_default(&fields.business_number, DEFAULT_BUSINESS_NUMBER),
        }
    }
}

/// Render a `people` value as text whatever its JSON type
fn people_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
