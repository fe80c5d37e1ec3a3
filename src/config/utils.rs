use std::fmt::Display;
use std::str::FromStr;

/// Read an environment variable, treating unset and blank values the same.
pub(crate) fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse an environment variable.
///
/// Returns `Ok(None)` when the variable is unset or blank.
pub(crate) fn env_parse<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: Display,
{
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid {name} value '{raw}': {e}").into()),
        None => Ok(None),
    }
}

/// Read a boolean environment variable (`true/false`, `1/0`, `yes/no`, `on/off`).
pub(crate) fn env_bool(name: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match env_string(name) {
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| format!("Invalid {name} value '{raw}': expected a boolean").into()),
        None => Ok(None),
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
