use url::Url;

use super::ServerConfig;

/// Validate that a provider base URL is an absolute http(s) URL
pub(crate) fn validate_base_url(
    name: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(value).map_err(|e| format!("Invalid {name} '{value}': {e}"))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "Invalid {name} '{value}': scheme must be http or https, got {scheme}"
        )
        .into()),
    }
}

/// Validate the fixed completion parameters sent with every chat request
pub(crate) fn validate_chat_parameters(
    max_tokens: u32,
    temperature: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    if max_tokens == 0 {
        return Err("CHAT_MAX_TOKENS must be greater than zero".into());
    }
    if !(0.0..=2.0).contains(&temperature) {
        return Err(format!("CHAT_TEMPERATURE must be between 0 and 2, got {temperature}").into());
    }
    Ok(())
}

pub(crate) fn validate_timeout(name: &str, seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    if seconds == 0 {
        return Err(format!("{name} must be greater than zero").into());
    }
    Ok(())
}

/// Both the sustained rate and the burst must allow at least one request
pub(crate) fn validate_rate_limit(
    requests_per_second: u32,
    burst_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if requests_per_second == 0 {
        return Err("RATE_LIMIT_REQUESTS_PER_SECOND must be greater than zero".into());
    }
    if burst_size == 0 {
        return Err("RATE_LIMIT_BURST_SIZE must be greater than zero".into());
    }
    Ok(())
}

/// List the outbound-call settings that are not configured
///
/// Missing settings do not prevent startup; the upstream provider rejects the
/// call and the rejection is relayed as a gateway error.
pub fn missing_call_settings(config: &ServerConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.elevenlabs_api_key.is_none() {
        missing.push("ELEVENLABS_API_KEY");
    }
    if config.agent_id.is_none() {
        missing.push("AGENT_ID");
    }
    if config.phone_number_id.is_none() {
        missing.push("PHONE_NUMBER_ID");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_accepts_http_and_https() {
        assert!(validate_base_url("OPENAI_BASE_URL", "https://api.openai.com/v1").is_ok());
        assert!(validate_base_url("OPENAI_BASE_URL", "http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_validate_base_url_rejects_other_schemes() {
        let err = validate_base_url("ELEVENLABS_BASE_URL", "ws://api.elevenlabs.io").unwrap_err();
        assert!(err.to_string().contains("scheme must be http or https"));
    }

    #[test]
    fn test_validate_base_url_rejects_relative() {
        assert!(validate_base_url("OPENAI_BASE_URL", "api.openai.com").is_err());
    }

    #[test]
    fn test_validate_chat_parameters() {
        assert!(validate_chat_parameters(150, 0.7).is_ok());
        assert!(validate_chat_parameters(0, 0.7).is_err());
        assert!(validate_chat_parameters(150, 2.5).is_err());
        assert!(validate_chat_parameters(150, -0.1).is_err());
    }

    #[test]
    fn test_validate_rate_limit() {
        assert!(validate_rate_limit(60, 10).is_ok());
        assert!(validate_rate_limit(0, 10).is_err());
        assert!(validate_rate_limit(60, 0).is_err());
    }

    #[test]
    fn test_missing_call_settings() {
        let mut config = ServerConfig::default();
        assert_eq!(
            missing_call_settings(&config),
            vec!["ELEVENLABS_API_KEY", "AGENT_ID", "PHONE_NUMBER_ID"]
        );

        config.elevenlabs_api_key = Some("xi".to_string());
        config.agent_id = Some("agent".to_string());
        assert_eq!(missing_call_settings(&config), vec!["PHONE_NUMBER_ID"]);
    }
}
