use std::path::PathBuf;

use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{
    DEFAULT_CALL_TIMEOUT_SECONDS, DEFAULT_CHAT_MAX_TOKENS, DEFAULT_CHAT_MODEL,
    DEFAULT_CHAT_TEMPERATURE, DEFAULT_CHAT_TIMEOUT_SECONDS, DEFAULT_CORS_ORIGIN,
    DEFAULT_ELEVENLABS_BASE_URL, DEFAULT_HOST, DEFAULT_OPENAI_BASE_URL, DEFAULT_PORT,
    DEFAULT_RATE_LIMIT_BURST, DEFAULT_RATE_LIMIT_RPS, ServerConfig, TlsConfig,
};

/// Merge environment variables (base) with optional YAML overrides
///
/// Priority: YAML > ENV > defaults
pub(crate) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::from_env()?;
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let tls_yaml = server.tls.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();
    let openai = yaml.openai.unwrap_or_default();
    let elevenlabs = yaml.elevenlabs.unwrap_or_default();

    let tls = resolve_tls(
        tls_yaml.enabled.or(env.tls_enabled).unwrap_or(false),
        tls_yaml.cert_path.or(env.tls_cert_path),
        tls_yaml.key_path.or(env.tls_key_path),
    )?;

    Ok(ServerConfig {
        host: server
            .host
            .or(env.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server.port.or(env.port).unwrap_or(DEFAULT_PORT),
        tls,

        cors_allowed_origins: Some(
            security
                .cors_allowed_origins
                .or(env.cors_allowed_origins)
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        ),
        rate_limit_requests_per_second: security
            .rate_limit_requests_per_second
            .or(env.rate_limit_requests_per_second)
            .unwrap_or(DEFAULT_RATE_LIMIT_RPS),
        rate_limit_burst_size: security
            .rate_limit_burst_size
            .or(env.rate_limit_burst_size)
            .unwrap_or(DEFAULT_RATE_LIMIT_BURST),

        openai_api_key: non_empty(openai.api_key).or(env.openai_api_key),
        openai_base_url: non_empty(openai.base_url)
            .or(env.openai_base_url)
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        chat_model: non_empty(openai.model)
            .or(env.chat_model)
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        chat_max_tokens: openai
            .max_tokens
            .or(env.chat_max_tokens)
            .unwrap_or(DEFAULT_CHAT_MAX_TOKENS),
        chat_temperature: openai
            .temperature
            .or(env.chat_temperature)
            .unwrap_or(DEFAULT_CHAT_TEMPERATURE),
        chat_timeout_seconds: openai
            .timeout_seconds
            .or(env.chat_timeout_seconds)
            .unwrap_or(DEFAULT_CHAT_TIMEOUT_SECONDS),

        elevenlabs_api_key: non_empty(elevenlabs.api_key).or(env.elevenlabs_api_key),
        elevenlabs_base_url: non_empty(elevenlabs.base_url)
            .or(env.elevenlabs_base_url)
            .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
        agent_id: non_empty(elevenlabs.agent_id).or(env.agent_id),
        phone_number_id: non_empty(elevenlabs.phone_number_id).or(env.phone_number_id),
        call_timeout_seconds: elevenlabs
            .timeout_seconds
            .or(env.call_timeout_seconds)
            .unwrap_or(DEFAULT_CALL_TIMEOUT_SECONDS),
        forward_system_prompt: elevenlabs
            .forward_system_prompt
            .or(env.forward_system_prompt)
            .unwrap_or(false),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve_tls(
    enabled: bool,
    cert_path: Option<String>,
    key_path: Option<String>,
) -> Result<Option<TlsConfig>, Box<dyn std::error::Error>> {
    if !enabled {
        return Ok(None);
    }

    let cert_path =
        cert_path.ok_or("TLS is enabled but TLS_CERT_PATH (server.tls.cert_path) is not set")?;
    let key_path =
        key_path.ok_or("TLS is enabled but TLS_KEY_PATH (server.tls.key_path) is not set")?;

    Ok(Some(TlsConfig {
        cert_path: PathBuf::from(cert_path),
        key_path: PathBuf::from(key_path),
    }))
}
