use super::utils::{env_bool, env_parse, env_string};

/// Configuration values read from environment variables
///
/// Every field is optional; defaults are applied in `merge`.
#[derive(Debug, Default)]
pub(crate) struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,

    pub tls_enabled: Option<bool>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,

    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,

    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub chat_model: Option<String>,
    pub chat_max_tokens: Option<u32>,
    pub chat_temperature: Option<f32>,
    pub chat_timeout_seconds: Option<u64>,

    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: Option<String>,
    pub agent_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub call_timeout_seconds: Option<u64>,
    pub forward_system_prompt: Option<bool>,
}

impl EnvConfig {
    pub(crate) fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            host: env_string("HOST"),
            port: env_parse("PORT")?,

            tls_enabled: env_bool("TLS_ENABLED")?,
            tls_cert_path: env_string("TLS_CERT_PATH"),
            tls_key_path: env_string("TLS_KEY_PATH"),

            cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS"),
            rate_limit_requests_per_second: env_parse("RATE_LIMIT_REQUESTS_PER_SECOND")?,
            rate_limit_burst_size: env_parse("RATE_LIMIT_BURST_SIZE")?,

            openai_api_key: env_string("OPENAI_API_KEY"),
            openai_base_url: env_string("OPENAI_BASE_URL"),
            chat_model: env_string("CHAT_MODEL"),
            chat_max_tokens: env_parse("CHAT_MAX_TOKENS")?,
            chat_temperature: env_parse("CHAT_TEMPERATURE")?,
            chat_timeout_seconds: env_parse("CHAT_TIMEOUT_SECONDS")?,

            elevenlabs_api_key: env_string("ELEVENLABS_API_KEY"),
            elevenlabs_base_url: env_string("ELEVENLABS_BASE_URL"),
            agent_id: env_string("AGENT_ID"),
            phone_number_id: env_string("PHONE_NUMBER_ID"),
            call_timeout_seconds: env_parse("CALL_TIMEOUT_SECONDS")?,
            forward_system_prompt: env_bool("FORWARD_SYSTEM_PROMPT")?,
        })
    }
}
