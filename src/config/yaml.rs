use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///   tls:
///     enabled: false
///     cert_path: "/etc/certs/cert.pem"
///     key_path: "/etc/certs/key.pem"
///
/// security:
///   cors_allowed_origins: "http://localhost:5173"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
///
/// openai:
///   api_key: "sk-..."
///   base_url: "https://api.openai.com/v1"
///   model: "gpt-3.5-turbo"
///   max_tokens: 150
///   temperature: 0.7
///   timeout_seconds: 60
///
/// elevenlabs:
///   api_key: "your-elevenlabs-key"
///   base_url: "https://api.elevenlabs.io"
///   agent_id: "agent_..."
///   phone_number_id: "phnum_..."
///   timeout_seconds: 30
///   forward_system_prompt: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub security: Option<SecurityYaml>,
    pub openai: Option<OpenAIYaml>,
    pub elevenlabs: Option<ElevenLabsYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// Comma-separated list of origins, or "*"
    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,
}

/// Chat completion provider settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenAIYaml {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

/// Outbound call provider settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ElevenLabsYaml {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub agent_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub forward_system_prompt: Option<bool>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
