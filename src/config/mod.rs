//! Configuration module for the Agent Call Gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//! The configuration is split into logical submodules for maintainability.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use agent_call_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use validation::missing_call_settings;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
/// Origin of the Vite dev server that hosts the front end.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CHAT_TIMEOUT_SECONDS: u64 = 60;

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_CALL_TIMEOUT_SECONDS: u64 = 30;

/// TLS configuration for HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains everything the relay needs at runtime:
/// - Server settings (host, port, TLS)
/// - Security settings (CORS origin, rate limiting)
/// - Chat completion provider settings (OpenAI)
/// - Outbound call provider settings (ElevenLabs agent and phone number)
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: the local front-end dev origin
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,

    // Chat completion provider
    /// OpenAI API key used by the chat relay
    pub openai_api_key: Option<String>,
    /// Base URL of the chat completion API, without the `/chat/completions` suffix
    pub openai_base_url: String,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    pub chat_temperature: f32,
    pub chat_timeout_seconds: u64,

    // Outbound call provider
    /// ElevenLabs API key sent as `xi-api-key`
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    /// Conversational AI agent that handles the call
    pub agent_id: Option<String>,
    /// Identifier of the originating (Twilio) phone number registered with ElevenLabs
    pub phone_number_id: Option<String>,
    pub call_timeout_seconds: u64,
    /// Whether the call request's `system_prompt` is sent as an agent prompt override
    pub forward_system_prompt: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tls: None,
            cors_allowed_origins: Some(DEFAULT_CORS_ORIGIN.to_string()),
            rate_limit_requests_per_second: DEFAULT_RATE_LIMIT_RPS,
            rate_limit_burst_size: DEFAULT_RATE_LIMIT_BURST,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            chat_max_tokens: DEFAULT_CHAT_MAX_TOKENS,
            chat_temperature: DEFAULT_CHAT_TEMPERATURE,
            chat_timeout_seconds: DEFAULT_CHAT_TIMEOUT_SECONDS,
            elevenlabs_api_key: None,
            elevenlabs_base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
            agent_id: None,
            phone_number_id: None,
            call_timeout_seconds: DEFAULT_CALL_TIMEOUT_SECONDS,
            forward_system_prompt: false,
        }
    }
}

/// Zeroize the provider secrets when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.elevenlabs_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and defaults)
    ///
    /// The .env file is loaded in main.rs before this is called, so its values
    /// are visible here as ordinary environment variables.
    ///
    /// # Errors
    /// Returns an error if an environment variable has an invalid format or
    /// the resulting configuration fails validation.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// After loading and merging, performs validation on the final configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_base_url("OPENAI_BASE_URL", &self.openai_base_url)?;
        validation::validate_base_url("ELEVENLABS_BASE_URL", &self.elevenlabs_base_url)?;
        validation::validate_chat_parameters(self.chat_max_tokens, self.chat_temperature)?;
        validation::validate_timeout("CHAT_TIMEOUT_SECONDS", self.chat_timeout_seconds)?;
        validation::validate_timeout("CALL_TIMEOUT_SECONDS", self.call_timeout_seconds)?;
        validation::validate_rate_limit(
            self.rate_limit_requests_per_second,
            self.rate_limit_burst_size,
        )?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Full URL of the chat completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai_base_url.trim_end_matches('/'))
    }

    /// Full URL of the Twilio outbound-call endpoint
    pub fn outbound_call_url(&self) -> String {
        format!(
            "{}/v1/convai/twilio/outbound-call",
            self.elevenlabs_base_url.trim_end_matches('/')
        )
    }
}
