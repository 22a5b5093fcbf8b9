//! Configuration management for apiscout
//!
//! Supports environment variables, config files, and runtime overrides.
//! Priority: CLI args > env vars > config file > defaults.
//!
//! Config file location: ~/.config/apiscout/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, ScoutError};
use crate::core::types::{ReasoningEffort, SummaryMode};
use crate::tools::{ApprovalPolicy, LocationScope, SearchContextSize};

/// Main configuration for apiscout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Agent-execution gateway configuration
    pub gateway: GatewayConfig,
    /// Model configuration
    pub models: ModelConfig,
    /// Web-search tool configuration
    pub search: SearchConfig,
    /// Remote-procedure tool configuration
    pub remote: RemoteConfig,
    /// Workflow behavior configuration
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Agent-execution gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the execution service
    pub base_url: String,
    /// Name of the env var holding the service API key (optional at runtime)
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Delay between run-status polls in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum status polls before a run is abandoned
    pub max_polls: u32,
}

/// Model configuration - one model per stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model used by the discovery agent
    pub discovery: String,
    /// Model used by the consumption agent
    pub consumption: String,
}

/// Web-search tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How much search context the provider gathers per query
    pub context_size: SearchContextSize,
    /// How precisely the user's location is shared with the provider
    pub location: LocationScope,
}

/// Remote-procedure tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Label identifying the provider behind the gateway
    pub provider_label: String,
    /// Operation names the agent is allowed to invoke
    pub allowed_operations: Vec<String>,
    /// Gateway endpoint URL
    pub endpoint: String,
    /// Name of the env var holding the gateway credential.
    /// The credential itself is never written to the config file.
    pub credential_env: String,
    /// Whether calls require out-of-band approval
    pub approval: ApprovalPolicy,
}

/// Workflow behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Reasoning effort requested for both agents
    pub reasoning_effort: ReasoningEffort,
    /// How reasoning summaries are reported
    pub summary: SummaryMode,
    /// Whether the execution service persists runs
    pub persist_runs: bool,
    /// Whether to show debug output
    pub debug: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("APISCOUT_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            api_key_env: "APISCOUT_API_KEY".to_string(),
            timeout_secs: 120,
            poll_interval_ms: 750,
            max_polls: 400,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            discovery: env::var("APISCOUT_DISCOVERY_MODEL")
                .unwrap_or_else(|_| "gpt-5".to_string()),
            consumption: env::var("APISCOUT_CONSUMPTION_MODEL")
                .unwrap_or_else(|_| "gpt-5".to_string()),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_size: SearchContextSize::Medium,
            location: LocationScope::Approximate,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            provider_label: "zapier".to_string(),
            allowed_operations: vec!["webhooks_by_zapier_get".to_string()],
            endpoint: "https://mcp.zapier.com/api/mcp/mcp".to_string(),
            credential_env: "APISCOUT_REMOTE_CREDENTIAL".to_string(),
            approval: ApprovalPolicy::Always,
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            reasoning_effort: ReasoningEffort::Low,
            summary: SummaryMode::Auto,
            persist_runs: true,
            debug: env::var("APISCOUT_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("apiscout")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(ScoutError::config("config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ScoutError::config(format!("failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ScoutError::config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| ScoutError::config(format!("failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScoutError::config(format!("failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| ScoutError::config(format!("failed to write config: {}", e)))?;

        Ok(())
    }

    /// Save configuration and return the path
    pub fn save_and_get_path(&self) -> Result<PathBuf> {
        self.save()?;
        Ok(Self::config_file())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Resolve the execution-service API key, if configured in the environment
    pub fn gateway_api_key(&self) -> Option<String> {
        env::var(&self.gateway.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    /// Update the discovery model
    pub fn set_discovery_model(&mut self, model: impl Into<String>) {
        self.models.discovery = model.into();
    }

    /// Update the consumption model
    pub fn set_consumption_model(&mut self, model: impl Into<String>) {
        self.models.consumption = model.into();
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        toml::to_string_pretty(&Config::default())
            .unwrap_or_else(|_| String::from("# error generating config"))
    }
}
