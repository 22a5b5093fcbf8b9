//! Tool bindings
//!
//! Declarative descriptors of the capabilities an agent may invoke. Both
//! variants are opaque to the orchestration layer: they are serialized into
//! the run request and executed remotely by the execution service.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use crate::core::config::{RemoteConfig, SearchConfig};
use crate::core::error::{Result, ScoutError};

/// How much context the search provider gathers per query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    Small,
    Medium,
    Large,
}

/// How precisely the user's location is shared with the search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationScope {
    Approximate,
    Precise,
}

/// Whether remote-procedure calls require out-of-band approval.
///
/// Under `Always`, every call waits on an approval step inside the gateway;
/// the run surfaces this as a `pending_approval` status, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalPolicy {
    Always,
    Never,
    Conditional,
}

/// Secret authorizing calls through the remote gateway.
///
/// Resolved from the environment, never stored in config files, and redacted
/// in `Debug`/`Display` output. The raw value is only exposed when the binding
/// is serialized into a run request for the execution service.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Read the secret from the named environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(ScoutError::config(format!(
                "credential environment variable {} is not set",
                var
            ))),
        }
    }

    /// The raw secret value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted>")
    }
}

fn serialize_credential<S: Serializer>(
    credential: &Credential,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(credential.expose())
}

/// A capability an agent may invoke during a run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolBinding {
    /// Web search; may silently degrade per the external provider
    WebSearch {
        context_size: SearchContextSize,
        location: LocationScope,
    },
    /// Remote procedure calls through an approval-gated gateway
    RemoteGateway {
        provider_label: String,
        allowed_operations: Vec<String>,
        #[serde(serialize_with = "serialize_credential")]
        credential: Credential,
        approval: ApprovalPolicy,
        endpoint: Url,
    },
}

impl ToolBinding {
    /// Build a web-search binding from configuration
    pub fn web_search(config: &SearchConfig) -> Self {
        Self::WebSearch {
            context_size: config.context_size,
            location: config.location,
        }
    }

    /// Build a remote-gateway binding from configuration.
    ///
    /// Fails at build time when the endpoint is not a valid URL or the
    /// credential is missing from the environment, so a misconfigured gateway
    /// is caught before any run is created.
    pub fn remote_gateway(config: &RemoteConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ScoutError::config(format!(
                "invalid gateway endpoint {}: {}",
                config.endpoint, e
            ))
        })?;

        Ok(Self::RemoteGateway {
            provider_label: config.provider_label.clone(),
            allowed_operations: config.allowed_operations.clone(),
            credential: Credential::from_env(&config.credential_env)?,
            approval: config.approval,
            endpoint,
        })
    }

    /// Wire name of this binding
    pub fn name(&self) -> &'static str {
        match self {
            ToolBinding::WebSearch { .. } => "web_search",
            ToolBinding::RemoteGateway { .. } => "remote_gateway",
        }
    }
}
