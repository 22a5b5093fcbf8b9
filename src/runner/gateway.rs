//! Gateway runner implementation
//!
//! Async HTTP client for the hosted agent-execution service. A run is created
//! with one POST and then polled until it reaches a terminal status. Approval
//! gates inside the service show up as a `pending_approval` status and are
//! resolved out-of-band; this client just keeps polling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agent::{AgentDefinition, ConversationLog, ModelSettings, RunContext};
use crate::core::{Config, MessageItem, Result, RunResult, ScoutError, TraceMetadata};
use crate::runner::traits::Runner;
use crate::tools::ToolBinding;

/// Agent-execution gateway client
#[derive(Clone)]
pub struct GatewayRunner {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_interval: Duration,
    max_polls: u32,
}

/// Create-run request body
#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    agent: AgentSpec<'a>,
    input: &'a [MessageItem],
    metadata: &'a TraceMetadata,
}

/// Agent description sent to the service
#[derive(Debug, Serialize)]
struct AgentSpec<'a> {
    name: &'a str,
    instructions: String,
    model: &'a str,
    tools: &'a [ToolBinding],
    settings: &'a ModelSettings,
}

/// Create-run response
#[derive(Debug, Deserialize)]
struct CreateRunResponse {
    id: String,
}

/// Run status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RunStatus {
    Queued,
    InProgress,
    /// A gated tool call is awaiting out-of-band approval. Not terminal and
    /// not an error; the service resolves it before completing the run.
    PendingApproval,
    Completed,
    Failed,
}

impl RunStatus {
    fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

/// Poll response for one run
#[derive(Debug, Deserialize)]
struct RunStatusResponse {
    status: RunStatus,
    #[serde(default)]
    new_items: Vec<MessageItem>,
    #[serde(default)]
    final_output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GatewayRunner {
    /// Create a runner from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gateway.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.gateway.base_url.clone(),
            api_key: config.gateway_api_key(),
            poll_interval: Duration::from_millis(config.gateway.poll_interval_ms),
            max_polls: config.gateway.max_polls,
        }
    }

    /// Create a runner with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
            poll_interval: Duration::from_millis(750),
            max_polls: 400,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn create_run(
        &self,
        definition: &AgentDefinition,
        log: &ConversationLog,
        ctx: &RunContext,
    ) -> Result<String> {
        // Computed instructions are rendered against the current context
        // immediately before the run is created
        let request = CreateRunRequest {
            agent: AgentSpec {
                name: definition.name(),
                instructions: definition.instructions().render(ctx),
                model: definition.model(),
                tools: definition.tools(),
                settings: definition.settings(),
            },
            input: log.items(),
            metadata: &ctx.trace,
        };

        let response = self
            .authorize(self.client.post(format!("{}/v1/runs", self.base_url)))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ScoutError::gateway(format!(
                        "cannot connect to execution service at {}",
                        self.base_url
                    ))
                } else {
                    ScoutError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoutError::gateway(format!(
                "create run failed with {}: {}",
                status, error_text
            )));
        }

        let created: CreateRunResponse = response.json().await?;
        debug!(run_id = %created.id, agent = definition.name(), "run created");
        Ok(created.id)
    }

    async fn poll_run(&self, run_id: &str) -> Result<RunStatusResponse> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/v1/runs/{}", self.base_url, run_id)),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoutError::gateway(format!(
                "poll of run {} failed with {}: {}",
                run_id, status, error_text
            )));
        }

        Ok(response.json().await?)
    }

    async fn wait_for_terminal(&self, run_id: &str) -> Result<RunStatusResponse> {
        let mut approval_seen = false;

        for poll in 0..self.max_polls {
            let status = self.poll_run(run_id).await?;

            if status.status.is_terminal() {
                return Ok(status);
            }

            if status.status == RunStatus::PendingApproval && !approval_seen {
                approval_seen = true;
                info!(run_id, "run is awaiting tool-call approval");
            }

            debug!(run_id, poll, status = ?status.status, "run not terminal yet");
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(ScoutError::gateway(format!(
            "run {} did not reach a terminal status after {} polls",
            run_id, self.max_polls
        )))
    }
}

#[async_trait]
impl Runner for GatewayRunner {
    async fn run(
        &self,
        definition: &AgentDefinition,
        log: &ConversationLog,
        ctx: &RunContext,
    ) -> Result<RunResult> {
        let run_id = self.create_run(definition, log, ctx).await?;
        let terminal = self.wait_for_terminal(&run_id).await?;

        match terminal.status {
            RunStatus::Failed => Err(ScoutError::gateway(
                terminal
                    .error
                    .unwrap_or_else(|| format!("run {} failed without detail", run_id)),
            )),
            _ => Ok(RunResult {
                new_items: terminal.new_items,
                final_output: terminal.final_output,
            }),
        }
    }

    fn name(&self) -> &str {
        "gateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{api_master, RunContext};

    #[test]
    fn test_status_decoding() {
        let json = r#"{"status":"pending_approval"}"#;
        let response: RunStatusResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.status, RunStatus::PendingApproval);
        assert!(!response.status.is_terminal());
        assert!(response.new_items.is_empty());
        assert!(response.final_output.is_none());
    }

    #[test]
    fn test_completed_status_carries_result() {
        let json = r#"{
            "status": "completed",
            "new_items": [
                {"role": "assistant", "content": [{"type": "output_text", "text": "done"}]}
            ],
            "final_output": "done"
        }"#;
        let response: RunStatusResponse = serde_json::from_str(json).unwrap();

        assert!(response.status.is_terminal());
        assert_eq!(response.new_items.len(), 1);
        assert_eq!(response.final_output.as_deref(), Some("done"));
    }

    #[test]
    fn test_create_request_serialization() {
        let config = Config::default();
        let definition = api_master(&config);
        let log = ConversationLog::seed("What's the weather in Paris?");
        let ctx = RunContext::new(TraceMetadata::new());

        let request = CreateRunRequest {
            agent: AgentSpec {
                name: definition.name(),
                instructions: definition.instructions().render(&ctx),
                model: definition.model(),
                tools: definition.tools(),
                settings: definition.settings(),
            },
            input: log.items(),
            metadata: &ctx.trace,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["agent"]["name"], "API MASTER");
        assert_eq!(json["agent"]["tools"][0]["type"], "web_search");
        assert_eq!(json["agent"]["settings"]["reasoning_effort"], "low");
        assert_eq!(json["input"][0]["role"], "user");
        assert_eq!(json["metadata"]["source"], "apiscout");
    }
}
