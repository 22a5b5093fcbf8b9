//! Two-stage workflow
//!
//! Drives the discovery agent over the seeded log, threads its output into
//! the consumption agent as side-channel context, and returns the final
//! answer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::agent::definition::{self, AgentDefinition, RunContext};
use crate::agent::log::ConversationLog;
use crate::core::{Config, Result, ScoutError, Stage, TraceMetadata};
use crate::runner::Runner;

/// Progress of one workflow invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Start,
    DiscoveryRunning,
    DiscoveryDone,
    ConsumptionRunning,
    ConsumptionDone,
    Failed,
}

/// Final answer of a workflow invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutput {
    pub output_text: String,
}

/// Full outcome of a workflow invocation, including the accumulated log and
/// the captured API documentation
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub output: WorkflowOutput,
    pub log: ConversationLog,
    pub api_docs: String,
}

/// Executes the discovery and consumption agents in sequence against a
/// shared conversation log.
///
/// Definitions are immutable and shared; each invocation owns its log and
/// side-channel context, so independent invocations never interfere.
pub struct Workflow {
    runner: Arc<dyn Runner>,
    discovery: Arc<AgentDefinition>,
    consumption: Arc<AgentDefinition>,
}

impl Workflow {
    /// Create a workflow over explicit definitions
    pub fn new(
        runner: Arc<dyn Runner>,
        discovery: AgentDefinition,
        consumption: AgentDefinition,
    ) -> Self {
        Self {
            runner,
            discovery: Arc::new(discovery),
            consumption: Arc::new(consumption),
        }
    }

    /// Create a workflow with the standard discovery and consumption agents
    pub fn from_config(config: &Config, runner: Arc<dyn Runner>) -> Result<Self> {
        Ok(Self::new(
            runner,
            definition::api_master(config),
            definition::consumer(config)?,
        ))
    }

    /// Run the workflow and return the final answer
    pub async fn run(&self, input: &str) -> Result<WorkflowOutput> {
        self.run_detailed(input).await.map(|report| report.output)
    }

    /// Run the workflow, aborting with `Cancelled` when the token fires.
    ///
    /// Cancellation drops the in-flight runner future, so a workflow stuck
    /// waiting on a pending remote approval stops polling immediately.
    pub async fn run_with_cancel(
        &self,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<WorkflowOutput> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ScoutError::Cancelled),
            result = self.run(input) => result,
        }
    }

    /// Run the workflow and return the answer together with the accumulated
    /// log and the discovered API documentation
    pub async fn run_detailed(&self, input: &str) -> Result<WorkflowReport> {
        let input = validate_input(input)?;

        let trace = TraceMetadata::new();
        let mut state = WorkflowState::Start;
        info!(workflow_id = %trace.workflow_id, "starting workflow");

        let mut log = ConversationLog::seed(input);
        let ctx = RunContext::new(trace.clone());

        // Discovery stage
        advance(&mut state, WorkflowState::DiscoveryRunning);
        let discovery_result = match self.runner.run(&self.discovery, &log, &ctx).await {
            Ok(result) => result,
            Err(e) => {
                advance(&mut state, WorkflowState::Failed);
                return Err(e);
            }
        };
        log.append(discovery_result.new_items);

        let api_docs = match discovery_result.final_output {
            Some(text) => text,
            None => {
                advance(&mut state, WorkflowState::Failed);
                return Err(ScoutError::MissingOutput(Stage::Discovery));
            }
        };
        advance(&mut state, WorkflowState::DiscoveryDone);
        debug!(
            workflow_id = %trace.workflow_id,
            docs_len = api_docs.len(),
            "captured API documentation"
        );

        // Consumption stage, with the documentation as side-channel context
        let ctx = ctx.with_api_docs(api_docs.clone());
        advance(&mut state, WorkflowState::ConsumptionRunning);
        let consumption_result = match self.runner.run(&self.consumption, &log, &ctx).await {
            Ok(result) => result,
            Err(e) => {
                advance(&mut state, WorkflowState::Failed);
                return Err(e);
            }
        };
        log.append(consumption_result.new_items);

        let output_text = match consumption_result.final_output {
            Some(text) => text,
            None => {
                advance(&mut state, WorkflowState::Failed);
                return Err(ScoutError::MissingOutput(Stage::Consumption));
            }
        };
        advance(&mut state, WorkflowState::ConsumptionDone);
        info!(workflow_id = %trace.workflow_id, items = log.len(), "workflow complete");

        Ok(WorkflowReport {
            output: WorkflowOutput { output_text },
            log,
            api_docs,
        })
    }
}

fn advance(state: &mut WorkflowState, next: WorkflowState) {
    debug!(from = ?state, to = ?next, "workflow transition");
    *state = next;
}

fn validate_input(input: &str) -> Result<&str> {
    if input.trim().is_empty() {
        return Err(ScoutError::invalid_input(
            "workflow input must not be empty or whitespace-only",
        ));
    }
    Ok(input)
}
