//! Runner trait for abstracting the execution backend
//!
//! The workflow depends only on this boundary, so it runs unchanged against
//! the hosted gateway or a scripted stub in tests.

use async_trait::async_trait;

use crate::agent::{AgentDefinition, ConversationLog, RunContext};
use crate::core::{Result, RunResult};

/// Executes one agent invocation to completion or failure
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run the definition over a snapshot of the log.
    ///
    /// Returns the items produced during the run (appended to the log by the
    /// caller) and the final output. The final output may be absent even on a
    /// clean return; callers must treat that as a checked condition, not as
    /// success.
    async fn run(
        &self,
        definition: &AgentDefinition,
        log: &ConversationLog,
        ctx: &RunContext,
    ) -> Result<RunResult>;

    /// Name of this runner backend
    fn name(&self) -> &str;
}
