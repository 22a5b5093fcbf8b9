//! Agent module - definitions, conversation log, and the workflow
//!
//! Contains the two agent definitions and the orchestration logic that
//! threads one run's output into the next.

pub mod definition;
pub mod log;
pub mod workflow;

pub use definition::{
    api_master, consumer, AgentDefinition, AgentDefinitionBuilder, Instructions, ModelSettings,
    RunContext,
};
pub use log::ConversationLog;
pub use workflow::{Workflow, WorkflowOutput, WorkflowReport, WorkflowState};
