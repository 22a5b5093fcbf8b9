//! apiscout - Two-Stage API Discovery Agent Workflow
//!
//! Answers a user's question by first asking a discovery agent to find and
//! document a free public API, then feeding that documentation to a
//! consumption agent that calls the API through a remote gateway. Both agent
//! runs execute on a hosted agent-execution service; this crate is the
//! orchestration layer between them.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Agent**: Agent definitions, conversation log, and the workflow
//! - **Tools**: Declarative tool bindings (web search, remote gateway)
//! - **Runner**: Execution backend abstraction with the gateway client
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apiscout::{Config, GatewayRunner, Workflow};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let runner = Arc::new(GatewayRunner::from_config(&config));
//!     let workflow = Workflow::from_config(&config, runner).unwrap();
//!
//!     let output = workflow.run("What's the weather in Paris?").await.unwrap();
//!     println!("{}", output.output_text);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod runner;
pub mod tools;

// Re-export commonly used items
pub use agent::{Workflow, WorkflowOutput};
pub use cli::Repl;
pub use core::{Config, Result, ScoutError};
pub use runner::{GatewayRunner, Runner};
