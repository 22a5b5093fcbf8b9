//! Agent definitions
//!
//! Immutable, declarative configuration for the two reasoning units. A
//! definition is constructed once from config and shared by reference; no
//! component mutates it afterwards.

use std::fmt;

use serde::Serialize;

use crate::core::{Config, ReasoningEffort, Result, SummaryMode, TraceMetadata};
use crate::tools::ToolBinding;

/// Data available to an agent run outside the conversation log
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Discovery-stage output, injected into the consumption agent's
    /// instructions. Absent for the discovery stage itself.
    pub api_docs: Option<String>,
    /// Observability tags for the execution service
    pub trace: TraceMetadata,
}

impl RunContext {
    /// Context for a run with no side-channel data
    pub fn new(trace: TraceMetadata) -> Self {
        Self {
            api_docs: None,
            trace,
        }
    }

    /// Attach discovered API documentation
    pub fn with_api_docs(mut self, docs: impl Into<String>) -> Self {
        self.api_docs = Some(docs.into());
        self
    }
}

/// Agent instructions: a literal string, or a function of the run context.
///
/// Computed instructions are plain `fn` pointers, so they cannot capture
/// state and stay a pure function of their declared inputs. They are rendered
/// immediately before each run.
#[derive(Clone)]
pub enum Instructions {
    Static(String),
    Computed(fn(&RunContext) -> String),
}

impl Instructions {
    /// Render the instructions against the current run context
    pub fn render(&self, ctx: &RunContext) -> String {
        match self {
            Instructions::Static(text) => text.clone(),
            Instructions::Computed(template) => template(ctx),
        }
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instructions::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Instructions::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<&str> for Instructions {
    fn from(text: &str) -> Self {
        Instructions::Static(text.to_string())
    }
}

/// Model-level settings for an agent run
#[derive(Debug, Clone, Serialize)]
pub struct ModelSettings {
    pub reasoning_effort: ReasoningEffort,
    pub summary: SummaryMode,
    pub persist_run: bool,
}

impl ModelSettings {
    /// Settings shared by both agents, taken from config
    pub fn from_config(config: &Config) -> Self {
        Self {
            reasoning_effort: config.workflow.reasoning_effort,
            summary: config.workflow.summary,
            persist_run: config.workflow.persist_runs,
        }
    }
}

/// Declarative configuration of one callable reasoning unit
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    name: String,
    instructions: Instructions,
    model: String,
    tools: Vec<ToolBinding>,
    settings: ModelSettings,
}

impl AgentDefinition {
    /// Create a builder for this definition
    pub fn builder(name: impl Into<String>) -> AgentDefinitionBuilder {
        AgentDefinitionBuilder::new(name)
    }

    /// Name of this agent
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The instructions template
    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Tools this agent may invoke
    pub fn tools(&self) -> &[ToolBinding] {
        &self.tools
    }

    /// Model-level settings
    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }
}

/// Builder for creating agent definitions
pub struct AgentDefinitionBuilder {
    name: String,
    instructions: Option<Instructions>,
    model: Option<String>,
    tools: Vec<ToolBinding>,
    settings: Option<ModelSettings>,
}

impl AgentDefinitionBuilder {
    /// Create a new builder with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: None,
            model: None,
            tools: Vec::new(),
            settings: None,
        }
    }

    /// Set the instructions
    pub fn instructions(mut self, instructions: impl Into<Instructions>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set computed instructions
    pub fn computed_instructions(mut self, template: fn(&RunContext) -> String) -> Self {
        self.instructions = Some(Instructions::Computed(template));
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add a tool binding
    pub fn tool(mut self, tool: ToolBinding) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set the model settings
    pub fn settings(mut self, settings: ModelSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the definition
    pub fn build(self) -> AgentDefinition {
        AgentDefinition {
            name: self.name,
            instructions: self
                .instructions
                .unwrap_or_else(|| Instructions::Static("You are a helpful assistant.".into())),
            model: self.model.unwrap_or_else(|| "gpt-5".to_string()),
            tools: self.tools,
            settings: self.settings.unwrap_or_else(|| ModelSettings {
                reasoning_effort: ReasoningEffort::Low,
                summary: SummaryMode::Auto,
                persist_run: true,
            }),
        }
    }
}

impl From<String> for Instructions {
    fn from(text: String) -> Self {
        Instructions::Static(text)
    }
}

/// The discovery agent: searches the web for a usable free API and writes
/// short documentation for it.
pub fn api_master(config: &Config) -> AgentDefinition {
    AgentDefinition::builder("API MASTER")
        .instructions(
            "You are a helpful assistant. Your job is to search the web for an open and \
             free-to-use API to get the data the user wants. You will then create short, \
             concise documentation on how the API works and how to call it correctly.",
        )
        .model(&config.models.discovery)
        .tool(ToolBinding::web_search(&config.search))
        .settings(ModelSettings::from_config(config))
        .build()
}

fn consumer_instructions(ctx: &RunContext) -> String {
    let docs = ctx.api_docs.as_deref().unwrap_or_default();
    format!(
        "Your job is to use the below documented API to return an answer to the user's question. {}",
        docs
    )
}

/// The consumption agent: answers the user's question by calling the
/// documented API through the remote gateway.
///
/// Fails when the gateway credential or endpoint is misconfigured.
pub fn consumer(config: &Config) -> Result<AgentDefinition> {
    Ok(AgentDefinition::builder("Agent")
        .computed_instructions(consumer_instructions)
        .model(&config.models.consumption)
        .tool(ToolBinding::remote_gateway(&config.remote)?)
        .settings(ModelSettings::from_config(config))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let definition = AgentDefinition::builder("test_agent")
            .instructions("You are a test agent")
            .model("test-model")
            .build();

        assert_eq!(definition.name(), "test_agent");
        assert_eq!(definition.model(), "test-model");
        assert!(definition.tools().is_empty());
    }

    #[test]
    fn test_static_instructions_ignore_context() {
        let instructions = Instructions::from("fixed text");
        let ctx = RunContext::new(TraceMetadata::new()).with_api_docs("docs");

        assert_eq!(instructions.render(&ctx), "fixed text");
    }

    #[test]
    fn test_computed_instructions_inject_docs() {
        let ctx = RunContext::new(TraceMetadata::new())
            .with_api_docs("GET api.weather.example/v1?city=<name>");

        let rendered = consumer_instructions(&ctx);
        assert!(rendered.contains("GET api.weather.example/v1?city=<name>"));
        assert!(rendered.starts_with("Your job is to use the below documented API"));
    }

    #[test]
    fn test_computed_instructions_without_docs() {
        let ctx = RunContext::new(TraceMetadata::new());
        let rendered = consumer_instructions(&ctx);

        // No docs yet: the template still renders, with nothing appended
        assert!(rendered.ends_with("question. "));
    }

    #[test]
    fn test_api_master_from_config() {
        let config = Config::default();
        let definition = api_master(&config);

        assert_eq!(definition.name(), "API MASTER");
        assert_eq!(definition.model(), config.models.discovery);
        assert_eq!(definition.tools().len(), 1);
        assert_eq!(definition.tools()[0].name(), "web_search");
    }

    #[test]
    fn test_consumer_requires_credential() {
        let mut config = Config::default();
        config.remote.credential_env = "APISCOUT_TEST_MISSING_CRED".to_string();

        assert!(consumer(&config).is_err());
    }
}
