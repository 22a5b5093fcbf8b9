//! Shared types used across apiscout modules
//!
//! Contains message items, run results, and trace metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message item's author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

/// Kind of a typed content part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    InputText,
    OutputText,
    ReasoningSummary,
    /// Anything the execution service produces that we do not model
    #[serde(other)]
    Unknown,
}

/// One typed part of a message item's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentPart {
    /// Create an `input_text` part
    pub fn input_text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::InputText,
            text: Some(text.into()),
        }
    }

    /// Create an `output_text` part
    pub fn output_text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::OutputText,
            text: Some(text.into()),
        }
    }
}

/// One turn of conversation: the user's input or an agent-produced item.
/// Items are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageItem {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl MessageItem {
    /// Create a user message with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentPart::input_text(text)],
        }
    }

    /// Create an assistant message with a single text part
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentPart::output_text(text)],
        }
    }

    /// Concatenated text of all parts that carry text
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Outcome of one runner invocation: the items produced during the run
/// (appended to the log by the caller) and the final output, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunResult {
    pub new_items: Vec<MessageItem>,
    pub final_output: Option<String>,
}

/// Reasoning effort requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

/// How reasoning summaries are reported by the execution service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Auto,
    Concise,
    Detailed,
}

/// Observability tags attached to every gateway request.
/// Not part of the functional contract; the service records them per run.
#[derive(Debug, Clone, Serialize)]
pub struct TraceMetadata {
    pub workflow_id: Uuid,
    pub source: &'static str,
}

impl TraceMetadata {
    /// Fresh metadata for one workflow invocation
    pub fn new() -> Self {
        Self {
            workflow_id: Uuid::new_v4(),
            source: "apiscout",
        }
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_item_shape() {
        let item = MessageItem::user("What's the weather in Paris?");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "input_text");
        assert_eq!(json["content"][0]["text"], "What's the weather in Paris?");
    }

    #[test]
    fn test_unknown_content_kind_decodes() {
        let json = r#"{"role":"assistant","content":[{"type":"web_search_call"}]}"#;
        let item: MessageItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.content[0].kind, ContentKind::Unknown);
        assert_eq!(item.text(), "");
    }

    #[test]
    fn test_item_text_concatenates_parts() {
        let item = MessageItem {
            role: Role::Assistant,
            content: vec![
                ContentPart::output_text("It is "),
                ContentPart::output_text("18°C"),
            ],
        };
        assert_eq!(item.text(), "It is 18°C");
    }

    #[test]
    fn test_trace_metadata_ids_are_unique() {
        let a = TraceMetadata::new();
        let b = TraceMetadata::new();
        assert_ne!(a.workflow_id, b.workflow_id);
        assert_eq!(a.source, "apiscout");
    }
}
