//! Tools module - declared agent capabilities
//!
//! Contains the tool binding descriptors serialized into run requests.

pub mod bindings;

pub use bindings::{ApprovalPolicy, Credential, LocationScope, SearchContextSize, ToolBinding};
