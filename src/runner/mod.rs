//! Runner module - execution backends
//!
//! Provides the runner abstraction with the hosted gateway as the primary
//! implementation.

pub mod gateway;
pub mod traits;

pub use gateway::GatewayRunner;
pub use traits::Runner;
