//! repurpose-common — Shared errors, configuration and the sandboxed HTTP
//! client used across all Repurpose crates.

pub mod error;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::{ClinicalConfig, EngineConfig, ReportConfig, ServerConfig};
pub use error::{ApiError, RepurposeError, Result};
