//! repurpose-web — HTTP API for the repurposing engine.
//!   - Health check
//!   - JSON report per drug
//!   - PDF report download

pub mod router;
pub mod handlers;
pub mod state;
