//! repurpose-report — Composite repurposing report.
//! - Patent & IP narrative
//! - Market opportunity narrative
//! - Aggregation with the clinical summary (master agent)
//! - Latin-1 sanitisation and PDF rendering

pub mod patent;
pub mod market;
pub mod sanitize;
pub mod engine;
pub mod pdf;

pub use engine::{RepurposingEngine, RepurposingReport};
pub use pdf::{build_pdf_from_report, PdfOptions};
