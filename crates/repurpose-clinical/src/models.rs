//! Data models for the clinical-evidence pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One clinical study, normalised from the trial source or the mock fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub title: String,
    pub condition: String,
    pub status: String,
}

impl TrialRecord {
    pub fn new(title: impl Into<String>, condition: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            condition: condition.into(),
            status: status.into(),
        }
    }
}

/// Coarse evidence trend derived from trial statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "No evidence")]
    NoEvidence,
    Weak,
    Emerging,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::NoEvidence => "No evidence",
            Signal::Weak       => "Weak",
            Signal::Emerging   => "Emerging",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative certainty derived from the number of positively-statused trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low    => "Low",
            Confidence::Medium => "Medium",
            Confidence::High   => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of classifying a set of trials.
///
/// `indications` holds each distinct condition once, in the order it was
/// first seen in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalSignal {
    pub trial_count: usize,
    pub signal: Signal,
    pub confidence: Confidence,
    pub indications: Vec<String>,
}

impl ClinicalSignal {
    pub fn no_evidence() -> Self {
        Self {
            trial_count: 0,
            signal: Signal::NoEvidence,
            confidence: Confidence::Low,
            indications: vec![],
        }
    }
}

/// Terminal output of the clinical pipeline, consumed by report aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalReport {
    pub drug: String,
    pub clinical_summary: String,
    pub raw_analysis: ClinicalSignal,
}
