//! Signal classification over normalised trial records.

use crate::models::{ClinicalSignal, Confidence, Signal, TrialRecord};

/// Statuses that count as positive evidence.
pub const POSITIVE_STATUSES: [&str; 2] = ["Completed", "Active, not recruiting"];

/// More positive trials than this gives High confidence.
const HIGH_CONFIDENCE_MIN_EXCLUSIVE: usize = 2;

pub fn is_positive_status(status: &str) -> bool {
    POSITIVE_STATUSES.contains(&status)
}

/// Derive the coarse evidence signal for a set of trials.
///
/// Confidence only looks at the positive count, so a set with no positive
/// trials classifies as `Weak` with `Medium` confidence.
pub fn classify(trials: &[TrialRecord]) -> ClinicalSignal {
    if trials.is_empty() {
        return ClinicalSignal::no_evidence();
    }

    let positives = trials.iter().filter(|t| is_positive_status(&t.status)).count();

    let signal = if positives > 0 { Signal::Emerging } else { Signal::Weak };
    let confidence = if positives > HIGH_CONFIDENCE_MIN_EXCLUSIVE {
        Confidence::High
    } else {
        Confidence::Medium
    };

    ClinicalSignal {
        trial_count: trials.len(),
        signal,
        confidence,
        indications: distinct_conditions(trials),
    }
}

/// Distinct conditions across all trials, in first-seen order.
fn distinct_conditions(trials: &[TrialRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in trials {
        if !out.iter().any(|c| c == &t.condition) {
            out.push(t.condition.clone());
        }
    }
    out
}
