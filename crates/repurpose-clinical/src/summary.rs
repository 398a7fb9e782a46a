//! Human-readable rendering of a classified clinical signal.

use crate::models::ClinicalSignal;

pub fn render(drug_name: &str, analysis: &ClinicalSignal) -> String {
    if analysis.trial_count == 0 {
        return format!(
            "No clinical trials were found for '{}'. \
             Clinical evidence is insufficient for repurposing evaluation.",
            drug_name
        );
    }

    format!(
        "{} has {} clinical trials across {} conditions. \
         Evidence trend: {} clinical signal with {} confidence. \
         Potential related indications include: {}.",
        capitalize_first(drug_name),
        analysis.trial_count,
        analysis.indications.len(),
        analysis.signal,
        analysis.confidence,
        analysis.indications.join(", "),
    )
}

/// Upper-case the first character, leave the rest untouched.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
