//! Patent & IP landscape narrative for a repurposing candidate.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatentAssessment {
    pub composition_patent_status: String,
    pub secondary_patent_landscape: String,
    pub freedom_to_operate: String,
    pub repurposing_ip_opportunities: String,
    pub regulatory_exclusivity_options: String,
    pub strategic_patent_assessment: String,
    pub analysis_year: i32,
}

impl PatentAssessment {
    /// Sections in report order.
    pub fn sections(&self) -> [&str; 6] {
        [
            &self.composition_patent_status,
            &self.secondary_patent_landscape,
            &self.freedom_to_operate,
            &self.repurposing_ip_opportunities,
            &self.regulatory_exclusivity_options,
            &self.strategic_patent_assessment,
        ]
    }
}

pub fn patent_agent(drug_name: &str) -> PatentAssessment {
    PatentAssessment {
        composition_patent_status: format!(
            "Primary composition-of-matter patents for {} \
             are largely expired or approaching expiry in major markets \
             (US/EU), reducing barriers for generic manufacturing.",
            drug_name
        ),
        secondary_patent_landscape: "Secondary patents may still exist around:\n\
             - Specific crystal polymorphs or salt forms\n\
             - Modified-release or targeted delivery formulations\n\
             - Improved manufacturing or purification processes\n\
             However, these are typically narrower in scope and \
             can often be designed around."
            .to_string(),
        freedom_to_operate: "Freedom-to-operate appears favorable for a new medical use, \
             provided the repurposed indication does not rely on \
             protected formulations or active combination products. \
             A focused FTO search would still be required before commercialization."
            .to_string(),
        repurposing_ip_opportunities: "Strong IP opportunities exist via:\n\
             - New therapeutic indication patents (method-of-use)\n\
             - Patient subpopulation claims (biomarker-driven therapy)\n\
             - Novel dose or dosing-regimen patents\n\
             - Combination therapy patents with complementary agents\n\
             These routes are commonly used in successful repurposing programs."
            .to_string(),
        regulatory_exclusivity_options: "Beyond patents, regulatory exclusivity pathways such as \
             Orphan Drug Designation (7 years US / 10 years EU), \
             data exclusivity, or pediatric extensions may provide \
             meaningful market protection even in the absence of \
             strong composition patents."
            .to_string(),
        strategic_patent_assessment: format!(
            "From a patent strategy perspective, {} represents a \
             low-to-moderate IP risk candidate with strong repurposing potential. \
             Success will depend on selecting an indication with high unmet need \
             and executing a focused IP and regulatory exclusivity strategy early.",
            drug_name
        ),
        analysis_year: Utc::now().year(),
    }
}

/// Flatten the patent assessment into one block, sections separated by a blank line.
pub fn patent_agent_summary(drug_name: &str) -> String {
    patent_agent(drug_name).sections().join("\n\n")
}
