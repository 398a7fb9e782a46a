//! Commercial / market-viability narrative for a repurposing candidate.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAssessment {
    pub current_market_landscape: String,
    pub unmet_medical_need: String,
    pub repurposing_market_opportunity: String,
    pub competitive_landscape: String,
    pub pricing_and_reimbursement: String,
    pub commercialization_strategy: String,
    pub strategic_market_assessment: String,
    pub analysis_year: i32,
}

impl MarketAssessment {
    pub fn sections(&self) -> [&str; 7] {
        [
            &self.current_market_landscape,
            &self.unmet_medical_need,
            &self.repurposing_market_opportunity,
            &self.competitive_landscape,
            &self.pricing_and_reimbursement,
            &self.commercialization_strategy,
            &self.strategic_market_assessment,
        ]
    }
}

pub fn market_agent(drug_name: &str) -> MarketAssessment {
    MarketAssessment {
        current_market_landscape: format!(
            "The current market for {} in its primary indication \
             is mature and highly competitive, with multiple generic entrants \
             and strong price erosion across both developed and emerging markets.",
            drug_name
        ),
        unmet_medical_need: "Despite therapeutic alternatives, significant unmet medical need persists \
             in patient subpopulations such as treatment-resistant cases, \
             multi-morbid patients, and regions with limited access to advanced therapies."
            .to_string(),
        repurposing_market_opportunity: "Repurposing into a differentiated indication presents an opportunity to \
             access higher-value segments, particularly in chronic, rare, or progressive \
             disease areas where existing treatment options are limited or suboptimal."
            .to_string(),
        competitive_landscape: "The competitive landscape for the repurposed indication is characterized by:\n\
             - Limited number of approved therapies\n\
             - High discontinuation rates due to safety or tolerability issues\n\
             - Emerging biotech entrants with early-stage assets\n\
             This environment favors fast-to-market repurposed assets with known safety profiles."
            .to_string(),
        pricing_and_reimbursement: "Pricing potential is favorable if the repurposed product demonstrates \
             clear clinical differentiation and health-economic value. \
             Payers are more likely to reimburse premium pricing in settings \
             with high disease burden or lack of effective alternatives."
            .to_string(),
        commercialization_strategy: "An optimal commercialization strategy would focus on:\n\
             - Targeted specialist prescriber segments\n\
             - Clear patient stratification criteria\n\
             - Evidence generation through real-world data and pragmatic trials\n\
             This approach can accelerate uptake while controlling commercial risk."
            .to_string(),
        strategic_market_assessment: format!(
            "From a commercial perspective, repurposing {} represents \
             a moderate-risk, high-potential opportunity. Strategic success will depend \
             on selecting an indication with strong unmet need, limited competition, \
             and supportive reimbursement dynamics.",
            drug_name
        ),
        analysis_year: Utc::now().year(),
    }
}

pub fn market_agent_summary(drug_name: &str) -> String {
    market_agent(drug_name).sections().join("\n\n")
}
