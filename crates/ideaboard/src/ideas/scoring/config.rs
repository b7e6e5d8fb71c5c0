use serde::{Deserialize, Serialize};

use super::super::domain::{BenefitLevel, Category};

/// Points awarded per known category. Unknown categories earn nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPoints {
    pub innovation: u32,
    pub automation: u32,
    pub security: u32,
}

impl CategoryPoints {
    pub const fn for_category(&self, category: Category) -> u32 {
        match category {
            Category::Innovation => self.innovation,
            Category::Automation => self.automation,
            Category::Security => self.security,
            Category::Unknown => 0,
        }
    }
}

/// Points added for the reviewer's benefit estimate on implemented ideas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitPoints {
    pub marginal: u32,
    pub moderate: u32,
    pub high: u32,
    pub very_high: u32,
    pub gamechanger: u32,
}

impl BenefitPoints {
    pub const fn for_level(&self, level: BenefitLevel) -> u32 {
        match level {
            BenefitLevel::Marginal => self.marginal,
            BenefitLevel::Moderate => self.moderate,
            BenefitLevel::High => self.high,
            BenefitLevel::VeryHigh => self.very_high,
            BenefitLevel::Gamechanger => self.gamechanger,
            BenefitLevel::Unknown => 0,
        }
    }
}

/// Point tables applied when an idea is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base: CategoryPoints,
    pub implementation_bonus: CategoryPoints,
    pub benefit: BenefitPoints,
}

impl ScoringConfig {
    pub const STANDARD: ScoringConfig = ScoringConfig {
        base: CategoryPoints {
            innovation: 5,
            automation: 10,
            security: 10,
        },
        implementation_bonus: CategoryPoints {
            innovation: 10,
            automation: 15,
            security: 15,
        },
        benefit: BenefitPoints {
            marginal: 5,
            moderate: 10,
            high: 15,
            very_high: 20,
            gamechanger: 30,
        },
    };

    pub const fn standard() -> Self {
        Self::STANDARD
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
