mod config;
mod rules;

pub use config::{BenefitPoints, CategoryPoints, ScoringConfig};

use super::domain::{BenefitLevel, Category, IdeaId, IdeaRecord};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the point tables to an approved idea.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Total points for one approval decision.
    ///
    /// The base award always applies; the implementation bonus and benefit multiplier only
    /// apply when the idea is already implemented. Unknown categories and benefit levels
    /// contribute zero.
    pub fn compute_points(
        &self,
        category: Category,
        benefit_level: BenefitLevel,
        implemented: bool,
    ) -> u32 {
        let base = self.config.base.for_category(category);
        if !implemented {
            return base;
        }

        base + self.config.implementation_bonus.for_category(category)
            + self.config.benefit.for_level(benefit_level)
    }

    /// Itemised version of [`ScoringEngine::compute_points`] for audit trails.
    pub fn score(&self, idea: &IdeaRecord) -> ScoreBreakdown {
        let components = rules::score_components(
            idea.category,
            idea.benefit_level,
            idea.implemented,
            &self.config,
        );
        let total = components.iter().map(|component| component.points).sum();

        ScoreBreakdown {
            idea_id: idea.id.clone(),
            total,
            components,
        }
    }
}

/// Scoring table an individual contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Base,
    ImplementationBonus,
    BenefitMultiplier,
}

/// Discrete contribution to an award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub idea_id: IdeaId,
    pub total: u32,
    pub components: Vec<ScoreComponent>,
}
