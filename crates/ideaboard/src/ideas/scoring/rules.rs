use super::super::domain::{BenefitLevel, Category};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn score_components(
    category: Category,
    benefit_level: BenefitLevel,
    implemented: bool,
    config: &ScoringConfig,
) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(3);

    let base = config.base.for_category(category);
    components.push(ScoreComponent {
        factor: ScoreFactor::Base,
        points: base,
        notes: if base > 0 {
            format!("{} idea approved", category.label())
        } else {
            format!("no base award for category {}", category.label())
        },
    });

    if !implemented {
        return components;
    }

    let bonus = config.implementation_bonus.for_category(category);
    components.push(ScoreComponent {
        factor: ScoreFactor::ImplementationBonus,
        points: bonus,
        notes: format!("{} idea already implemented", category.label()),
    });

    let multiplier = config.benefit.for_level(benefit_level);
    components.push(ScoreComponent {
        factor: ScoreFactor::BenefitMultiplier,
        points: multiplier,
        notes: format!("benefit level {}", benefit_level.label()),
    });

    components
}
