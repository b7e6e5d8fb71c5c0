use ideaboard::ideas::{BenefitLevel, Category};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    match Category::parse(raw) {
        Category::Unknown => Err(format!(
            "unknown category '{raw}' (expected Innovation, Automation, or Security)"
        )),
        category => Ok(category),
    }
}

pub(crate) fn parse_benefit_level(raw: &str) -> Result<BenefitLevel, String> {
    match BenefitLevel::parse(raw) {
        BenefitLevel::Unknown => {
            let known: Vec<&str> = BenefitLevel::ALL.iter().map(|level| level.label()).collect();
            Err(format!(
                "unknown benefit level '{raw}' (expected one of: {})",
                known.join(", ")
            ))
        }
        level => Ok(level),
    }
}
