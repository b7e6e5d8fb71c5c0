use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::ideas::domain::{
    BenefitLevel, Category, EngineerRef, IdeaId, IdeaRecord, IdeaStatus, IdeaSubmission, StoredIdea,
};
use crate::ideas::repository::{IdeaRepository, InMemoryIdeaRepository, RepositoryError};
use crate::ideas::{idea_router, IdeaReviewService, ScoringConfig, SimilarityOptions};

pub(super) const REVIEWER: &str = "sdm-nachi";

pub(super) fn record(id: &str, title: &str, description: &str) -> IdeaRecord {
    IdeaRecord {
        id: IdeaId(id.to_string()),
        title: title.to_string(),
        description: description.to_string(),
        category: Category::Automation,
        benefit_level: BenefitLevel::Moderate,
        implemented: false,
        status: IdeaStatus::Pending,
    }
}

pub(super) fn engineer(id: &str) -> EngineerRef {
    EngineerRef {
        id: id.to_string(),
        display_name: format!("Engineer {id}"),
    }
}

pub(super) fn automation_submission() -> IdeaSubmission {
    IdeaSubmission {
        title: "Automate deployment pipeline".to_string(),
        category: "Automation".to_string(),
        service_area: "Release Engineering".to_string(),
        benefit_level: "High".to_string(),
        assigned_sdm_id: REVIEWER.to_string(),
        implemented: true,
        automation_opportunity: "manual deploys are slow".to_string(),
        ..IdeaSubmission::default()
    }
}

pub(super) fn duplicate_submission() -> IdeaSubmission {
    IdeaSubmission {
        title: "Automate deployment process".to_string(),
        automation_opportunity: String::new(),
        automation_solution: "script the deploy".to_string(),
        implemented: false,
        ..automation_submission()
    }
}

pub(super) fn security_submission() -> IdeaSubmission {
    IdeaSubmission {
        title: "Security audit of login".to_string(),
        category: "Security".to_string(),
        service_area: "Identity".to_string(),
        benefit_level: "Gamechanger".to_string(),
        assigned_sdm_id: REVIEWER.to_string(),
        implemented: true,
        security_gap: "weak passwords".to_string(),
        ..IdeaSubmission::default()
    }
}

pub(super) fn build_service() -> (
    IdeaReviewService<InMemoryIdeaRepository>,
    Arc<InMemoryIdeaRepository>,
) {
    let repository = Arc::new(InMemoryIdeaRepository::default());
    let service = IdeaReviewService::new(
        repository.clone(),
        ScoringConfig::standard(),
        SimilarityOptions::default(),
    );
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl IdeaRepository for UnavailableRepository {
    fn insert(&self, _idea: StoredIdea) -> Result<StoredIdea, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &IdeaId) -> Result<Option<StoredIdea>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<StoredIdea>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit_review(&self, _idea: StoredIdea) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: IdeaReviewService<InMemoryIdeaRepository>,
) -> axum::Router {
    idea_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
