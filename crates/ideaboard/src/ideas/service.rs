use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{
    EngineerRef, IdeaId, IdeaRecord, IdeaStatus, IdeaSubmission, StoredIdea, SubmissionError,
};
use super::leaderboard::Leaderboard;
use super::repository::{IdeaRepository, RepositoryError};
use super::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};
use super::similarity::{SimilarityIndex, SimilarityMatch, SimilarityOptions};

/// Service composing the repository, scoring engine, and similarity index.
pub struct IdeaReviewService<R> {
    repository: Arc<R>,
    scoring: ScoringEngine,
    similarity: SimilarityIndex,
    similarity_options: SimilarityOptions,
}

static IDEA_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_idea_id() -> IdeaId {
    let id = IDEA_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    IdeaId(format!("idea-{id:06}"))
}

/// Result of approving an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalOutcome {
    pub idea_id: IdeaId,
    pub points_awarded: u32,
    pub breakdown: ScoreBreakdown,
}

impl<R> IdeaReviewService<R>
where
    R: IdeaRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        scoring: ScoringConfig,
        similarity_options: SimilarityOptions,
    ) -> Self {
        Self {
            repository,
            scoring: ScoringEngine::new(scoring),
            similarity: SimilarityIndex::new(),
            similarity_options,
        }
    }

    pub fn similarity_options(&self) -> SimilarityOptions {
        self.similarity_options
    }

    /// Validate and store a new pending idea.
    pub fn submit(
        &self,
        engineer: EngineerRef,
        submission: IdeaSubmission,
    ) -> Result<StoredIdea, ReviewServiceError> {
        let (category, benefit_level) = submission.validate()?;
        let now = Utc::now();

        let idea = StoredIdea {
            record: IdeaRecord {
                id: next_idea_id(),
                title: submission.title.trim().to_string(),
                description: submission.describe(category),
                category,
                benefit_level,
                implemented: submission.implemented,
                status: IdeaStatus::Pending,
            },
            engineer,
            assigned_sdm_id: submission.assigned_sdm_id.trim().to_string(),
            service_area: submission.service_area.trim().to_string(),
            points: None,
            rejection_reason: None,
            submitted_on: now.date_naive(),
            updated_at: now,
        };

        let stored = self.repository.insert(idea)?;
        info!(idea_id = %stored.id(), engineer = %stored.engineer.id, "idea submitted");
        Ok(stored)
    }

    pub fn get(&self, idea_id: &IdeaId) -> Result<StoredIdea, ReviewServiceError> {
        let idea = self
            .repository
            .fetch(idea_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(idea)
    }

    /// Approve a pending idea assigned to `reviewer_id`, awarding points exactly once.
    pub fn approve(
        &self,
        idea_id: &IdeaId,
        reviewer_id: &str,
    ) -> Result<ApprovalOutcome, ReviewServiceError> {
        let mut idea = self.pending_for_reviewer(idea_id, reviewer_id)?;

        let breakdown = self.scoring.score(&idea.record);
        let points = breakdown.total;

        idea.record.status = IdeaStatus::Approved;
        idea.points = Some(points);
        idea.updated_at = Utc::now();
        self.commit(idea)?;

        info!(idea_id = %idea_id, reviewer = reviewer_id, points, "idea approved");
        Ok(ApprovalOutcome {
            idea_id: idea_id.clone(),
            points_awarded: points,
            breakdown,
        })
    }

    /// Reject a pending idea. Rejections never score.
    pub fn reject(
        &self,
        idea_id: &IdeaId,
        reviewer_id: &str,
        reason: &str,
    ) -> Result<StoredIdea, ReviewServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ReviewServiceError::MissingRejectionReason);
        }

        let mut idea = self.pending_for_reviewer(idea_id, reviewer_id)?;
        idea.record.status = IdeaStatus::Rejected;
        idea.rejection_reason = Some(reason.to_string());
        idea.updated_at = Utc::now();
        self.commit(idea.clone())?;

        info!(idea_id = %idea_id, reviewer = reviewer_id, "idea rejected");
        Ok(idea)
    }

    /// Near-duplicates of `idea_id` among pending and approved ideas.
    pub fn similar(&self, idea_id: &IdeaId) -> Result<Vec<SimilarityMatch>, ReviewServiceError> {
        self.similar_with(idea_id, self.similarity_options)
    }

    pub fn similar_with(
        &self,
        idea_id: &IdeaId,
        options: SimilarityOptions,
    ) -> Result<Vec<SimilarityMatch>, ReviewServiceError> {
        let target = self.get(idea_id)?;
        let candidates: Vec<IdeaRecord> = self
            .repository
            .list()?
            .into_iter()
            .filter(|idea| idea.id() != idea_id && idea.status() != IdeaStatus::Rejected)
            .map(|idea| idea.record)
            .collect();

        Ok(self
            .similarity
            .find_similar(&target.record, &candidates, options))
    }

    /// Pending ideas assigned to a reviewer, oldest submission first.
    pub fn worklist(&self, reviewer_id: &str) -> Result<Vec<StoredIdea>, ReviewServiceError> {
        let mut ideas: Vec<StoredIdea> = self
            .repository
            .list()?
            .into_iter()
            .filter(|idea| {
                idea.status() == IdeaStatus::Pending && idea.assigned_sdm_id == reviewer_id
            })
            .collect();
        ideas.sort_by_key(|idea| idea.submitted_on);
        Ok(ideas)
    }

    /// Approved ideas, newest submission first.
    pub fn approved(&self) -> Result<Vec<StoredIdea>, ReviewServiceError> {
        let mut ideas: Vec<StoredIdea> = self
            .repository
            .list()?
            .into_iter()
            .filter(|idea| idea.status() == IdeaStatus::Approved)
            .collect();
        ideas.sort_by(|a, b| b.submitted_on.cmp(&a.submitted_on));
        Ok(ideas)
    }

    /// Ideas submitted by one engineer in any status, newest submission first.
    pub fn submitted_by(&self, engineer_id: &str) -> Result<Vec<StoredIdea>, ReviewServiceError> {
        let mut ideas: Vec<StoredIdea> = self
            .repository
            .list()?
            .into_iter()
            .filter(|idea| idea.engineer.id == engineer_id)
            .collect();
        ideas.sort_by(|a, b| b.submitted_on.cmp(&a.submitted_on));
        Ok(ideas)
    }

    pub fn leaderboard(&self) -> Result<Leaderboard, ReviewServiceError> {
        let ideas = self.repository.list()?;
        Ok(Leaderboard::build(&ideas))
    }

    fn pending_for_reviewer(
        &self,
        idea_id: &IdeaId,
        reviewer_id: &str,
    ) -> Result<StoredIdea, ReviewServiceError> {
        let idea = self.get(idea_id)?;
        if idea.status() != IdeaStatus::Pending {
            return Err(ReviewServiceError::NotPending);
        }
        if idea.assigned_sdm_id != reviewer_id {
            return Err(ReviewServiceError::NotAssigned);
        }
        Ok(idea)
    }

    fn commit(&self, idea: StoredIdea) -> Result<(), ReviewServiceError> {
        match self.repository.commit_review(idea) {
            Ok(()) => Ok(()),
            // another reviewer decided first
            Err(RepositoryError::Conflict) => Err(ReviewServiceError::NotPending),
            Err(other) => Err(other.into()),
        }
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("idea is no longer pending review")]
    NotPending,
    #[error("idea is not assigned to this reviewer")]
    NotAssigned,
    #[error("rejection reason is required")]
    MissingRejectionReason,
}
