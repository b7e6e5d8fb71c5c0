//! Idea intake, review, scoring, and near-duplicate detection.
//!
//! `scoring` and `similarity` are pure and never touch storage. The review service composes them
//! with an [`IdeaRepository`] and owns the `pending -> approved | rejected` lifecycle.

pub mod domain;
pub mod leaderboard;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use domain::{
    BenefitLevel, Category, EngineerRef, IdeaId, IdeaRecord, IdeaStatus, IdeaSubmission, IdeaView,
    StoredIdea, SubmissionError,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry, RecentActivity};
pub use repository::{IdeaRepository, InMemoryIdeaRepository, RepositoryError};
pub use router::idea_router;
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoreFactor, ScoringConfig, ScoringEngine};
pub use service::{ApprovalOutcome, IdeaReviewService, ReviewServiceError};
pub use similarity::{SimilarityIndex, SimilarityMatch, SimilarityOptions};
