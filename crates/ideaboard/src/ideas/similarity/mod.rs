//! Lexical near-duplicate detection for idea submissions.
//!
//! Each query vectorizes the target and its candidates from scratch. There is no persistent
//! index, so concurrent queries share nothing.

mod text;
mod vectorizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Category, IdeaId, IdeaRecord, IdeaStatus};
use vectorizer::{cosine, TfIdfVectorizer};

/// Call-site knobs for a similarity query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityOptions {
    pub top_k: usize,
    /// Raw cosine similarity a candidate must exceed to be reported.
    pub threshold: f64,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            threshold: 0.10,
        }
    }
}

/// Candidate idea that resembles the target, scored as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatch {
    pub idea_id: IdeaId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: IdeaStatus,
    /// Cosine similarity scaled to 0-100 and rounded to two decimals.
    #[serde(rename = "similarity_score")]
    pub score: f64,
}

/// TF-IDF + cosine ranking over a caller-supplied corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityIndex {
    vectorizer: TfIdfVectorizer,
}

impl SimilarityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks `candidates` against `target`.
    ///
    /// Callers filter out the target itself and rejected ideas beforehand. Degenerate inputs
    /// (no candidates, blank target, empty vocabulary) produce an empty list rather than an error.
    pub fn find_similar(
        &self,
        target: &IdeaRecord,
        candidates: &[IdeaRecord],
        options: SimilarityOptions,
    ) -> Vec<SimilarityMatch> {
        if candidates.is_empty() || options.top_k == 0 {
            return Vec::new();
        }

        let target_text = text::normalize(&text::assemble(target));
        if target_text.trim().is_empty() {
            debug!(idea_id = %target.id, "similarity skipped: target has no text");
            return Vec::new();
        }

        let mut corpus = Vec::with_capacity(candidates.len() + 1);
        corpus.push(target_text);
        corpus.extend(
            candidates
                .iter()
                .map(|candidate| text::normalize(&text::assemble(candidate))),
        );

        let Some(matrix) = self.vectorizer.fit_transform(&corpus) else {
            debug!(idea_id = %target.id, "similarity skipped: empty vocabulary");
            return Vec::new();
        };

        let target_vector = &matrix.rows[0];
        let mut scored: Vec<(usize, f64)> = matrix.rows[1..]
            .iter()
            .enumerate()
            .map(|(index, row)| (index, cosine(target_vector, row)))
            .collect();

        // stable: equal scores keep candidate order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let matches: Vec<SimilarityMatch> = scored
            .into_iter()
            .filter(|(_, score)| *score > options.threshold)
            .take(options.top_k)
            .map(|(index, score)| {
                let candidate = &candidates[index];
                SimilarityMatch {
                    idea_id: candidate.id.clone(),
                    title: candidate.title.clone(),
                    description: candidate.description.clone(),
                    category: candidate.category,
                    status: candidate.status,
                    score: as_percentage(score),
                }
            })
            .collect();

        debug!(
            idea_id = %target.id,
            candidates = candidates.len(),
            vocabulary = matrix.vocabulary_len,
            matches = matches.len(),
            "similarity query complete"
        );

        matches
    }
}

fn as_percentage(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}
