use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{IdeaId, IdeaStatus, StoredIdea};

/// Storage abstraction so the review service can be exercised in isolation.
pub trait IdeaRepository: Send + Sync {
    fn insert(&self, idea: StoredIdea) -> Result<StoredIdea, RepositoryError>;
    fn fetch(&self, id: &IdeaId) -> Result<Option<StoredIdea>, RepositoryError>;
    /// All stored ideas in submission order.
    fn list(&self) -> Result<Vec<StoredIdea>, RepositoryError>;
    /// Persists a review decision. Fails with `Conflict` unless the stored idea is still pending.
    fn commit_review(&self, idea: StoredIdea) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local repository keeping ideas in insertion order.
#[derive(Default, Clone)]
pub struct InMemoryIdeaRepository {
    inner: Arc<Mutex<InMemoryState>>,
}

#[derive(Default)]
struct InMemoryState {
    order: Vec<IdeaId>,
    ideas: HashMap<IdeaId, StoredIdea>,
}

impl IdeaRepository for InMemoryIdeaRepository {
    fn insert(&self, idea: StoredIdea) -> Result<StoredIdea, RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        if guard.ideas.contains_key(idea.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.order.push(idea.id().clone());
        guard.ideas.insert(idea.id().clone(), idea.clone());
        Ok(idea)
    }

    fn fetch(&self, id: &IdeaId) -> Result<Option<StoredIdea>, RepositoryError> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        Ok(guard.ideas.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<StoredIdea>, RepositoryError> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.ideas.get(id).cloned())
            .collect())
    }

    fn commit_review(&self, idea: StoredIdea) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        let current = guard.ideas.get(idea.id()).map(StoredIdea::status);
        match current {
            None => Err(RepositoryError::NotFound),
            Some(status) if status != IdeaStatus::Pending => Err(RepositoryError::Conflict),
            Some(_) => {
                guard.ideas.insert(idea.id().clone(), idea);
                Ok(())
            }
        }
    }
}
