use super::SimilarityProvider;
use crate::models::EntityId;
use std::collections::HashMap;

/// Precomputed pairwise similarity scores
///
/// Pairs are stored symmetrically; a pair that was never inserted scores 0.0.
#[derive(Debug, Clone)]
pub struct SimilarityTable<U: EntityId> {
    scores: HashMap<(U, U), f64>,
    pairs: usize,
}

impl<U: EntityId> Default for SimilarityTable<U> {
    fn default() -> Self {
        Self {
            scores: HashMap::new(),
            pairs: 0,
        }
    }
}

impl<U: EntityId> SimilarityTable<U> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user: U, other: U, score: f64) {
        if self
            .scores
            .insert((user.clone(), other.clone()), score)
            .is_none()
        {
            self.pairs += 1;
        }
        self.scores.insert((other, user), score);
    }

    pub fn with_score(mut self, user: U, other: U, score: f64) -> Self {
        self.insert(user, other, score);
        self
    }

    pub fn get(&self, user: &U, other: &U) -> Option<f64> {
        self.scores.get(&(user.clone(), other.clone())).copied()
    }

    /// Number of distinct unordered pairs; `(a, b)` and `(b, a)` count once.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<U: EntityId> SimilarityProvider<U> for SimilarityTable<U> {
    fn similarity(&self, user: &U, other: &U) -> f64 {
        self.get(user, other).unwrap_or(0.0)
    }
}
