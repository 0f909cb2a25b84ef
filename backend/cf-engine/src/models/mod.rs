use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Identity bound shared by users and items.
///
/// `Ord` provides the deterministic tie-break for neighbors and ranked items.
pub trait EntityId: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> EntityId for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// One member of a prediction neighborhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor<U> {
    pub user: U,
    pub similarity: f64,
}

impl<U> Neighbor<U> {
    pub fn new(user: U, similarity: f64) -> Self {
        Self { user, similarity }
    }
}

/// Predicted rating for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem<I> {
    pub item: I,
    pub score: f64,
}

/// Everything that went into a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBreakdown<U> {
    /// Neighbors actually used, highest |similarity| first
    pub neighbors: Vec<Neighbor<U>>,
    /// Number of users who rated the item before neighborhood selection
    pub rater_count: usize,
    pub numerator: f64,
    pub denominator: f64,
    /// Prediction before truncation
    pub raw: f64,
    pub prediction: f64,
}

impl<U> PredictionBreakdown<U> {
    /// True when the weighted denominator was zero and the prediction fell back to 0.
    pub fn is_degenerate(&self) -> bool {
        self.denominator == 0.0
    }
}

/// Ranked mapping item -> predicted rating, highest prediction first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendations<I> {
    ranked: Vec<ScoredItem<I>>,
}

impl<I> Recommendations<I> {
    /// Caller guarantees `ranked` is already in output order.
    pub(crate) fn from_ranked(ranked: Vec<ScoredItem<I>>) -> Self {
        Self { ranked }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredItem<I>> {
        self.ranked.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.ranked.iter().map(|scored| &scored.item)
    }

    pub fn get(&self, item: &I) -> Option<f64>
    where
        I: PartialEq,
    {
        self.ranked
            .iter()
            .find(|scored| &scored.item == item)
            .map(|scored| scored.score)
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.ranked.truncate(len);
    }

    pub fn into_vec(self) -> Vec<ScoredItem<I>> {
        self.ranked
    }

    pub fn into_map(self) -> HashMap<I, f64>
    where
        I: Eq + Hash,
    {
        self.ranked
            .into_iter()
            .map(|scored| (scored.item, scored.score))
            .collect()
    }
}

impl<I> IntoIterator for Recommendations<I> {
    type Item = ScoredItem<I>;
    type IntoIter = std::vec::IntoIter<ScoredItem<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.into_iter()
    }
}

impl<'a, I> IntoIterator for &'a Recommendations<I> {
    type Item = &'a ScoredItem<I>;
    type IntoIter = std::slice::Iter<'a, ScoredItem<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.iter()
    }
}
