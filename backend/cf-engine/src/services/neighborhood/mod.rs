use crate::config::CfConfig;
use crate::models::{EntityId, Neighbor};
use std::cmp::Ordering;

/// Keeps the `capacity` candidates with the largest absolute similarity.
///
/// Strong negative correlations are as informative as strong positive ones, so only
/// the magnitude counts. Equal magnitudes are ordered by ascending user id, which makes
/// the cut at the capacity boundary deterministic. The result is ordered by descending
/// magnitude. With `capacity` 0 the neighborhood is empty.
pub fn select_neighborhood<U: EntityId>(
    scores: impl IntoIterator<Item = (U, f64)>,
    capacity: usize,
) -> Vec<Neighbor<U>> {
    if capacity == 0 {
        return Vec::new();
    }

    let mut neighbors: Vec<Neighbor<U>> = scores
        .into_iter()
        .map(|(user, similarity)| Neighbor::new(user, similarity))
        .collect();

    if neighbors.len() > capacity {
        neighbors.select_nth_unstable_by(capacity - 1, by_magnitude);
        neighbors.truncate(capacity);
    }

    neighbors.sort_by(by_magnitude);
    neighbors
}

fn by_magnitude<U: Ord>(a: &Neighbor<U>, b: &Neighbor<U>) -> Ordering {
    b.similarity
        .abs()
        .total_cmp(&a.similarity.abs())
        .then_with(|| a.user.cmp(&b.user))
}

/// Neighborhood selection with a fixed capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodSelector {
    capacity: usize,
}

impl Default for NeighborhoodSelector {
    fn default() -> Self {
        Self::from_config(&CfConfig::default())
    }
}

impl NeighborhoodSelector {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn from_config(config: &CfConfig) -> Self {
        Self::new(config.neighborhood_size)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn select<U: EntityId>(
        &self,
        scores: impl IntoIterator<Item = (U, f64)>,
    ) -> Vec<Neighbor<U>> {
        select_neighborhood(scores, self.capacity)
    }
}
