//! Read-only seams to the rating data and the similarity metric
//!
//! The engine never writes through these traits and assumes the data behind them
//! does not change for the duration of a `predict` / `recommend` call.

mod library;
mod similarity;
#[cfg(test)]
pub(crate) mod stub;

pub use library::{InMemoryLibrary, LibrarySnapshot, RatingRecord};
pub use similarity::SimilarityTable;

use crate::models::EntityId;
use std::collections::{HashMap, HashSet};

/// Rating snapshot the engine predicts from.
///
/// Implementations must keep `item_raters` and `user_ratings` consistent: a user is in
/// an item's rater set iff that user's rating map contains the item. A violation
/// surfaces as [`CfError::MissingRating`](crate::CfError::MissingRating).
pub trait RatingCorpus: Send + Sync {
    type User: EntityId;
    type Item: EntityId;

    /// Every item in the corpus with the set of users who rated it
    fn item_raters(&self) -> &HashMap<Self::Item, HashSet<Self::User>>;

    /// All ratings of one user, `None` for an unknown user
    fn user_ratings(&self, user: &Self::User) -> Option<&HashMap<Self::Item, f64>>;

    /// Precomputed mean of the user's ratings, `None` for an unknown user
    fn user_mean_rating(&self, user: &Self::User) -> Option<f64>;
}

/// Pairwise user similarity, conventionally symmetric and in [-1, 1]
pub trait SimilarityProvider<U>: Send + Sync {
    fn similarity(&self, user: &U, other: &U) -> f64;
}

impl<U, F> SimilarityProvider<U> for F
where
    F: Fn(&U, &U) -> f64 + Send + Sync,
{
    fn similarity(&self, user: &U, other: &U) -> f64 {
        self(user, other)
    }
}
