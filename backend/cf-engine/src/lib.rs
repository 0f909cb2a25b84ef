//! Neighborhood-based collaborative filtering engine
//!
//! Predicts how a user would rate an item they have not rated yet, from the
//! similarity-weighted rating deviations of the users who did rate it, and ranks
//! those predictions into a top-K recommendation list.
//!
//! The rating corpus and the similarity metric are external collaborators, reached
//! through the [`RatingCorpus`] and [`SimilarityProvider`] traits.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::CfConfig;
pub use error::{CfError, Result};
pub use models::{EntityId, Neighbor, PredictionBreakdown, Recommendations, ScoredItem};
pub use services::{
    select_neighborhood, InMemoryLibrary, NeighborhoodSelector, Predictor, RatingCorpus,
    LibrarySnapshot, RatingRecord, Recommender, SimilarityProvider, SimilarityTable,
};
