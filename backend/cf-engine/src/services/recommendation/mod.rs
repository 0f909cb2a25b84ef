use crate::error::{CfError, Result};
use crate::models::{Recommendations, ScoredItem};
use crate::services::corpus::{RatingCorpus, SimilarityProvider};
use crate::services::prediction::Predictor;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::info;

/// Top-K recommender
///
/// Predicts every item the user has not rated and returns the highest predictions.
pub struct Recommender<C, S> {
    predictor: Predictor<C, S>,
}

impl<C, S> Recommender<C, S>
where
    C: RatingCorpus,
    S: SimilarityProvider<C::User>,
{
    pub fn new(predictor: Predictor<C, S>) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &Predictor<C, S> {
        &self.predictor
    }

    /// Predict every item `user` has not rated, highest prediction first.
    ///
    /// Equal predictions are ordered by ascending item id.
    pub fn predict_all(&self, user: &C::User) -> Result<Recommendations<C::Item>> {
        let corpus = self.predictor.corpus();
        let user_mean = corpus
            .user_mean_rating(user)
            .ok_or_else(|| CfError::unknown_user(user))?;

        let candidates: Vec<(&C::Item, &HashSet<C::User>)> = corpus
            .item_raters()
            .iter()
            .filter(|(_, raters)| !raters.contains(user))
            .collect();

        let predict = |(item, raters): (&C::Item, &HashSet<C::User>)| -> Result<ScoredItem<C::Item>> {
            let breakdown = self
                .predictor
                .predict_from_raters(user, user_mean, item, raters)?;
            Ok(ScoredItem {
                item: item.clone(),
                score: breakdown.prediction,
            })
        };

        let mut scored: Vec<ScoredItem<C::Item>> = if self.predictor.config().parallel {
            candidates.into_par_iter().map(predict).collect::<Result<_>>()?
        } else {
            candidates.into_iter().map(predict).collect::<Result<_>>()?
        };

        rank_descending(&mut scored);

        Ok(Recommendations::from_ranked(scored))
    }

    /// The `threshold_count` highest predictions for items `user` has not rated.
    ///
    /// Returns every candidate when there are fewer than `threshold_count`.
    pub fn recommend(
        &self,
        user: &C::User,
        threshold_count: usize,
    ) -> Result<Recommendations<C::Item>> {
        if threshold_count == 0 {
            return Err(CfError::InvalidThreshold(threshold_count));
        }

        let mut recommendations = self.predict_all(user)?;
        let candidates = recommendations.len();
        recommendations.truncate(threshold_count);

        info!(
            user = ?user,
            candidates = candidates,
            returned = recommendations.len(),
            "Recommendations produced"
        );

        Ok(recommendations)
    }
}

/// Sort by score descending, ties by ascending item id
fn rank_descending<I: Ord>(scored: &mut [ScoredItem<I>]) {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.item.cmp(&b.item))
    });
}
