use crate::config::CfConfig;
use crate::error::{CfError, Result};
use crate::models::PredictionBreakdown;
use crate::services::corpus::{RatingCorpus, SimilarityProvider};
use crate::services::neighborhood::NeighborhoodSelector;
use crate::utils::truncate_decimals;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Weighted-deviation rating predictor
///
/// prediction = mean(user) + Σ sim(user, u) × (rating(u, item) − mean(u)) / Σ |sim(user, u)|
///
/// summed over the neighborhood of users who rated the item. When the denominator is
/// exactly zero (no raters, or every neighbor has zero similarity) the prediction is 0,
/// not the user's mean.
pub struct Predictor<C, S> {
    corpus: Arc<C>,
    similarity: Arc<S>,
    selector: NeighborhoodSelector,
    config: CfConfig,
}

impl<C, S> Predictor<C, S>
where
    C: RatingCorpus,
    S: SimilarityProvider<C::User>,
{
    /// Create a predictor with the default configuration
    pub fn new(corpus: Arc<C>, similarity: Arc<S>) -> Self {
        let config = CfConfig::default();
        Self {
            corpus,
            similarity,
            selector: NeighborhoodSelector::from_config(&config),
            config,
        }
    }

    /// Create a predictor with a validated custom configuration
    pub fn with_config(corpus: Arc<C>, similarity: Arc<S>, config: CfConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            corpus,
            similarity,
            selector: NeighborhoodSelector::from_config(&config),
            config,
        })
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn config(&self) -> &CfConfig {
        &self.config
    }

    /// Predict how `user` would rate `item`, truncated to the configured precision.
    pub fn predict(&self, user: &C::User, item: &C::Item) -> Result<f64> {
        Ok(self.predict_detailed(user, item)?.prediction)
    }

    /// Same as [`predict`](Self::predict) but also returns the neighborhood and the
    /// intermediate sums.
    pub fn predict_detailed(
        &self,
        user: &C::User,
        item: &C::Item,
    ) -> Result<PredictionBreakdown<C::User>> {
        let user_mean = self
            .corpus
            .user_mean_rating(user)
            .ok_or_else(|| CfError::unknown_user(user))?;

        let raters = self
            .corpus
            .item_raters()
            .get(item)
            .ok_or_else(|| CfError::unknown_item(item))?;

        self.predict_from_raters(user, user_mean, item, raters)
    }

    /// Core of the prediction once the target user and the item's raters are resolved.
    pub(crate) fn predict_from_raters(
        &self,
        user: &C::User,
        user_mean: f64,
        item: &C::Item,
        raters: &HashSet<C::User>,
    ) -> Result<PredictionBreakdown<C::User>> {
        let mut candidate_scores: HashMap<C::User, f64> = HashMap::with_capacity(raters.len());

        for rater in raters {
            let similarity = self.similarity.similarity(user, rater);
            if !similarity.is_finite() {
                return Err(CfError::InvalidSimilarity {
                    user: format!("{:?}", user),
                    other: format!("{:?}", rater),
                    value: similarity,
                });
            }
            candidate_scores.insert(rater.clone(), similarity);
        }

        let neighbors = self.selector.select(candidate_scores);

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for neighbor in &neighbors {
            let rating = self
                .corpus
                .user_ratings(&neighbor.user)
                .and_then(|ratings| ratings.get(item))
                .copied()
                .ok_or_else(|| CfError::missing_rating(&neighbor.user, item))?;

            let neighbor_mean = self
                .corpus
                .user_mean_rating(&neighbor.user)
                .ok_or_else(|| CfError::unknown_user(&neighbor.user))?;

            numerator += neighbor.similarity * (rating - neighbor_mean);
            denominator += neighbor.similarity.abs();
        }

        let raw = if denominator == 0.0 {
            0.0
        } else {
            user_mean + numerator / denominator
        };
        let prediction = truncate_decimals(raw, self.config.decimal_places);

        debug!(
            user = ?user,
            item = ?item,
            raters = raters.len(),
            neighbors = neighbors.len(),
            denominator = denominator,
            prediction = prediction,
            "Prediction computed"
        );

        Ok(PredictionBreakdown {
            neighbors,
            rater_count: raters.len(),
            numerator,
            denominator,
            raw,
            prediction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::corpus::stub::StubCorpus;
    use crate::services::corpus::{InMemoryLibrary, SimilarityTable};

    type Library = InMemoryLibrary<&'static str, &'static str>;

    /// u0 (mean 3.0) has not rated A; u1 rated A=4 (mean 3.5), u2 rated A=2 (mean 2.0).
    fn scenario() -> (Arc<Library>, Arc<SimilarityTable<&'static str>>) {
        let library = InMemoryLibrary::from_ratings([
            ("u0", "B", 3.0),
            ("u1", "A", 4.0),
            ("u1", "B", 3.0),
            ("u2", "A", 2.0),
        ])
        .unwrap();

        let similarity = SimilarityTable::new()
            .with_score("u0", "u1", 0.8)
            .with_score("u0", "u2", 0.2);

        (Arc::new(library), Arc::new(similarity))
    }

    #[test]
    fn test_weighted_deviation_prediction() {
        let (library, similarity) = scenario();
        let predictor = Predictor::new(library, similarity);

        let breakdown = predictor.predict_detailed(&"u0", &"A").unwrap();

        assert_eq!(breakdown.rater_count, 2);
        assert_eq!(breakdown.neighbors.len(), 2);
        assert!((breakdown.numerator - 0.4).abs() < 1e-12);
        assert!((breakdown.denominator - 1.0).abs() < 1e-12);
        assert_eq!(breakdown.prediction, 3.4);
        assert_eq!(predictor.predict(&"u0", &"A").unwrap(), 3.4);
    }

    #[test]
    fn test_zero_similarity_predicts_zero() {
        let (library, _) = scenario();
        let predictor = Predictor::new(library, Arc::new(|_: &&str, _: &&str| 0.0));

        let breakdown = predictor.predict_detailed(&"u0", &"A").unwrap();

        assert!(breakdown.is_degenerate());
        assert_eq!(breakdown.prediction, 0.0);
    }

    #[test]
    fn test_item_without_raters_predicts_zero() {
        let (library, similarity) = scenario();
        let mut library = (*library).clone();
        library.insert_item("C");
        let predictor = Predictor::new(Arc::new(library), similarity);

        assert_eq!(predictor.predict(&"u0", &"C").unwrap(), 0.0);
    }

    #[test]
    fn test_negative_similarity_flips_deviation() {
        let (library, _) = scenario();
        let similarity = SimilarityTable::new().with_score("u0", "u1", -1.0);
        let config = CfConfig::default().with_neighborhood_size(1);
        let predictor = Predictor::with_config(library, Arc::new(similarity), config).unwrap();

        // Only u1 is kept: 3.0 + (-1.0 * 0.5) / 1.0
        assert_eq!(predictor.predict(&"u0", &"A").unwrap(), 2.5);
    }

    #[test]
    fn test_neighborhood_capacity_limits_influence() {
        let (library, similarity) = scenario();
        let config = CfConfig::default().with_neighborhood_size(1);
        let predictor = Predictor::with_config(library, similarity, config).unwrap();

        let breakdown = predictor.predict_detailed(&"u0", &"A").unwrap();

        // Only u1 (|0.8|) survives: 3.0 + 0.8 * 0.5 / 0.8
        assert_eq!(breakdown.neighbors.len(), 1);
        assert_eq!(breakdown.neighbors[0].user, "u1");
        assert_eq!(breakdown.prediction, 3.5);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let library = InMemoryLibrary::from_ratings([
            ("u0", "B", 3.0),
            ("u1", "A", 4.0),
            ("u1", "B", 2.9133),
        ])
        .unwrap();
        // u1 mean = 3.45665, deviation on A = 0.54335 -> raw 3.54335
        let predictor = Predictor::new(Arc::new(library), Arc::new(|_: &&str, _: &&str| 0.5));

        let breakdown = predictor.predict_detailed(&"u0", &"A").unwrap();

        assert!(breakdown.raw > 3.5433);
        assert_eq!(breakdown.prediction, 3.543);
    }

    #[test]
    fn test_unknown_user_and_item() {
        let (library, similarity) = scenario();
        let predictor = Predictor::new(library, similarity);

        assert!(matches!(
            predictor.predict(&"nobody", &"A"),
            Err(CfError::UnknownUser(_))
        ));
        assert!(matches!(
            predictor.predict(&"u0", &"Z"),
            Err(CfError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_non_finite_similarity_is_rejected() {
        let (library, _) = scenario();
        let predictor = Predictor::new(library, Arc::new(|_: &&str, _: &&str| f64::NAN));

        let result = predictor.predict(&"u0", &"A");

        assert!(matches!(result, Err(CfError::InvalidSimilarity { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let (library, similarity) = scenario();
        let config = CfConfig::default().with_neighborhood_size(0);

        assert!(Predictor::with_config(library, similarity, config).is_err());
    }

    #[test]
    fn test_inconsistent_corpus_propagates_missing_rating() {
        // Item 100 lists user 1 as a rater, but user 1 only rated 200
        let corpus = StubCorpus {
            item_raters: HashMap::from([(100, HashSet::from([1]))]),
            ratings: HashMap::from([(0, HashMap::new()), (1, HashMap::from([(200, 4.0)]))]),
            means: HashMap::from([(0, 3.0), (1, 3.0)]),
        };
        let predictor = Predictor::new(Arc::new(corpus), Arc::new(|_: &u32, _: &u32| 0.7));

        let err = predictor.predict(&0, &100).unwrap_err();

        assert!(matches!(err, CfError::MissingRating { .. }));
        assert!(err.is_integrity_fault());
    }

    #[test]
    fn test_neighbor_without_mean_is_unknown_user() {
        let corpus = StubCorpus {
            item_raters: HashMap::from([(100, HashSet::from([1]))]),
            ratings: HashMap::from([(0, HashMap::new()), (1, HashMap::from([(100, 4.0)]))]),
            means: HashMap::from([(0, 3.0)]),
        };
        let predictor = Predictor::new(Arc::new(corpus), Arc::new(|_: &u32, _: &u32| 0.7));

        let err = predictor.predict(&0, &100).unwrap_err();

        assert!(matches!(err, CfError::UnknownUser(ref user) if user == "1"));
    }
}
