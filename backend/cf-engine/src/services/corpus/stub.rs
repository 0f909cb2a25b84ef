use super::RatingCorpus;
use std::collections::{HashMap, HashSet};

/// Hand-built corpus whose three views can disagree with each other
#[derive(Debug, Default)]
pub(crate) struct StubCorpus {
    pub item_raters: HashMap<u32, HashSet<u32>>,
    pub ratings: HashMap<u32, HashMap<u32, f64>>,
    pub means: HashMap<u32, f64>,
}

impl RatingCorpus for StubCorpus {
    type User = u32;
    type Item = u32;

    fn item_raters(&self) -> &HashMap<u32, HashSet<u32>> {
        &self.item_raters
    }

    fn user_ratings(&self, user: &u32) -> Option<&HashMap<u32, f64>> {
        self.ratings.get(user)
    }

    fn user_mean_rating(&self, user: &u32) -> Option<f64> {
        self.means.get(user).copied()
    }
}
