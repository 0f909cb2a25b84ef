use super::RatingCorpus;
use crate::error::{CfError, Result};
use crate::models::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One (user, item, rating) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord<U, I> {
    pub user: U,
    pub item: I,
    pub rating: f64,
}

/// Serialized form of [`InMemoryLibrary`]
///
/// `items` lists every item, including those nobody has rated yet, so an unrated item
/// still predicts 0 after a reload instead of becoming unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot<U, I> {
    pub items: Vec<I>,
    pub ratings: Vec<RatingRecord<U, I>>,
}

#[derive(Debug, Clone)]
struct UserProfile<I: EntityId> {
    ratings: HashMap<I, f64>,
    sum: f64,
}

impl<I: EntityId> UserProfile<I> {
    fn new() -> Self {
        Self {
            ratings: HashMap::new(),
            sum: 0.0,
        }
    }

    fn rate(&mut self, item: I, rating: f64) {
        if let Some(previous) = self.ratings.insert(item, rating) {
            self.sum -= previous;
        }
        self.sum += rating;
    }

    fn mean(&self) -> f64 {
        self.sum / self.ratings.len() as f64
    }
}

/// In-memory rating corpus
///
/// Keeps the item -> raters index and each user's rating map in step, so the corpus
/// invariant holds by construction. Serializes as a [`LibrarySnapshot`] and is rebuilt
/// (and re-validated) on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    into = "LibrarySnapshot<U, I>",
    try_from = "LibrarySnapshot<U, I>",
    bound(
        serialize = "U: Serialize, I: Serialize",
        deserialize = "U: Deserialize<'de>, I: Deserialize<'de>"
    )
)]
pub struct InMemoryLibrary<U: EntityId, I: EntityId> {
    item_raters: HashMap<I, HashSet<U>>,
    profiles: HashMap<U, UserProfile<I>>,
}

impl<U: EntityId, I: EntityId> Default for InMemoryLibrary<U, I> {
    fn default() -> Self {
        Self {
            item_raters: HashMap::new(),
            profiles: HashMap::new(),
        }
    }
}

impl<U: EntityId, I: EntityId> InMemoryLibrary<U, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ratings(ratings: impl IntoIterator<Item = (U, I, f64)>) -> Result<Self> {
        let mut library = Self::new();
        for (user, item, rating) in ratings {
            library.insert_rating(user, item, rating)?;
        }
        Ok(library)
    }

    /// Record a rating, replacing any earlier rating of the same item by the same user.
    pub fn insert_rating(&mut self, user: U, item: I, rating: f64) -> Result<()> {
        if !rating.is_finite() {
            return Err(CfError::InvalidRating {
                user: format!("{:?}", user),
                item: format!("{:?}", item),
                value: rating,
            });
        }

        self.item_raters
            .entry(item.clone())
            .or_default()
            .insert(user.clone());

        self.profiles
            .entry(user)
            .or_insert_with(UserProfile::new)
            .rate(item, rating);

        Ok(())
    }

    /// Register an item nobody has rated yet.
    pub fn insert_item(&mut self, item: I) {
        self.item_raters.entry(item).or_default();
    }

    pub fn rating(&self, user: &U, item: &I) -> Option<f64> {
        self.profiles
            .get(user)
            .and_then(|profile| profile.ratings.get(item))
            .copied()
    }

    pub fn users(&self) -> impl Iterator<Item = &U> {
        self.profiles.keys()
    }

    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.item_raters.keys()
    }

    pub fn user_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_raters.len()
    }

    pub fn rating_count(&self) -> usize {
        self.profiles
            .values()
            .map(|profile| profile.ratings.len())
            .sum()
    }
}

impl<U: EntityId, I: EntityId> RatingCorpus for InMemoryLibrary<U, I> {
    type User = U;
    type Item = I;

    fn item_raters(&self) -> &HashMap<I, HashSet<U>> {
        &self.item_raters
    }

    fn user_ratings(&self, user: &U) -> Option<&HashMap<I, f64>> {
        self.profiles.get(user).map(|profile| &profile.ratings)
    }

    fn user_mean_rating(&self, user: &U) -> Option<f64> {
        self.profiles.get(user).map(UserProfile::mean)
    }
}

impl<U: EntityId, I: EntityId> From<InMemoryLibrary<U, I>> for LibrarySnapshot<U, I> {
    fn from(library: InMemoryLibrary<U, I>) -> Self {
        let mut items: Vec<I> = library.item_raters.into_keys().collect();
        items.sort();

        let mut ratings: Vec<RatingRecord<U, I>> = library
            .profiles
            .into_iter()
            .flat_map(|(user, profile)| {
                profile
                    .ratings
                    .into_iter()
                    .map(move |(item, rating)| RatingRecord {
                        user: user.clone(),
                        item,
                        rating,
                    })
            })
            .collect();

        ratings.sort_by(|a, b| a.user.cmp(&b.user).then_with(|| a.item.cmp(&b.item)));

        LibrarySnapshot { items, ratings }
    }
}

impl<U: EntityId, I: EntityId> TryFrom<LibrarySnapshot<U, I>> for InMemoryLibrary<U, I> {
    type Error = CfError;

    fn try_from(snapshot: LibrarySnapshot<U, I>) -> Result<Self> {
        let mut library = Self::from_ratings(
            snapshot
                .ratings
                .into_iter()
                .map(|record| (record.user, record.item, record.rating)),
        )?;
        for item in snapshot.items {
            library.insert_item(item);
        }
        Ok(library)
    }
}
