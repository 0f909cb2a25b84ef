use std::fmt::Debug;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CfError>;

#[derive(Debug, Error)]
pub enum CfError {
    /// A user is listed as a rater of an item but has no rating for it.
    #[error("Missing rating: user {user} is listed as a rater of item {item} but has no rating for it")]
    MissingRating { user: String, item: String },

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Invalid threshold count: {0} (must be at least 1)")]
    InvalidThreshold(usize),

    #[error("Invalid similarity between {user} and {other}: {value}")]
    InvalidSimilarity {
        user: String,
        other: String,
        value: f64,
    },

    #[error("Invalid rating by {user} for {item}: {value}")]
    InvalidRating {
        user: String,
        item: String,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
}

impl CfError {
    pub(crate) fn missing_rating(user: &impl Debug, item: &impl Debug) -> Self {
        CfError::MissingRating {
            user: format!("{:?}", user),
            item: format!("{:?}", item),
        }
    }

    pub(crate) fn unknown_user(user: &impl Debug) -> Self {
        CfError::UnknownUser(format!("{:?}", user))
    }

    pub(crate) fn unknown_item(item: &impl Debug) -> Self {
        CfError::UnknownItem(format!("{:?}", item))
    }

    /// Faults that originate in the external corpus or similarity provider
    /// rather than in the caller's input.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            CfError::MissingRating { .. } | CfError::InvalidSimilarity { .. }
        )
    }
}
