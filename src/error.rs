//! Error handling for the calculator

/// Calculator error type
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Day {index} is out of range (trip has {len} days)")]
    DayOutOfRange { index: usize, len: usize },

    #[error("Unknown cost category: {0}")]
    UnknownCategory(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown quote variant: {0}")]
    UnknownVariant(String),

    #[error("Meal '{key}' does not belong to the {slot} slot")]
    InvalidMealKey { slot: &'static str, key: String },

    #[error("Group size must be at least one traveler")]
    NoTravelers,

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
