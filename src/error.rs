//! Error types for geomark.

use crate::validation::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeomarkError>;

#[derive(Debug, Error)]
pub enum GeomarkError {
    /// A geohash contained a character outside the base-32 alphabet.
    #[error("invalid geohash character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// A coordinate was non-finite or outside the geographic ranges.
    #[error("coordinate out of range: {0}")]
    OutOfRange(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The covering traversal visited more cells than the configured limit.
    #[error("radius query needs more than {limit} covering cells")]
    QueryTooBroad { limit: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    Config(String),
}
