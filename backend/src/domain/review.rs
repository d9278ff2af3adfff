//! Review data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors returned by the review value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    EmptyId,
    InvalidId,
    EmptyBody,
    RatingOutOfRange { value: i64 },
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "review id must not be empty"),
            Self::InvalidId => write!(f, "review id must be a valid UUID"),
            Self::EmptyBody => write!(f, "review body must not be empty"),
            Self::RatingOutOfRange { value } => {
                write!(
                    f,
                    "rating must be between {RATING_MIN} and {RATING_MAX}, got {value}"
                )
            }
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Stable review identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Validate and construct a [`ReviewId`] from borrowed input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, ReviewValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(ReviewValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| ReviewValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`ReviewId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum accepted rating.
pub const RATING_MIN: i64 = 1;
/// Maximum accepted rating.
pub const RATING_MAX: i64 = 5;

/// Integer rating between [`RATING_MIN`] and [`RATING_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i64);

impl Rating {
    /// Validate and construct a [`Rating`].
    pub fn new(value: i64) -> Result<Self, ReviewValidationError> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::RatingOutOfRange { value })
        }
    }

    /// Numeric value of the rating.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Validated review fields accepted from a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: Rating,
    pub body: String,
}

impl ReviewDraft {
    /// Validate raw field values into a draft.
    pub fn try_new(rating: i64, body: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ReviewValidationError::EmptyBody);
        }
        Ok(Self {
            rating: Rating::new(rating)?,
            body,
        })
    }
}

/// Review aggregate.
///
/// ## Invariants
/// - `author` is set once at creation and never mutated.
/// - A review belongs to exactly one listing; the creating operation pushes
///   the review's id into that listing's review list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: ReviewId,
    rating: Rating,
    body: String,
    author: UserId,
}

impl Review {
    /// Create a new review authored by `author`.
    pub fn create(draft: ReviewDraft, author: UserId) -> Self {
        Self {
            id: ReviewId::random(),
            rating: draft.rating,
            body: draft.body,
            author,
        }
    }

    /// Stable review identifier.
    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    /// Integer rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Free-text body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Raw owner reference; never populated before comparison.
    pub fn author(&self) -> &UserId {
        &self.author
    }
}
