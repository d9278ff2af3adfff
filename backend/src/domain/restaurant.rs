//! Restaurant listing data model.
//!
//! A listing is owned by the user that created it; the author reference is
//! set once at creation and never reassigned. Reviews are held as id
//! references so the listing record stays small and the review records own
//! their content.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::review::ReviewId;
use crate::domain::user::UserId;

/// Validation errors returned by the listing value-object constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantValidationError {
    EmptyId,
    InvalidId,
    EmptyTitle,
    EmptyLocation,
    EmptyDescription,
    NegativePrice { value: f64 },
}

impl fmt::Display for RestaurantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "restaurant id must not be empty"),
            Self::InvalidId => write!(f, "restaurant id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::NegativePrice { value } => {
                write!(f, "price must be greater than or equal to 0, got {value}")
            }
        }
    }
}

impl std::error::Error for RestaurantValidationError {}

/// Stable listing identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    /// Validate and construct a [`RestaurantId`] from borrowed input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, RestaurantValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(RestaurantValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| RestaurantValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`RestaurantId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative listing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate and construct a [`Price`].
    pub fn new(value: f64) -> Result<Self, RestaurantValidationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(RestaurantValidationError::NegativePrice { value })
        }
    }

    /// Numeric value of the price.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = RestaurantValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Remote image reference: storage locator plus storage key.
///
/// ## Invariants
/// - Both fields are required together; an image without a key cannot be
///   deleted from the remote store and an image without a url cannot be
///   rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    url: String,
    file_name: String,
}

impl Image {
    /// Build an image reference from the pair returned by the image store.
    pub fn new(url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
        }
    }

    /// Remote storage locator used when rendering.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Remote storage key used when deleting.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}

/// A file handed to the image store for upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
}

/// Validated listing fields accepted from a create or update request.
///
/// The author and id are deliberately absent: the author comes from the
/// session identity and the id is assigned by the creating operation, so a
/// payload can never reassign either.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub title: String,
    pub location: String,
    pub price: Price,
    pub description: String,
}

impl RestaurantDraft {
    /// Validate raw field values into a draft.
    pub fn try_new(
        title: impl Into<String>,
        location: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Result<Self, RestaurantValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RestaurantValidationError::EmptyTitle);
        }
        let location = location.into();
        if location.trim().is_empty() {
            return Err(RestaurantValidationError::EmptyLocation);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(RestaurantValidationError::EmptyDescription);
        }
        Ok(Self {
            title,
            location,
            price: Price::new(price)?,
            description,
        })
    }
}

/// Restaurant listing aggregate.
///
/// ## Invariants
/// - `author` is set once at creation and never mutated by any operation.
/// - `reviews` holds ids only; insertion order is preserved but carries no
///   meaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    id: RestaurantId,
    title: String,
    location: String,
    price: Price,
    description: String,
    images: Vec<Image>,
    author: UserId,
    reviews: Vec<ReviewId>,
}

impl Restaurant {
    /// Create a new listing owned by `author` with freshly stored images.
    pub fn create(draft: RestaurantDraft, images: Vec<Image>, author: UserId) -> Self {
        Self {
            id: RestaurantId::random(),
            title: draft.title,
            location: draft.location,
            price: draft.price,
            description: draft.description,
            images,
            author,
            reviews: Vec::new(),
        }
    }

    /// Apply an update draft, leaving id, author, images, and reviews alone.
    pub fn apply(&mut self, draft: RestaurantDraft) {
        self.title = draft.title;
        self.location = draft.location;
        self.price = draft.price;
        self.description = draft.description;
    }

    /// Append freshly stored images to the ordered sequence.
    pub fn attach_images(&mut self, images: impl IntoIterator<Item = Image>) {
        self.images.extend(images);
    }

    /// Record a review reference on the listing.
    pub fn push_review(&mut self, review: ReviewId) {
        self.reviews.push(review);
    }

    /// Drop every occurrence of a review reference from the listing.
    pub fn pull_review(&mut self, review: &ReviewId) {
        self.reviews.retain(|held| held != review);
    }

    /// Stable listing identifier.
    pub fn id(&self) -> &RestaurantId {
        &self.id
    }

    /// Listing title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Listing location.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Listing price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Listing description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Ordered image references.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Raw owner reference; never populated before comparison.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Review id references held by the listing.
    pub fn reviews(&self) -> &[ReviewId] {
        &self.reviews
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn draft() -> RestaurantDraft {
        RestaurantDraft::try_new("Bobby Snacks", "Asansol", 250.0, "Best Paneer Chilli")
            .expect("valid draft")
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(99.5, true)]
    #[case(-0.01, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn price_accepts_only_finite_non_negative_values(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(Price::new(value).is_ok(), ok);
    }

    #[rstest]
    #[case("", "Asansol", "desc")]
    #[case("Bobby Snacks", "  ", "desc")]
    #[case("Bobby Snacks", "Asansol", "")]
    fn draft_rejects_blank_fields(
        #[case] title: &str,
        #[case] location: &str,
        #[case] description: &str,
    ) {
        assert!(RestaurantDraft::try_new(title, location, 1.0, description).is_err());
    }

    #[test]
    fn apply_never_touches_the_author() {
        let author = UserId::random();
        let mut listing = Restaurant::create(draft(), Vec::new(), author);
        let update = RestaurantDraft::try_new("New Title", "New Town", 1.0, "Updated")
            .expect("valid draft");
        listing.apply(update);
        assert_eq!(listing.author(), &author);
        assert_eq!(listing.title(), "New Title");
    }

    #[test]
    fn pull_review_drops_every_occurrence() {
        let mut listing = Restaurant::create(draft(), Vec::new(), UserId::random());
        let kept = ReviewId::random();
        let pulled = ReviewId::random();
        listing.push_review(pulled);
        listing.push_review(kept);
        listing.push_review(pulled);
        listing.pull_review(&pulled);
        assert_eq!(listing.reviews(), &[kept]);
    }

    #[test]
    fn restaurant_id_rejects_malformed_input() {
        assert_eq!(
            RestaurantId::parse("not-a-uuid"),
            Err(RestaurantValidationError::InvalidId)
        );
    }
}
