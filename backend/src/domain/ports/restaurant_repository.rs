//! Port abstraction for listing persistence adapters and their errors.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::restaurant::{Restaurant, RestaurantId};
use crate::domain::review::ReviewId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "restaurant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "restaurant repository query failed: {message}",
    }
}

/// Listing persistence port.
///
/// `push_review` and `pull_review` mutate the reference list atomically on
/// the stored record so two concurrent review operations cannot lose each
/// other's writes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Fetch every listing, in insertion order.
    async fn find_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Insert a new listing record.
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError>;

    /// Replace an existing listing record.
    async fn update(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError>;

    /// Remove a listing, returning the removed record when it existed.
    async fn delete(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Append a review reference to the stored listing.
    async fn push_review(
        &self,
        id: &RestaurantId,
        review: &ReviewId,
    ) -> Result<(), RestaurantPersistenceError>;

    /// Remove every occurrence of a review reference from the stored listing.
    async fn pull_review(
        &self,
        id: &RestaurantId,
        review: &ReviewId,
    ) -> Result<(), RestaurantPersistenceError>;
}
