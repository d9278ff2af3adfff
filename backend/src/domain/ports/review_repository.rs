//! Port abstraction for review persistence adapters and their errors.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::review::{Review, ReviewId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

/// Review persistence port.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError>;

    /// Insert a new review record.
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError>;

    /// Remove a review record; removing an absent review is not an error.
    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewPersistenceError>;

    /// Remove every review whose id appears in the set.
    async fn delete_many(&self, ids: &[ReviewId]) -> Result<(), ReviewPersistenceError>;
}
