//! In-memory persistence adapters.
//!
//! Back the repository ports with `tokio::sync::RwLock`-guarded collections.
//! Used by the development server and by the integration harness, which
//! additionally relies on the inspection accessors to assert on store state
//! after a request completes.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    RestaurantPersistenceError, RestaurantRepository, ReviewPersistenceError, ReviewRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Restaurant, RestaurantId, Review, ReviewId, User, UserId, Username};

/// Listing store preserving insertion order for the index page.
#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    records: RwLock<Vec<Restaurant>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored listings.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Whether a listing with this id is currently stored.
    pub async fn contains(&self, id: &RestaurantId) -> bool {
        self.records.read().await.iter().any(|r| r.id() == id)
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn find_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        Ok(self.records.read().await.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        self.records.write().await.push(restaurant.clone());
        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == restaurant.id()) else {
            return Err(RestaurantPersistenceError::query(format!(
                "no listing with id {} to update",
                restaurant.id()
            )));
        };
        *slot = restaurant.clone();
        Ok(())
    }

    async fn delete(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|r| r.id() == id);
        Ok(position.map(|index| records.remove(index)))
    }

    async fn push_review(
        &self,
        id: &RestaurantId,
        review: &ReviewId,
    ) -> Result<(), RestaurantPersistenceError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Err(RestaurantPersistenceError::query(format!(
                "no listing with id {id} to push a review onto"
            )));
        };
        slot.push_review(*review);
        Ok(())
    }

    async fn pull_review(
        &self,
        id: &RestaurantId,
        review: &ReviewId,
    ) -> Result<(), RestaurantPersistenceError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Err(RestaurantPersistenceError::query(format!(
                "no listing with id {id} to pull a review from"
            )));
        };
        slot.pull_review(review);
        Ok(())
    }
}

/// Review store keyed by id.
#[derive(Default)]
pub struct InMemoryReviewRepository {
    records: RwLock<HashMap<ReviewId, Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reviews.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError> {
        self.records
            .write()
            .await
            .insert(*review.id(), review.clone());
        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewPersistenceError> {
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[ReviewId]) -> Result<(), ReviewPersistenceError> {
        let mut records = self.records.write().await;
        for id in ids {
            records.remove(id);
        }
        Ok(())
    }
}

/// User store enforcing username and email uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut records = self.records.write().await;
        if records.iter().any(|u| u.username() == user.username()) {
            return Err(UserPersistenceError::duplicate_username());
        }
        if records.iter().any(|u| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        records.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.records.read().await.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CredentialHash, Email, RestaurantDraft, ReviewDraft};

    fn listing() -> Restaurant {
        Restaurant::create(
            RestaurantDraft::try_new("Spice Route", "Kolkata", 320.0, "Great momos")
                .expect("valid draft"),
            Vec::new(),
            UserId::random(),
        )
    }

    fn user(name: &str, email: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(name).expect("valid username"),
            Email::new(email).expect("valid email"),
            CredentialHash::new("salt$digest"),
        )
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let repo = InMemoryRestaurantRepository::new();
        let first = listing();
        let second = listing();
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");

        let all = repo.find_all().await.expect("find all");
        assert_eq!(
            all.iter().map(Restaurant::id).collect::<Vec<_>>(),
            vec![first.id(), second.id()]
        );
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record_once() {
        let repo = InMemoryRestaurantRepository::new();
        let record = listing();
        repo.insert(&record).await.expect("insert");

        let removed = repo.delete(record.id()).await.expect("delete");
        assert_eq!(removed.as_ref().map(Restaurant::id), Some(record.id()));
        let again = repo.delete(record.id()).await.expect("second delete");
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn push_and_pull_review_mutate_the_stored_record() {
        let repo = InMemoryRestaurantRepository::new();
        let record = listing();
        repo.insert(&record).await.expect("insert");
        let review_id = ReviewId::random();

        repo.push_review(record.id(), &review_id).await.expect("push");
        let stored = repo
            .find_by_id(record.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.reviews(), &[review_id]);

        repo.pull_review(record.id(), &review_id).await.expect("pull");
        let stored = repo
            .find_by_id(record.id())
            .await
            .expect("find")
            .expect("present");
        assert!(stored.reviews().is_empty());
    }

    #[tokio::test]
    async fn delete_many_removes_the_whole_set() {
        let repo = InMemoryReviewRepository::new();
        let author = UserId::random();
        let reviews: Vec<Review> = (0..3)
            .map(|_| Review::create(ReviewDraft::try_new(4, "ok").expect("draft"), author))
            .collect();
        for review in &reviews {
            repo.insert(review).await.expect("insert");
        }

        let ids: Vec<ReviewId> = reviews.iter().map(|r| *r.id()).collect();
        repo.delete_many(&ids).await.expect("delete many");
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("asha", "asha@example.com"))
            .await
            .expect("insert");

        let err = repo
            .insert(&user("asha", "other@example.com"))
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, UserPersistenceError::DuplicateUsername));

        let err = repo
            .insert(&user("other", "asha@example.com"))
            .await
            .expect_err("duplicate email");
        assert!(matches!(err, UserPersistenceError::DuplicateEmail));
    }
}
