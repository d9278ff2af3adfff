//! Listing use-cases: create, update, and the orchestrated cascading delete.
//!
//! Deleting a listing is a single explicit sequence owned by this service
//! rather than a store-side trigger: remove the listing record, bulk-delete
//! its reviews, then delete each image from the remote store. Failures in the
//! dependent deletes are surfaced; there is no rollback.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{ImageStore, RestaurantRepository, ReviewRepository};
use crate::domain::restaurant::{Image, ImageUpload, Restaurant, RestaurantDraft, RestaurantId};
use crate::domain::review::{Review, ReviewDraft, ReviewId};
use crate::domain::user::UserId;
use crate::domain::ApiResult;

fn internal(err: impl std::fmt::Display) -> Error {
    Error::internal(err.to_string())
}

/// Listing use-case service over the persistence and image-store ports.
#[derive(Clone)]
pub struct ListingService {
    restaurants: Arc<dyn RestaurantRepository>,
    reviews: Arc<dyn ReviewRepository>,
    images: Arc<dyn ImageStore>,
}

impl ListingService {
    /// Bundle the ports the listing use-cases depend on.
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        reviews: Arc<dyn ReviewRepository>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            restaurants,
            reviews,
            images,
        }
    }

    /// Store the uploads, then persist a new listing owned by `author`.
    pub async fn create(
        &self,
        draft: RestaurantDraft,
        uploads: &[ImageUpload],
        author: UserId,
    ) -> ApiResult<Restaurant> {
        let images = self.store_uploads(uploads).await?;
        let restaurant = Restaurant::create(draft, images, author);
        self.restaurants
            .insert(&restaurant)
            .await
            .map_err(internal)?;
        Ok(restaurant)
    }

    /// Apply an update draft to a resolved listing and persist it.
    ///
    /// Any freshly uploaded images are appended; the author reference is
    /// never touched.
    pub async fn update(
        &self,
        mut restaurant: Restaurant,
        draft: RestaurantDraft,
        uploads: &[ImageUpload],
    ) -> ApiResult<Restaurant> {
        restaurant.apply(draft);
        let images = self.store_uploads(uploads).await?;
        restaurant.attach_images(images);
        self.restaurants
            .update(&restaurant)
            .await
            .map_err(internal)?;
        Ok(restaurant)
    }

    /// Delete a listing and cascade to its reviews and images.
    ///
    /// Returns `None` when the listing was already gone, which callers treat
    /// as a soft not-found: two concurrent deletes of the same listing must
    /// both complete without an unexpected error.
    pub async fn delete(&self, id: &RestaurantId) -> ApiResult<Option<Restaurant>> {
        let Some(restaurant) = self.restaurants.delete(id).await.map_err(internal)? else {
            return Ok(None);
        };

        self.reviews
            .delete_many(restaurant.reviews())
            .await
            .map_err(internal)?;
        for image in restaurant.images() {
            self.images
                .destroy(image.file_name(), true)
                .await
                .map_err(internal)?;
        }
        Ok(Some(restaurant))
    }

    /// Persist a new review and push its reference onto the parent listing.
    pub async fn add_review(
        &self,
        restaurant: &Restaurant,
        draft: ReviewDraft,
        author: UserId,
    ) -> ApiResult<Review> {
        let review = Review::create(draft, author);
        self.reviews.insert(&review).await.map_err(internal)?;
        self.restaurants
            .push_review(restaurant.id(), review.id())
            .await
            .map_err(internal)?;
        Ok(review)
    }

    /// Pull a review reference off the parent listing, then delete the record.
    pub async fn remove_review(
        &self,
        restaurant_id: &RestaurantId,
        review_id: &ReviewId,
    ) -> ApiResult<()> {
        self.restaurants
            .pull_review(restaurant_id, review_id)
            .await
            .map_err(internal)?;
        self.reviews.delete(review_id).await.map_err(internal)?;
        Ok(())
    }

    async fn store_uploads(&self, uploads: &[ImageUpload]) -> ApiResult<Vec<Image>> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            stored.push(self.images.store(upload).await.map_err(internal)?);
        }
        Ok(stored)
    }
}
