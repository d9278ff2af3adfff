//! Adapter wiring for the HTTP state bundle.

use std::sync::Arc;

use crate::domain::{AccountService, ListingService};
use crate::inbound::http::state::HttpState;
use crate::outbound::{
    HtmlRenderer, InMemoryImageStore, InMemoryRestaurantRepository, InMemoryReviewRepository,
    InMemoryUserRepository, Sha256CredentialHasher,
};

/// Concrete in-memory adapters behind one [`HttpState`].
///
/// The handles stay accessible after building the state, so tests can assert
/// directly on store contents (review counts, recorded image deletes) after
/// driving requests through the app.
#[derive(Clone)]
pub struct InMemoryAdapters {
    pub restaurants: Arc<InMemoryRestaurantRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub images: Arc<InMemoryImageStore>,
}

impl Default for InMemoryAdapters {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdapters {
    pub fn new() -> Self {
        Self {
            restaurants: Arc::new(InMemoryRestaurantRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            images: Arc::new(InMemoryImageStore::new()),
        }
    }

    /// Assemble the handler dependency bundle over these adapters.
    pub fn http_state(&self) -> HttpState {
        let listings = ListingService::new(
            self.restaurants.clone(),
            self.reviews.clone(),
            self.images.clone(),
        );
        let accounts = AccountService::new(self.users.clone(), Arc::new(Sha256CredentialHasher::new()));
        HttpState::new(
            self.restaurants.clone(),
            self.reviews.clone(),
            self.users.clone(),
            listings,
            accounts,
            Arc::new(HtmlRenderer::new()),
        )
    }
}
