//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and use-case services and remain testable without
//! real I/O.

use std::sync::Arc;

use crate::domain::ports::{Renderer, RestaurantRepository, ReviewRepository, UserRepository};
use crate::domain::{AccountService, ListingService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
    pub listings: ListingService,
    pub accounts: AccountService,
    pub renderer: Arc<dyn Renderer>,
}

impl HttpState {
    /// Bundle the ports and services the HTTP layer depends on.
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        listings: ListingService,
        accounts: AccountService,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            restaurants,
            reviews,
            users,
            listings,
            accounts,
            renderer,
        }
    }
}
