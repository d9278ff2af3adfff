//! Persistence adapters implementing the repository ports.

pub mod memory;

pub use memory::{InMemoryRestaurantRepository, InMemoryReviewRepository, InMemoryUserRepository};
