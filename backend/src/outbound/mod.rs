//! Outbound adapters implementing the domain ports against concrete
//! backends: persistence, the image store, credential hashing, and HTML
//! rendering.

pub mod credentials;
pub mod images;
pub mod persistence;
pub mod rendering;

pub use credentials::Sha256CredentialHasher;
pub use images::InMemoryImageStore;
pub use persistence::{
    InMemoryRestaurantRepository, InMemoryReviewRepository, InMemoryUserRepository,
};
pub use rendering::HtmlRenderer;
