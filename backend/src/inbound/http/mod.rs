//! HTTP inbound adapter exposing the server-rendered routes.

pub mod error;
pub mod guards;
pub mod health;
pub(crate) mod pages;
pub mod restaurants;
pub mod reviews;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
