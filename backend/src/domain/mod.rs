//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable, document invariants in each
//! type's Rustdoc, and keep everything here transport agnostic.

pub mod accounts;
pub mod error;
pub mod listings;
pub mod ports;
pub mod restaurant;
pub mod review;
pub mod user;

pub use self::accounts::{AccountService, LOGIN_FAILED_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listings::ListingService;
pub use self::restaurant::{
    Image, ImageUpload, Price, Restaurant, RestaurantDraft, RestaurantId, RestaurantValidationError,
};
pub use self::review::{
    Rating, Review, ReviewDraft, ReviewId, ReviewValidationError, RATING_MAX, RATING_MIN,
};
pub use self::user::{CredentialHash, Email, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
