//! Sequential request guards and the halt type that short-circuits them.
//!
//! Handlers call these in declared order at the top of the function body; the
//! first guard to fail returns a [`Halt`] and `?` stops the chain, so no
//! later guard or handler logic runs. A halt is either a redirect (the flash
//! message has already been queued on the session) or a domain failure routed
//! to the terminal error translator.

use std::fmt;

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::domain::ports::{RestaurantRepository, ReviewRepository};
use crate::domain::{Error, Restaurant, RestaurantId, Review, ReviewId, UserId};
use crate::inbound::http::session::SessionContext;

/// Flash shown when an unauthenticated request hits a protected route.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in!";
/// Flash shown when a well-formed listing id matches nothing.
pub const RESTAURANT_NOT_FOUND_MESSAGE: &str = "Couldn't find that restaurant!";
/// Flash shown when a well-formed review id matches nothing.
pub const REVIEW_NOT_FOUND_MESSAGE: &str = "Couldn't find that review!";
/// Flash shown on any ownership denial; deliberately unspecific.
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to do that!";

/// Outcome that stops a guard chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Redirect the client; any flash was queued before constructing this.
    Redirect(String),
    /// Forward a failure to the terminal error translator.
    Failure(Error),
}

/// Result alias for guard functions and guarded handlers.
pub type GuardResult<T> = Result<T, Halt>;

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(to) => write!(f, "redirect to {to}"),
            Self::Failure(err) => write!(f, "{err}"),
        }
    }
}

impl From<Error> for Halt {
    fn from(err: Error) -> Self {
        Self::Failure(err)
    }
}

impl ResponseError for Halt {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Redirect(_) => StatusCode::SEE_OTHER,
            Self::Failure(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Redirect(to) => see_other(to),
            Self::Failure(err) => err.error_response(),
        }
    }
}

/// Build a `303 See Other` redirect response.
///
/// Used both by halting guards and by handlers redirecting after a
/// successful mutation.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Require an authenticated session identity.
///
/// On failure the full original path (including the query string) is captured
/// for the post-login redirect before bouncing the client to the login page.
pub fn require_authenticated(
    session: &SessionContext,
    req: &HttpRequest,
) -> GuardResult<UserId> {
    match session.user_id()? {
        Some(user) => Ok(user),
        None => {
            session.set_return_to(&req.uri().to_string())?;
            session.flash_error(LOGIN_REQUIRED_MESSAGE)?;
            Err(Halt::Redirect("/login".to_owned()))
        }
    }
}

/// Resolve the listing named by a path id.
///
/// A malformed id is an unexpected failure (the backing store was handed an
/// identifier it cannot look up); a well-formed id with no record is the soft
/// not-found flash-and-redirect.
pub async fn resolve_restaurant(
    restaurants: &dyn RestaurantRepository,
    session: &SessionContext,
    raw_id: &str,
) -> GuardResult<Restaurant> {
    let id = RestaurantId::parse(raw_id)
        .map_err(|err| Error::internal(format!("restaurant lookup failed: {err}")))?;
    let found = restaurants
        .find_by_id(&id)
        .await
        .map_err(|err| Error::internal(err.to_string()))?;
    match found {
        Some(restaurant) => Ok(restaurant),
        None => {
            session.flash_error(RESTAURANT_NOT_FOUND_MESSAGE)?;
            Err(Halt::Redirect("/restaurants".to_owned()))
        }
    }
}

/// Resolve the review named by a path id.
pub async fn resolve_review(
    reviews: &dyn ReviewRepository,
    session: &SessionContext,
    raw_id: &str,
) -> GuardResult<Review> {
    let id = ReviewId::parse(raw_id)
        .map_err(|err| Error::internal(format!("review lookup failed: {err}")))?;
    let found = reviews
        .find_by_id(&id)
        .await
        .map_err(|err| Error::internal(err.to_string()))?;
    match found {
        Some(review) => Ok(review),
        None => {
            session.flash_error(REVIEW_NOT_FOUND_MESSAGE)?;
            Err(Halt::Redirect("/restaurants".to_owned()))
        }
    }
}

/// Require the session identity to own the resolved listing.
///
/// Comparison uses the raw stored author id; the author record is never
/// fetched for this check.
pub fn require_restaurant_author(
    session: &SessionContext,
    restaurant: &Restaurant,
) -> GuardResult<()> {
    match session.user_id()? {
        Some(ref user) if restaurant.author() == user => Ok(()),
        _ => deny(session, restaurant),
    }
}

/// Require the session identity to own the resolved review.
///
/// The parent listing must be resolved before the review (the chain enforces
/// this ordering); denials redirect to the parent's show page.
pub fn require_review_author(
    session: &SessionContext,
    review: &Review,
    parent: &Restaurant,
) -> GuardResult<()> {
    match session.user_id()? {
        Some(ref user) if review.author() == user => Ok(()),
        _ => deny(session, parent),
    }
}

fn deny<T>(session: &SessionContext, restaurant: &Restaurant) -> GuardResult<T> {
    session.flash_error(PERMISSION_DENIED_MESSAGE)?;
    Err(Halt::Redirect(format!("/restaurants/{}", restaurant.id())))
}
