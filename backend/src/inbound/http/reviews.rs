//! Review handlers, nested under their parent listing.
//!
//! The parent listing is always resolved before the review id is touched, so
//! a denial or not-found on the parent wins over anything about the review.

use actix_web::{delete, post, web, HttpRequest, HttpResponse};

use crate::inbound::http::guards::{
    require_authenticated, require_review_author, resolve_restaurant, resolve_review, see_other,
    GuardResult,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_review_payload;

pub const REVIEW_CREATED_MESSAGE: &str = "Successfully created a new review!";
pub const REVIEW_DELETED_MESSAGE: &str = "Successfully deleted the review!";

#[post("/restaurants/{id}/reviews")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> GuardResult<HttpResponse> {
    let author = require_authenticated(&session, &req)?;
    let restaurant = resolve_restaurant(state.restaurants.as_ref(), &session, &path).await?;
    let draft = parse_review_payload(&body)?;

    state.listings.add_review(&restaurant, draft, author).await?;
    session.flash_success(REVIEW_CREATED_MESSAGE)?;
    Ok(see_other(&format!("/restaurants/{}", restaurant.id())))
}

#[delete("/restaurants/{id}/reviews/{review_id}")]
pub async fn destroy(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> GuardResult<HttpResponse> {
    let (restaurant_id, review_id) = path.into_inner();
    require_authenticated(&session, &req)?;
    let restaurant =
        resolve_restaurant(state.restaurants.as_ref(), &session, &restaurant_id).await?;
    let review = resolve_review(state.reviews.as_ref(), &session, &review_id).await?;
    require_review_author(&session, &review, &restaurant)?;

    state
        .listings
        .remove_review(restaurant.id(), review.id())
        .await?;
    session.flash_success(REVIEW_DELETED_MESSAGE)?;
    Ok(see_other(&format!("/restaurants/{}", restaurant.id())))
}
