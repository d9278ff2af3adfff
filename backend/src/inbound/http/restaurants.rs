//! Listing page and mutation handlers.
//!
//! Every mutating route runs its guards in declared order at the top of the
//! handler; `?` on a guard short-circuits the rest of the chain. Payload
//! bytes are only parsed after authentication has passed, so an anonymous
//! request with a malformed body still gets the login redirect rather than a
//! validation error.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::guards::{
    require_authenticated, require_restaurant_author, resolve_restaurant, see_other, GuardResult,
    RESTAURANT_NOT_FOUND_MESSAGE,
};
use crate::inbound::http::pages::{display_name, render_page};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_restaurant_payload;

pub const RESTAURANT_CREATED_MESSAGE: &str = "Successfully created a new restaurant!";
pub const RESTAURANT_UPDATED_MESSAGE: &str = "Successfully updated the restaurant!";
pub const RESTAURANT_DELETED_MESSAGE: &str = "Successfully deleted the restaurant!";

/// All listings.
#[get("/restaurants")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> GuardResult<HttpResponse> {
    let restaurants = state
        .restaurants
        .find_all()
        .await
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(render_page(
        &state,
        &session,
        "restaurants/index",
        json!({ "restaurants": restaurants }),
    )
    .await?)
}

/// New-listing form. Requires a login; the form itself carries no state.
#[get("/restaurants/new")]
pub async fn new_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> GuardResult<HttpResponse> {
    require_authenticated(&session, &req)?;
    Ok(render_page(&state, &session, "restaurants/new", json!({})).await?)
}

#[post("/restaurants")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    body: web::Bytes,
) -> GuardResult<HttpResponse> {
    let author = require_authenticated(&session, &req)?;
    let (draft, uploads) = parse_restaurant_payload(&body)?;

    let restaurant = state.listings.create(draft, &uploads, author).await?;
    session.flash_success(RESTAURANT_CREATED_MESSAGE)?;
    Ok(see_other(&format!("/restaurants/{}", restaurant.id())))
}

/// Listing detail with its reviews and author names.
#[get("/restaurants/{id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> GuardResult<HttpResponse> {
    let restaurant = resolve_restaurant(state.restaurants.as_ref(), &session, &path).await?;

    let mut reviews = Vec::with_capacity(restaurant.reviews().len());
    for review_id in restaurant.reviews() {
        let Some(review) = state
            .reviews
            .find_by_id(review_id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
        else {
            // A dangling reference from a raced review delete; skip it.
            continue;
        };
        let author = display_name(state.users.as_ref(), review.author()).await?;
        reviews.push(json!({ "review": review, "author": author }));
    }
    let author = display_name(state.users.as_ref(), restaurant.author()).await?;

    Ok(render_page(
        &state,
        &session,
        "restaurants/show",
        json!({ "restaurant": restaurant, "author": author, "reviews": reviews }),
    )
    .await?)
}

#[get("/restaurants/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> GuardResult<HttpResponse> {
    require_authenticated(&session, &req)?;
    let restaurant = resolve_restaurant(state.restaurants.as_ref(), &session, &path).await?;
    require_restaurant_author(&session, &restaurant)?;

    Ok(render_page(
        &state,
        &session,
        "restaurants/edit",
        json!({ "restaurant": restaurant }),
    )
    .await?)
}

#[put("/restaurants/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> GuardResult<HttpResponse> {
    require_authenticated(&session, &req)?;
    let restaurant = resolve_restaurant(state.restaurants.as_ref(), &session, &path).await?;
    require_restaurant_author(&session, &restaurant)?;
    let (draft, uploads) = parse_restaurant_payload(&body)?;

    let restaurant = state.listings.update(restaurant, draft, &uploads).await?;
    session.flash_success(RESTAURANT_UPDATED_MESSAGE)?;
    Ok(see_other(&format!("/restaurants/{}", restaurant.id())))
}

#[delete("/restaurants/{id}")]
pub async fn destroy(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> GuardResult<HttpResponse> {
    require_authenticated(&session, &req)?;
    let restaurant = resolve_restaurant(state.restaurants.as_ref(), &session, &path).await?;
    require_restaurant_author(&session, &restaurant)?;

    // A concurrent delete may beat this request between resolve and here.
    match state.listings.delete(restaurant.id()).await? {
        Some(_) => session.flash_success(RESTAURANT_DELETED_MESSAGE)?,
        None => session.flash_error(RESTAURANT_NOT_FOUND_MESSAGE)?,
    }
    Ok(see_other("/restaurants"))
}
