//! End-to-end coverage of the guard chain over the in-process app.
//!
//! Drives real HTTP requests through `build_app` with in-memory adapters and
//! asserts on both the responses and the resulting store state.

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use serde_json::json;

use backend::domain::ports::{RestaurantRepository, ReviewRepository};
use backend::domain::{Image, Restaurant, RestaurantDraft, Review, ReviewDraft, UserId};
use backend::inbound::http::health::HealthState;
use backend::server::{build_app, AppDependencies, InMemoryAdapters};

async fn spawn_app(
    adapters: &InMemoryAdapters,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(adapters.http_state()),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }))
    .await
}

fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// The refreshed session cookie when the response rotated it, else the one
/// the request was made with.
fn carry_cookie(res: &ServiceResponse, previous: Cookie<'static>) -> Cookie<'static> {
    session_cookie(res).unwrap_or(previous)
}

fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect target")
        .to_owned()
}

async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Register (and thereby log in) a fresh user, returning the session cookie
/// with the registration flash already drained.
async fn sign_up(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "hunter2",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&res).expect("registration starts a session");

    // Drain the welcome flash so later assertions see only their own.
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/restaurants")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    carry_cookie(&res, cookie)
}

fn seeded_listing(author: UserId, images: Vec<Image>) -> Restaurant {
    Restaurant::create(
        RestaurantDraft::try_new("Bobby Snacks", "Asansol", 250.0, "Best Paneer Chilli")
            .expect("valid draft"),
        images,
        author,
    )
}

#[actix_web::test]
async fn login_redirect_captures_the_path_and_applies_it_once() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/restaurants/new").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    let cookie = session_cookie(&res).expect("redirect stores return-to state");

    // The login page shows the one-shot message.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let cookie = carry_cookie(&res, cookie);
    assert!(body_text(res).await.contains("You must be logged in!"));

    // Register the account out of band, then log in with the session that
    // captured the redirect.
    sign_up(&app, "asha").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .cookie(cookie)
            .set_json(json!({ "username": "asha", "password": "hunter2" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/restaurants/new");
    let cookie = session_cookie(&res).expect("login rotates the session");

    // A second login without a fresh capture falls back to the index.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .cookie(cookie)
            .set_json(json!({ "username": "asha", "password": "hunter2" }))
            .to_request(),
    )
    .await;
    assert_eq!(location(&res), "/restaurants");
}

#[actix_web::test]
async fn wrong_password_bounces_back_to_the_login_form() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;
    sign_up(&app, "asha").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "asha", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    let cookie = session_cookie(&res).expect("failure flash stored on session");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(body_text(res)
        .await
        .contains("Password or username is incorrect"));
}

#[actix_web::test]
async fn non_owner_delete_is_denied_and_the_listing_survives() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let listing = seeded_listing(UserId::random(), Vec::new());
    adapters
        .restaurants
        .insert(&listing)
        .await
        .expect("seed listing");

    let cookie = sign_up(&app, "intruder").await;
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/restaurants/{}", listing.id()))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), format!("/restaurants/{}", listing.id()));
    let cookie = carry_cookie(&res, cookie);

    assert!(adapters.restaurants.contains(listing.id()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/restaurants/{}", listing.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(body_text(res)
        .await
        .contains("You do not have permission to do that!"));
}

#[actix_web::test]
async fn review_creation_flows_through_the_chain() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let listing = seeded_listing(UserId::random(), Vec::new());
    adapters
        .restaurants
        .insert(&listing)
        .await
        .expect("seed listing");

    let cookie = sign_up(&app, "reviewer").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/restaurants/{}/reviews", listing.id()))
            .cookie(cookie.clone())
            .set_json(json!({ "review": { "rating": 3, "body": "ok" } }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), format!("/restaurants/{}", listing.id()));
    let cookie = carry_cookie(&res, cookie);

    assert_eq!(adapters.reviews.len().await, 1);
    let stored = adapters
        .restaurants
        .find_by_id(listing.id())
        .await
        .expect("lookup")
        .expect("listing present");
    assert_eq!(stored.reviews().len(), 1);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/restaurants/{}", listing.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(body_text(res)
        .await
        .contains("Successfully created a new review!"));
}

#[actix_web::test]
async fn absent_listing_is_a_soft_not_found() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let missing = backend::domain::RestaurantId::random();
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/restaurants/{missing}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/restaurants");
    let cookie = session_cookie(&res).expect("flash stored on session");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/restaurants")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(body_text(res).await.contains("Couldn't find that restaurant!"));
}

#[actix_web::test]
async fn malformed_listing_id_is_an_unexpected_error() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    // An id the store could never have issued is not a soft miss: the client
    // gets the rendered apology page instead of a flash and redirect.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/restaurants/not-a-uuid")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.headers().get(header::LOCATION).is_none());
    assert!(body_text(res).await.contains("Oh No, Something Went Wrong!"));
}

#[actix_web::test]
async fn listing_validation_reports_every_missing_field() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;
    let cookie = sign_up(&app, "creator").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/restaurants")
            .cookie(cookie)
            .set_json(json!({ "restaurant": { "title": "Only a title" } }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_text(res).await;
    for fragment in [
        "&quot;location&quot; is required",
        "&quot;price&quot; is required",
        "&quot;description&quot; is required",
    ] {
        assert!(body.contains(fragment), "missing fragment: {fragment}");
    }
    assert!(adapters.restaurants.is_empty().await);
}

#[actix_web::test]
async fn out_of_range_rating_is_rejected() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let listing = seeded_listing(UserId::random(), Vec::new());
    adapters
        .restaurants
        .insert(&listing)
        .await
        .expect("seed listing");

    let cookie = sign_up(&app, "reviewer").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/restaurants/{}/reviews", listing.id()))
            .cookie(cookie)
            .set_json(json!({ "review": { "rating": 9, "body": "ok" } }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(adapters.reviews.is_empty().await);
}

#[actix_web::test]
async fn owner_delete_cascades_to_reviews_and_images() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;
    let cookie = sign_up(&app, "owner").await;

    // Create the listing through the API so it belongs to the session user.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/restaurants")
            .cookie(cookie.clone())
            .set_json(json!({
                "restaurant": {
                    "title": "Bobby Snacks",
                    "location": "Asansol",
                    "price": 250,
                    "description": "Best Paneer Chilli"
                },
                "images": [
                    { "file_name": "listings/one" },
                    { "file_name": "listings/two" }
                ]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let show_path = location(&res);
    let cookie = carry_cookie(&res, cookie);

    let listing_id = show_path
        .rsplit('/')
        .next()
        .map(backend::domain::RestaurantId::parse)
        .expect("listing path")
        .expect("valid id");

    // Seed three reviews by arbitrary authors.
    for _ in 0..3 {
        let review = Review::create(
            ReviewDraft::try_new(4, "tasty").expect("valid draft"),
            UserId::random(),
        );
        adapters.reviews.insert(&review).await.expect("seed review");
        adapters
            .restaurants
            .push_review(&listing_id, review.id())
            .await
            .expect("attach review");
    }

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&show_path)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/restaurants");

    assert!(adapters.restaurants.is_empty().await);
    assert!(adapters.reviews.is_empty().await);
    let destroys = adapters.images.destroy_calls().await;
    assert_eq!(destroys.len(), 2);
    assert!(destroys.iter().all(|call| call.invalidate));
}

#[actix_web::test]
async fn owner_update_proceeds() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;
    let cookie = sign_up(&app, "owner").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/restaurants")
            .cookie(cookie.clone())
            .set_json(json!({ "restaurant": {
                "title": "Bobby Snacks",
                "location": "Asansol",
                "price": 250,
                "description": "Best Paneer Chilli"
            }}))
            .to_request(),
    )
    .await;
    let show_path = location(&res);
    let cookie = carry_cookie(&res, cookie);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&show_path)
            .cookie(cookie)
            .set_json(json!({ "restaurant": {
                "title": "Bobby Snacks & Co",
                "location": "Asansol",
                "price": 300,
                "description": "Now with momos"
            }}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), show_path);

    let all = adapters.restaurants.find_all().await.expect("find all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title(), "Bobby Snacks & Co");
}

#[actix_web::test]
async fn unknown_routes_render_the_not_found_page() {
    let adapters = InMemoryAdapters::new();
    let app = spawn_app(&adapters).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/no-such-page").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res).await.contains("Page Not Found!"));
}
