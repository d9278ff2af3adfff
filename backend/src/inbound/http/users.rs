//! Registration, login, and logout handlers.
//!
//! Account failures are friendly: validation and credential problems flash a
//! message and redirect back to the form, while infrastructure failures
//! propagate to the terminal error translator. The login handler must read
//! the return-to slot before renewing the session, because renewal discards
//! the old session's state.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Email, Error, ErrorCode, Username, LOGIN_FAILED_MESSAGE};
use crate::inbound::http::guards::{see_other, GuardResult, Halt};
use crate::inbound::http::pages::render_page;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const REGISTERED_MESSAGE: &str = "Successfully created a new user! Welcome to RestoFind!";
pub const LOGGED_IN_MESSAGE: &str = "Successfully logged you in! Welcome back to RestoFind!";
pub const LOGGED_OUT_MESSAGE: &str = "Successfully logged you out!";

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn parse_body<T: serde::de::DeserializeOwned>(raw: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(raw)
        .map_err(|err| Error::invalid_request(format!("request body must be valid JSON: {err}")))
}

/// Flash the failure and bounce back to the form.
fn back_to_form(session: &SessionContext, message: &str, form: &str) -> Result<Halt, Error> {
    session.flash_error(message)?;
    Ok(Halt::Redirect(form.to_owned()))
}

#[get("/register")]
pub async fn register_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> GuardResult<HttpResponse> {
    Ok(render_page(&state, &session, "users/register", json!({})).await?)
}

#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> GuardResult<HttpResponse> {
    let request: RegisterRequest = parse_body(&body)?;
    let parsed = Username::new(request.username)
        .map_err(|err| err.to_string())
        .and_then(|username| {
            Email::new(request.email)
                .map(|email| (username, email))
                .map_err(|err| err.to_string())
        });
    let (username, email) = match parsed {
        Ok(parts) => parts,
        Err(message) => return Err(back_to_form(&session, &message, "/register")?),
    };

    match state
        .accounts
        .register(username, email, &request.password)
        .await
    {
        Ok(user) => {
            session.renew();
            session.persist_user(user.id())?;
            session.flash_success(REGISTERED_MESSAGE)?;
            Ok(see_other("/restaurants"))
        }
        Err(err) if err.code() == ErrorCode::InvalidRequest => {
            Err(back_to_form(&session, err.message(), "/register")?)
        }
        Err(err) => Err(Halt::from(err)),
    }
}

#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> GuardResult<HttpResponse> {
    Ok(render_page(&state, &session, "users/login", json!({})).await?)
}

#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> GuardResult<HttpResponse> {
    let request: LoginRequest = parse_body(&body)?;
    // An unparseable username can never match a stored account, so it gets
    // the same unspecific failure as a wrong password.
    let Ok(username) = Username::new(request.username) else {
        return Err(back_to_form(&session, LOGIN_FAILED_MESSAGE, "/login")?);
    };

    match state
        .accounts
        .authenticate(&username, &request.password)
        .await
    {
        Ok(user) => {
            // The slot dies with the old session, so capture it first.
            let return_to = session.take_return_to()?;
            session.renew();
            session.persist_user(user.id())?;
            session.flash_success(LOGGED_IN_MESSAGE)?;
            Ok(see_other(
                return_to.as_deref().unwrap_or("/restaurants"),
            ))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            Err(back_to_form(&session, err.message(), "/login")?)
        }
        Err(err) => Err(Halt::from(err)),
    }
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> GuardResult<HttpResponse> {
    session.clear_user();
    session.flash_success(LOGGED_OUT_MESSAGE)?;
    Ok(see_other("/restaurants"))
}
