//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the uniform rendered error view with
//! the right status code. Anything that reaches this translator without a
//! specific message or status gets the defaults.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};

pub use crate::domain::ApiResult;

/// Apology shown when an unexpected failure carries no useful message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Oh No, Something Went Wrong!";

/// Message used for requests matching no declared route.
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page Not Found!";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render the uniform error view.
///
/// Kept framework-light on purpose: the error page must never depend on the
/// renderer port, because renderer failures land here too.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let status_line = status.as_u16();
    let escaped = escape(message);
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>RestoFind: error</title></head>\n\
         <body>\n<main>\n<h1>{escaped}</h1>\n<p>Status {status_line}</p>\n\
         <p><a href=\"/restaurants\">Back to all restaurants</a></p>\n</main>\n</body>\n</html>\n"
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn user_facing_message(err: &Error) -> &str {
    // Internal details go to the log, never to the client.
    if matches!(err.code(), ErrorCode::InternalError) {
        DEFAULT_ERROR_MESSAGE
    } else {
        err.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = %self.message(), "unexpected failure reached the terminal handler");
        }
        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(error_page(self.status_code(), user_facing_message(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(DEFAULT_ERROR_MESSAGE)
    }
}
