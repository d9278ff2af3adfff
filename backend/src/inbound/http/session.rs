//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers and guards only
//! deal with domain-friendly operations: the authenticated user id, one-shot
//! flash messages, and the post-login return-to slot.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const RETURN_TO_KEY: &str = "return_to";
const FLASH_SUCCESS_KEY: &str = "flash.success";
const FLASH_ERROR_KEY: &str = "flash.error";

/// One-shot messages drained from the session for the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashes {
    pub success: Vec<String>,
    pub error: Vec<String>,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::parse(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Drop the authenticated user from the session, keeping flashes alive.
    pub fn clear_user(&self) {
        self.0.remove(USER_ID_KEY);
    }

    /// Rotate the session identity after a successful login.
    ///
    /// Mirrors the login handshake clearing ephemeral session state: callers
    /// must capture the return-to slot before invoking this.
    pub fn renew(&self) {
        self.0.renew();
    }

    /// Record the originally requested path for a post-login redirect.
    pub fn set_return_to(&self, path: &str) -> Result<(), Error> {
        self.0
            .insert(RETURN_TO_KEY, path)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Remove and return the post-login redirect target.
    ///
    /// The slot is one-shot: a second call returns `None` until another
    /// redirect is captured.
    pub fn take_return_to(&self) -> Result<Option<String>, Error> {
        let path = self
            .0
            .get::<String>(RETURN_TO_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        self.0.remove(RETURN_TO_KEY);
        Ok(path)
    }

    /// Queue a success flash for the next rendered page.
    pub fn flash_success(&self, message: &str) -> Result<(), Error> {
        self.push_flash(FLASH_SUCCESS_KEY, message)
    }

    /// Queue an error flash for the next rendered page.
    pub fn flash_error(&self, message: &str) -> Result<(), Error> {
        self.push_flash(FLASH_ERROR_KEY, message)
    }

    /// Drain both flash categories, in insertion order.
    pub fn take_flashes(&self) -> Result<Flashes, Error> {
        Ok(Flashes {
            success: self.drain_flash(FLASH_SUCCESS_KEY)?,
            error: self.drain_flash(FLASH_ERROR_KEY)?,
        })
    }

    fn push_flash(&self, key: &str, message: &str) -> Result<(), Error> {
        let mut queued = self
            .0
            .get::<Vec<String>>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or_default();
        queued.push(message.to_owned());
        self.0
            .insert(key, queued)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn drain_flash(&self, key: &str) -> Result<Vec<String>, Error> {
        let queued = self
            .0
            .get::<Vec<String>>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or_default();
        self.0.remove(key);
        Ok(queued)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
