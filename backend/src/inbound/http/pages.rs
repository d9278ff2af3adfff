//! Shared helpers for handlers that respond with rendered pages.

use actix_web::HttpResponse;
use serde_json::{json, Value};

use crate::domain::ports::UserRepository;
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Render `template` with the given context through the renderer port.
///
/// The session's flashes are drained into the context and the current user
/// (if any) is attached, so every page can show login state and one-shot
/// messages without each handler repeating the plumbing.
pub(crate) async fn render_page(
    state: &HttpState,
    session: &SessionContext,
    template: &str,
    mut context: Value,
) -> Result<HttpResponse, Error> {
    let Some(slots) = context.as_object_mut() else {
        return Err(Error::internal("page context must be a JSON object"));
    };
    slots.insert(
        "flashes".to_owned(),
        serde_json::to_value(session.take_flashes()?)
            .map_err(|err| Error::internal(err.to_string()))?,
    );
    slots.insert(
        "current_user".to_owned(),
        match session.user_id()? {
            Some(id) => json!(display_name(state.users.as_ref(), &id).await?),
            None => Value::Null,
        },
    );

    let html = state
        .renderer
        .render(template, &context)
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Resolve a user id to its display name, falling back to the raw id when
/// the record has gone missing (a stale session should not break rendering).
pub(crate) async fn display_name(
    users: &dyn UserRepository,
    id: &UserId,
) -> Result<String, Error> {
    let user = users
        .find_by_id(id)
        .await
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(match user {
        Some(user) => user.username().to_string(),
        None => id.to_string(),
    })
}
