//! Backend entry-point: wires the listings routes over in-memory adapters.

use std::env;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::server::{create_server, InMemoryAdapters, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        ([0, 0, 0, 0], 8080).into(),
    );

    let health_state = web::Data::new(HealthState::new());
    let adapters = InMemoryAdapters::new();
    let server = create_server(health_state.clone(), adapters.http_state(), config)?;

    // Fail liveness as soon as a shutdown signal arrives, so orchestrators
    // stop routing here while actix drains in-flight requests.
    tokio::spawn({
        let health_state = health_state.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                health_state.mark_unhealthy();
            }
        }
    });

    server.await
}
