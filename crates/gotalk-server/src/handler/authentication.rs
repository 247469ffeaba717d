//! Registration and login handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{Login, Normalized, Register};
use crate::handler::response::{AuthToken, RegisteredAccount};
use crate::service::{AccountService, ServiceState, SessionTokens};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "gotalk_server::handler::authentication";

/// Creates a new account.
#[tracing::instrument(skip_all)]
async fn register(
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<Register>,
) -> Result<(StatusCode, Json<RegisteredAccount>)> {
    let username = request.username.normalized_string();

    tracing::trace!(
        target: TRACING_TARGET,
        username = %username,
        "registration attempt"
    );

    let account = account_service
        .register(&username, &request.password)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "account created"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Exchanges credentials for a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(account_service): State<AccountService>,
    State(session_tokens): State<SessionTokens>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<Json<AuthToken>> {
    let username = request.username.normalized_string();

    tracing::trace!(
        target: TRACING_TARGET,
        username = %username,
        "login attempt"
    );

    let account = account_service
        .authenticate(&username, &request.password)
        .await
        .inspect_err(|_| {
            tracing::warn!(
                target: TRACING_TARGET,
                username = %username,
                "login failed"
            );
        })?;

    let issued = session_tokens.issue(account.id)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        expires_at = %issued.expires_at,
        "login successful"
    );

    Ok(Json(issued.into()))
}

/// Returns a [`Router`] with all public authentication routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
