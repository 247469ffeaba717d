//! Handlers for the authenticated account.
//!
//! Every route here sits behind [`require_authentication`], so the
//! [`AuthState`] extractor reads the identifier cached by the middleware.
//!
//! [`require_authentication`]: crate::middleware::require_authentication

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthState, Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::UpdateAccount;
use crate::handler::response::{Account, UpdatedAccount};
use crate::service::{AccountService, ServiceState};

/// Tracing target for account operations.
const TRACING_TARGET: &str = "gotalk_server::handler::accounts";

/// Returns the authenticated account.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id()))]
async fn get_own_account(
    State(account_service): State<AccountService>,
    auth_state: AuthState,
) -> Result<Json<Account>> {
    let account = account_service.get_by_id(auth_state.account_id()).await?;
    Ok(Json(account.into()))
}

/// Changes the username, the password or both.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id()))]
async fn update_own_account(
    State(account_service): State<AccountService>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<UpdateAccount>,
) -> Result<Json<UpdatedAccount>> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = request.username.is_some(),
        password = request.password.is_some(),
        "account update requested"
    );

    let account = account_service
        .update_account(auth_state.account_id(), request.into_account_update())
        .await?;

    Ok(Json(account.into()))
}

/// Permanently deletes the authenticated account.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id()))]
async fn delete_own_account(
    State(account_service): State<AccountService>,
    auth_state: AuthState,
) -> Result<StatusCode> {
    account_service
        .delete_account(auth_state.account_id())
        .await?;

    tracing::info!(target: TRACING_TARGET, "account deleted by owner");
    Ok(StatusCode::NO_CONTENT)
}

/// Returns a [`Router`] with all account routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route(
        "/me",
        get(get_own_account)
            .patch(update_own_account)
            .delete(delete_own_account),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::handler::test::{create_test_server, register_and_login};

    #[tokio::test]
    async fn account_lifecycle() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = register_and_login(&server, "alice", "Str0ng!Passw0rd").await;

        let response = server.get("/me").authorization_bearer(&token).await;
        response.assert_status_ok();
        let account = response.json::<Value>();
        assert_eq!(account["username"], "alice");
        assert_eq!(account["createdAt"], account["updatedAt"]);

        let response = server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "username": "alice2" }))
            .await;
        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["id"], account["id"]);
        assert_eq!(updated["username"], "alice2");
        assert!(updated.get("createdAt").is_none());

        server
            .delete("/me")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        // The token outlives the account it was issued for.
        server
            .get("/me")
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();

        server
            .post("/login")
            .json(&json!({ "username": "alice2", "password": "Str0ng!Passw0rd" }))
            .await
            .assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn password_change_takes_effect() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = register_and_login(&server, "alice", "Str0ng!Passw0rd").await;

        server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "password": "N3w!Passw0rdX" }))
            .await
            .assert_status_ok();

        server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "Str0ng!Passw0rd" }))
            .await
            .assert_status_unauthorized();

        server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "N3w!Passw0rdX" }))
            .await
            .assert_status_ok();

        Ok(())
    }

    #[tokio::test]
    async fn update_rejections() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = register_and_login(&server, "alice", "Str0ng!Passw0rd").await;
        register_and_login(&server, "bob", "Str0ng!Passw0rd").await;

        server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({}))
            .await
            .assert_status_bad_request();

        let response = server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "password": "weak" }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["message"],
            "password must be at least 10 characters long"
        );

        server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "username": "bob" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        let response = server.get("/me").authorization_bearer(&token).await;
        assert_eq!(response.json::<Value>()["username"], "alice");

        Ok(())
    }

    #[tokio::test]
    async fn missing_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/me").await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "missing_auth_token");

        server.delete("/me").await.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn wrong_scheme_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = register_and_login(&server, "alice", "Str0ng!Passw0rd").await;

        let response = server
            .get("/me")
            .add_header("authorization", format!("Basic {token}"))
            .await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = register_and_login(&server, "alice", "Str0ng!Passw0rd").await;

        let signature_start = token.rfind('.').map_or(0, |dot| dot + 1);
        let mut tampered = token.clone();
        let replacement = if tampered[signature_start..].starts_with('A') { "B" } else { "A" };
        tampered.replace_range(signature_start..signature_start + 1, replacement);

        let response = server.get("/me").authorization_bearer(&tampered).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "unauthorized");

        server
            .get("/me")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        Ok(())
    }
}
