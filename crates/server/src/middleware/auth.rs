//! Authentication extractor and session helpers for the admin routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{AdminSession, session_keys};

/// Extractor that requires an authenticated admin session.
///
/// Rejects with `401 {"error": "authentication required"}` when there is no
/// session, the session has no admin record, or the record's
/// `admin_logged_in` flag is not set.
///
/// # Example
///
/// ```rust,ignore
/// async fn stats(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(AppError::authentication_required)?;

        let admin: AdminSession = session
            .get(session_keys::ADMIN)
            .await
            .ok()
            .flatten()
            .filter(|admin: &AdminSession| admin.admin_logged_in)
            .ok_or_else(AppError::authentication_required)?;

        Ok(Self(admin))
    }
}

/// Mark the session as an authenticated admin.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_session(
    session: &Session,
    username: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::ADMIN, AdminSession::logged_in(username))
        .await
}

/// Destroy the session record entirely (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn clear_admin_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use super::*;
    use crate::middleware::AdminSessionStore;

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, ()) = Request::builder()
            .uri("/api/admin/stats")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn session() -> Session {
        Session::new(None, Arc::new(AdminSessionStore::new()), None)
    }

    #[tokio::test]
    async fn test_rejects_without_session_layer() {
        let mut parts = parts_with(None);
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_rejects_anonymous_session() {
        let mut parts = parts_with(Some(session()));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_rejects_cleared_flag() {
        let session = session();
        session
            .insert(
                session_keys::ADMIN,
                AdminSession {
                    admin_logged_in: false,
                    username: "admin".to_string(),
                },
            )
            .await
            .unwrap();

        let mut parts = parts_with(Some(session));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let session = session();
        set_admin_session(&session, "admin").await.unwrap();

        let mut parts = parts_with(Some(session.clone()));
        let RequireAdmin(admin) = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(admin, AdminSession::logged_in("admin"));

        clear_admin_session(&session).await.unwrap();
        let mut parts = parts_with(Some(session));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}
