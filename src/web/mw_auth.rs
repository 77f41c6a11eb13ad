// src/web/mw_auth.rs
use crate::{error::AppError, services::auth_service};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Identidade autenticada, posta nas extensões do pedido para os handlers
/// protegidos. Os handlers recebem-na explicitamente; não há utilizador
/// global implícito.
#[derive(Clone, Debug)]
pub struct UserId(pub i64);

/// Middleware das rotas de gestão: sem sessão autenticada, redireciona
/// para o login.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<i64>(auth_service::SESSION_USER_KEY).await {
        Ok(Some(user_id)) => {
            request.extensions_mut().insert(UserId(user_id));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Pedido anónimo a rota protegida; a redirecionar para /login.");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(AppError::SessionError(format!(
            "Erro ao verificar sessão: {e}"
        ))),
    }
}
