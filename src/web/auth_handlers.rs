// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, RegisterForm},
    services::auth_service,
    state::AppState,
    templates::{LoginPage, RegisterPage},
};
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Aviso de sucesso guardado na sessão entre o registo e o login.
const FLASH_KEY: &str = "flash";

// GET /register
pub async fn show_register_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    if auth_service::current_user(&session, &state.db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(Html(RegisterPage::blank().render()?).into_response())
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if auth_service::current_user(&session, &state.db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    // 1. Validação de campos; em caso de falha o formulário volta preenchido
    if let Err(errors) = form.validate() {
        let page = RegisterPage {
            errors,
            username: form.username.clone(),
            email: form.email.clone(),
        };
        return Ok(Html(page.render()?).into_response());
    }

    // 2. Criação da conta; duplicados voltam como erro de campo
    let resultado = auth_service::register_user(
        &state.db_pool,
        state.config.admin_email_prefix.as_deref(),
        form.username.trim(),
        form.email.trim(),
        &form.password,
    )
    .await;

    match resultado {
        Ok(_) => {
            session
                .insert(FLASH_KEY, "Conta criada! Inicie sessão.".to_string())
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao guardar aviso: {e}")))?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(erro @ (AppError::DuplicateUsername | AppError::DuplicateEmail)) => {
            let page = RegisterPage {
                errors: vec![erro.to_string()],
                username: form.username.clone(),
                email: form.email.clone(),
            };
            Ok(Html(page.render()?).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    if auth_service::current_user(&session, &state.db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    // aviso de uso único deixado pelo registo
    let notice: Option<String> = session
        .remove(FLASH_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao ler aviso: {e}")))?;

    let page = LoginPage { error: None, notice };
    Ok(Html(page.render()?).into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match auth_service::authenticate(&state.db_pool, form.email.trim(), &form.password).await {
        Ok(user) => {
            // id novo de sessão antes de a autenticar
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar id: {e}")))?;
            session
                .insert(auth_service::SESSION_USER_KEY, user.id)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao gravar sessão: {e}")))?;

            tracing::info!("✅ Sessão iniciada para '{}'.", user.username);
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            let page = LoginPage {
                error: Some("Email ou senha inválidos.".to_string()),
                notice: None,
            };
            Ok(Html(page.render()?).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao terminar sessão: {e}")))?;
    Ok(Redirect::to("/"))
}
