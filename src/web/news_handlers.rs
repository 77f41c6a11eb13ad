// src/web/news_handlers.rs
use crate::{
    error::AppResult,
    models::news::{CommentForm, NewsForm},
    services::{auth_service, news_service},
    state::AppState,
    templates::{NewsDetailPage, NewsFormPage, NewsListPage},
    web::mw_auth::UserId,
};
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// --- Páginas públicas ---

// GET /news
pub async fn news_index(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let user = auth_service::current_user(&session, &state.db_pool).await?;
    let page = NewsListPage {
        news: news_service::list_news(&state.db_pool).await?,
        is_admin: user.is_some_and(|u| u.is_admin),
    };
    Ok(Html(page.render()?).into_response())
}

// GET /news/{id}
pub async fn news_detail(
    State(state): State<AppState>,
    session: Session,
    Path(news_id): Path<i64>,
) -> AppResult<Response> {
    let user = auth_service::current_user(&session, &state.db_pool).await?;
    let page = NewsDetailPage {
        post: news_service::find_news_by_id(&state.db_pool, news_id).await?,
        comments: news_service::list_comments(&state.db_pool, news_id).await?,
        logged_in: user.is_some(),
        is_admin: user.is_some_and(|u| u.is_admin),
        errors: Vec::new(),
    };
    Ok(Html(page.render()?).into_response())
}

// POST /news/{id} — novo comentário; visitantes anónimos vão para o login
pub async fn handle_comment(
    State(state): State<AppState>,
    session: Session,
    Path(news_id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let Some(user) = auth_service::current_user(&session, &state.db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    if let Err(errors) = form.validate() {
        let page = NewsDetailPage {
            post: news_service::find_news_by_id(&state.db_pool, news_id).await?,
            comments: news_service::list_comments(&state.db_pool, news_id).await?,
            logged_in: true,
            is_admin: user.is_admin,
            errors,
        };
        return Ok(Html(page.render()?).into_response());
    }

    news_service::create_comment(&state.db_pool, &user, news_id, form.text.trim()).await?;
    Ok(Redirect::to(&format!("/news/{news_id}")).into_response())
}

// --- Gestão (atrás de require_auth; o serviço confirma o estatuto de admin) ---

// GET /news/new
pub async fn show_create_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let page = NewsFormPage::blank("Novo Artigo", "/news/new".to_string());
    Ok(Html(page.render()?).into_response())
}

// POST /news/new
pub async fn handle_create(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<NewsForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    if let Err(errors) = form.validate() {
        let page = NewsFormPage {
            errors,
            title: form.title.clone(),
            image_url: form.image_url.clone(),
            content: form.content.clone(),
            ..NewsFormPage::blank("Novo Artigo", "/news/new".to_string())
        };
        return Ok(Html(page.render()?).into_response());
    }

    news_service::create_news(
        &state.db_pool,
        &user,
        form.title.trim(),
        form.content.trim(),
        form.image_url.trim(),
    )
    .await?;
    Ok(Redirect::to("/news").into_response())
}

// GET /news/{id}/update
pub async fn show_update_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(news_id): Path<i64>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let post = news_service::find_news_by_id(&state.db_pool, news_id).await?;
    let page = NewsFormPage::from_news(
        "Editar Artigo",
        format!("/news/{news_id}/update"),
        &post,
    );
    Ok(Html(page.render()?).into_response())
}

// POST /news/{id}/update
pub async fn handle_update(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(news_id): Path<i64>,
    Form(form): Form<NewsForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    if let Err(errors) = form.validate() {
        let page = NewsFormPage {
            errors,
            title: form.title.clone(),
            image_url: form.image_url.clone(),
            content: form.content.clone(),
            ..NewsFormPage::blank("Editar Artigo", format!("/news/{news_id}/update"))
        };
        return Ok(Html(page.render()?).into_response());
    }

    news_service::update_news(
        &state.db_pool,
        &user,
        news_id,
        form.title.trim(),
        form.content.trim(),
        form.image_url.trim(),
    )
    .await?;
    Ok(Redirect::to(&format!("/news/{news_id}")).into_response())
}

// POST /delete/news/{id}
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(news_id): Path<i64>,
) -> AppResult<Redirect> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    news_service::delete_news(&state.db_pool, &user, news_id).await?;
    Ok(Redirect::to("/news"))
}

// POST /delete/comment/{id}
pub async fn handle_delete_comment(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(comment_id): Path<i64>,
) -> AppResult<Redirect> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    let removido = news_service::delete_comment(&state.db_pool, &user, comment_id).await?;
    Ok(Redirect::to(&format!("/news/{}", removido.news_id)))
}
