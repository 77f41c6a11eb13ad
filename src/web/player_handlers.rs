// src/web/player_handlers.rs
use crate::{
    error::AppResult,
    models::player::PlayerForm,
    services::{auth_service, player_service},
    state::AppState,
    templates::{PlayerFormPage, PlayersPage},
    web::mw_auth::UserId,
};
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /players
pub async fn players_index(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let user = auth_service::current_user(&session, &state.db_pool).await?;
    let page = PlayersPage {
        players: player_service::list_players(&state.db_pool).await?,
        is_admin: user.is_some_and(|u| u.is_admin),
    };
    Ok(Html(page.render()?).into_response())
}

// --- Gestão do plantel ---

// GET /players/new
pub async fn show_create_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let page = PlayerFormPage::blank("Adicionar Jogador", "/players/new".to_string());
    Ok(Html(page.render()?).into_response())
}

// POST /players/new
pub async fn handle_create(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<PlayerForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page = PlayerFormPage::from_form(
                "Adicionar Jogador",
                "/players/new".to_string(),
                &form,
                errors,
            );
            return Ok(Html(page.render()?).into_response());
        }
    };

    player_service::create_player(&state.db_pool, &user, &input).await?;
    Ok(Redirect::to("/players").into_response())
}

// GET /players/{id}/update
pub async fn show_update_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(player_id): Path<i64>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let player = player_service::find_player_by_id(&state.db_pool, player_id).await?;
    let page = PlayerFormPage::from_player(
        "Editar Jogador",
        format!("/players/{player_id}/update"),
        &player,
    );
    Ok(Html(page.render()?).into_response())
}

// POST /players/{id}/update
pub async fn handle_update(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(player_id): Path<i64>,
    Form(form): Form<PlayerForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page = PlayerFormPage::from_form(
                "Editar Jogador",
                format!("/players/{player_id}/update"),
                &form,
                errors,
            );
            return Ok(Html(page.render()?).into_response());
        }
    };

    player_service::update_player(&state.db_pool, &user, player_id, &input).await?;
    Ok(Redirect::to("/players").into_response())
}

// POST /delete/player/{id}
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(player_id): Path<i64>,
) -> AppResult<Redirect> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    player_service::delete_player(&state.db_pool, &user, player_id).await?;
    Ok(Redirect::to("/players"))
}
