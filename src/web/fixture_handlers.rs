// src/web/fixture_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::fixture::{MatchForm, StandingForm},
    services::{auth_service, fixture_service},
    state::AppState,
    templates::{HomePage, MatchFormPage, MatchesPage, StandingFormPage},
    web::mw_auth::UserId,
};
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Quantos jogos por disputar aparecem na página inicial.
const HOME_UPCOMING_LIMIT: i64 = 3;

// GET / e GET /home
pub async fn home_page(State(state): State<AppState>) -> AppResult<Response> {
    let upcoming =
        fixture_service::upcoming_matches(&state.db_pool, Some(HOME_UPCOMING_LIMIT)).await?;
    // o próximo jogo é o primeiro da lista já carregada
    let next_match = upcoming.first().cloned();

    let page = HomePage { upcoming, next_match };
    Ok(Html(page.render()?).into_response())
}

// GET /matches — jogos por disputar, resultados e tabela classificativa
pub async fn matches_page(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let user = auth_service::current_user(&session, &state.db_pool).await?;
    let page = MatchesPage {
        upcoming: fixture_service::upcoming_matches(&state.db_pool, None).await?,
        played: fixture_service::played_matches(&state.db_pool).await?,
        table: fixture_service::list_standings(&state.db_pool).await?,
        is_admin: user.is_some_and(|u| u.is_admin),
    };
    Ok(Html(page.render()?).into_response())
}

// --- Gestão de jogos ---

// GET /match/new
pub async fn show_create_match_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let page = MatchFormPage::blank("Agendar Jogo", "/match/new".to_string());
    Ok(Html(page.render()?).into_response())
}

// POST /match/new
pub async fn handle_create_match(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<MatchForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page =
                MatchFormPage::from_form("Agendar Jogo", "/match/new".to_string(), &form, errors);
            return Ok(Html(page.render()?).into_response());
        }
    };

    fixture_service::create_match(&state.db_pool, &user, &input).await?;
    Ok(Redirect::to("/matches").into_response())
}

// GET /match/{id}/update
pub async fn show_update_match_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(match_id): Path<i64>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let m = fixture_service::find_match_by_id(&state.db_pool, match_id).await?;
    let page = MatchFormPage::from_match("Editar Jogo", format!("/match/{match_id}/update"), &m);
    Ok(Html(page.render()?).into_response())
}

// POST /match/{id}/update
pub async fn handle_update_match(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(match_id): Path<i64>,
    Form(form): Form<MatchForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page = MatchFormPage::from_form(
                "Editar Jogo",
                format!("/match/{match_id}/update"),
                &form,
                errors,
            );
            return Ok(Html(page.render()?).into_response());
        }
    };

    fixture_service::update_match(&state.db_pool, &user, match_id, &input).await?;
    Ok(Redirect::to("/matches").into_response())
}

// POST /match/{id}/delete
pub async fn handle_delete_match(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(match_id): Path<i64>,
) -> AppResult<Redirect> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    fixture_service::delete_match(&state.db_pool, &user, match_id).await?;
    Ok(Redirect::to("/matches"))
}

// --- Gestão da tabela classificativa ---

// GET /standing/new
pub async fn show_create_standing_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let page = StandingFormPage::blank("Adicionar Equipa à Tabela", "/standing/new".to_string());
    Ok(Html(page.render()?).into_response())
}

// POST /standing/new
pub async fn handle_create_standing(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<StandingForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page = StandingFormPage::from_form(
                "Adicionar Equipa à Tabela",
                "/standing/new".to_string(),
                &form,
                errors,
            );
            return Ok(Html(page.render()?).into_response());
        }
    };

    match fixture_service::create_standing(&state.db_pool, &user, &input).await {
        Ok(_) => Ok(Redirect::to("/matches").into_response()),
        // posição ocupada volta como erro de campo, não como página de erro
        Err(erro @ AppError::DuplicatePosition) => {
            let page = StandingFormPage::from_form(
                "Adicionar Equipa à Tabela",
                "/standing/new".to_string(),
                &form,
                vec![erro.to_string()],
            );
            Ok(Html(page.render()?).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /standing/{id}/update
pub async fn show_update_standing_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(standing_id): Path<i64>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    auth_service::ensure_admin(&user)?;

    let linha = fixture_service::find_standing_by_id(&state.db_pool, standing_id).await?;
    let page = StandingFormPage::from_standing(
        "Editar Tabela",
        format!("/standing/{standing_id}/update"),
        &linha,
    );
    Ok(Html(page.render()?).into_response())
}

// POST /standing/{id}/update
pub async fn handle_update_standing(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(standing_id): Path<i64>,
    Form(form): Form<StandingForm>,
) -> AppResult<Response> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let page = StandingFormPage::from_form(
                "Editar Tabela",
                format!("/standing/{standing_id}/update"),
                &form,
                errors,
            );
            return Ok(Html(page.render()?).into_response());
        }
    };

    match fixture_service::update_standing(&state.db_pool, &user, standing_id, &input).await {
        Ok(()) => Ok(Redirect::to("/matches").into_response()),
        Err(erro @ AppError::DuplicatePosition) => {
            let page = StandingFormPage::from_form(
                "Editar Tabela",
                format!("/standing/{standing_id}/update"),
                &form,
                vec![erro.to_string()],
            );
            Ok(Html(page.render()?).into_response())
        }
        Err(e) => Err(e),
    }
}

// POST /standing/{id}/delete
pub async fn handle_delete_standing(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(standing_id): Path<i64>,
) -> AppResult<Redirect> {
    let user = auth_service::require_user(&state.db_pool, user_id).await?;
    fixture_service::delete_standing(&state.db_pool, &user, standing_id).await?;
    Ok(Redirect::to("/matches"))
}
