// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, fixture_handlers, mw_auth, news_handlers, player_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(fixture_handlers::home_page))
        .route("/home", get(fixture_handlers::home_page))
        .route("/matches", get(fixture_handlers::matches_page))
        .route("/news", get(news_handlers::news_index))
        // ver a notícia + publicar comentário (o handler trata anónimos)
        .route(
            "/news/{id}",
            get(news_handlers::news_detail).post(news_handlers::handle_comment),
        )
        .route("/players", get(player_handlers::players_index))
        .route(
            "/register",
            get(auth_handlers::show_register_form).post(auth_handlers::handle_register),
        )
        .route(
            "/login",
            get(auth_handlers::show_login_form).post(auth_handlers::handle_login),
        )
        .route("/logout", get(auth_handlers::handle_logout));

    // --- Rotas de Gestão ---
    // Exigem sessão iniciada; o estatuto de admin é confirmado pelo
    // workflow antes de cada mutação.
    let admin_routes = Router::new()
        .route(
            "/news/new",
            get(news_handlers::show_create_form).post(news_handlers::handle_create),
        )
        .route(
            "/news/{id}/update",
            get(news_handlers::show_update_form).post(news_handlers::handle_update),
        )
        .route("/delete/news/{id}", post(news_handlers::handle_delete))
        .route(
            "/delete/comment/{id}",
            post(news_handlers::handle_delete_comment),
        )
        .route(
            "/players/new",
            get(player_handlers::show_create_form).post(player_handlers::handle_create),
        )
        .route(
            "/players/{id}/update",
            get(player_handlers::show_update_form).post(player_handlers::handle_update),
        )
        .route("/delete/player/{id}", post(player_handlers::handle_delete))
        .route(
            "/match/new",
            get(fixture_handlers::show_create_match_form)
                .post(fixture_handlers::handle_create_match),
        )
        .route(
            "/match/{id}/update",
            get(fixture_handlers::show_update_match_form)
                .post(fixture_handlers::handle_update_match),
        )
        .route(
            "/match/{id}/delete",
            post(fixture_handlers::handle_delete_match),
        )
        .route(
            "/standing/new",
            get(fixture_handlers::show_create_standing_form)
                .post(fixture_handlers::handle_create_standing),
        )
        .route(
            "/standing/{id}/update",
            get(fixture_handlers::show_update_standing_form)
                .post(fixture_handlers::handle_update_standing),
        )
        .route(
            "/standing/{id}/delete",
            post(fixture_handlers::handle_delete_standing),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(app_state)
}
