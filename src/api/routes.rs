/*
 * Responsibility
 * - URL 構造の定義 (/health, /actors, /movies)
 * - handler ごとに認可ゲート (必要 permission 付き) を layer する
 * - 未知のパスは 404, 既知パスの未対応メソッドは 405 (どちらも共通エンベロープ)
 */
use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::{delete, get},
};

use crate::api::handlers::{
    actors::{create_actor, delete_actor, list_actors, update_actor},
    health::health,
    movies::{create_movie, delete_movie, list_movies, update_movie},
};
use crate::error::{method_not_allowed, route_not_found};
use crate::middleware::auth::{AuthGate, authorize};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let gate = |permission: &'static str| {
        middleware::from_fn_with_state(AuthGate::new(state.auth.clone(), permission), authorize)
    };

    Router::new()
        .route("/health", get(health))
        .route(
            "/actors",
            get(list_actors.layer(gate("get:actors")))
                .post(create_actor.layer(gate("post:actors"))),
        )
        .route(
            "/actors/{id}",
            delete(delete_actor.layer(gate("delete:actors")))
                .patch(update_actor.layer(gate("patch:actors"))),
        )
        .route(
            "/movies",
            get(list_movies.layer(gate("get:movies")))
                .post(create_movie.layer(gate("post:movies"))),
        )
        .route(
            "/movies/{id}",
            delete(delete_movie.layer(gate("delete:movies")))
                .patch(update_movie.layer(gate("patch:movies"))),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
}
