/*
 * Responsibility
 * - /movies 系 CRUD handler
 * - release_date の検証ルールは AppState.release_dates (設定由来)
 * - Failure policy は actors と同じ (create: 422 / update: 400 / delete: 422 / unknown id: 404)
 */
use axum::{Json, body::Bytes, extract::State};

use crate::{
    api::{
        dto::{
            envelope::{Created, Deleted, Updated},
            movies::{CreateMovieRequest, MovieListResponse, MovieResponse, UpdateMovieRequest},
        },
        extractors::{AuthCtxExtractor, MovieId},
        handlers::parse_json,
    },
    error::AppError,
    repos::RepoError,
    state::AppState,
};

pub async fn list_movies(
    AuthCtxExtractor(_ctx): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<Json<MovieListResponse>, AppError> {
    let rows = state.store.list_movies().await?;

    Ok(Json(MovieListResponse {
        success: true,
        movies: rows.into_iter().map(MovieResponse::from).collect(),
    }))
}

pub async fn create_movie(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Created<MovieResponse>>, AppError> {
    let req: CreateMovieRequest = parse_json(&body, false).map_err(AppError::unprocessable)?;
    req.validate(&state.release_dates).map_err(AppError::unprocessable)?;

    let row = state.store.create_movie(req.into()).await.map_err(|e| {
        tracing::error!(error = ?e, "create movie failed");
        AppError::unprocessable("unprocessable")
    })?;

    tracing::info!(movie_id = row.id, sub = ctx.subject(), "movie created");
    Ok(Json(Created::new(row.into())))
}

pub async fn update_movie(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    movie_id: MovieId,
    body: Bytes,
) -> Result<Json<Updated<MovieResponse>>, AppError> {
    let store_failed = |e: RepoError| {
        tracing::error!(error = ?e, movie_id = movie_id.id, "update movie failed");
        AppError::bad_request("unable to update movie")
    };

    state
        .store
        .get_movie(movie_id.id)
        .await
        .map_err(store_failed)?
        .ok_or(AppError::not_found("movie"))?;

    let req: UpdateMovieRequest = parse_json(&body, true).map_err(AppError::bad_request)?;
    req.validate(&state.release_dates).map_err(AppError::bad_request)?;

    // Deleted between the lookup and the update: still "not found".
    let row = state
        .store
        .update_movie(movie_id.id, req.into())
        .await
        .map_err(store_failed)?
        .ok_or(AppError::not_found("movie"))?;

    tracing::info!(movie_id = row.id, sub = ctx.subject(), "movie updated");
    Ok(Json(Updated::new(row.into())))
}

pub async fn delete_movie(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    movie_id: MovieId,
) -> Result<Json<Deleted<MovieResponse>>, AppError> {
    let row = state
        .store
        .delete_movie(movie_id.id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, movie_id = movie_id.id, "delete movie failed");
            AppError::unprocessable("unprocessable")
        })?
        .ok_or(AppError::not_found("movie"))?;

    tracing::info!(movie_id = row.id, sub = ctx.subject(), "movie deleted");
    Ok(Json(Deleted::new(row.into())))
}
