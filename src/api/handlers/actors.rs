/*
 * Responsibility
 * - /actors 系 CRUD handler (認可ゲート通過後にだけ呼ばれる)
 * - Failure policy
 *   - list:   store failure -> 500
 *   - create: body / validation / store failure -> 422
 *   - update: unknown id -> 404 (body より先に確認), body / validation / store failure -> 400
 *   - delete: unknown id -> 404, store failure -> 422
 */
use axum::{Json, body::Bytes, extract::State};

use crate::{
    api::{
        dto::{
            actors::{ActorListResponse, ActorResponse, CreateActorRequest, UpdateActorRequest},
            envelope::{Created, Deleted, Updated},
        },
        extractors::{ActorId, AuthCtxExtractor},
        handlers::parse_json,
    },
    error::AppError,
    repos::RepoError,
    state::AppState,
};

pub async fn list_actors(
    AuthCtxExtractor(_ctx): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<Json<ActorListResponse>, AppError> {
    let rows = state.store.list_actors().await?;

    Ok(Json(ActorListResponse {
        success: true,
        actors: rows.into_iter().map(ActorResponse::from).collect(),
    }))
}

pub async fn create_actor(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Created<ActorResponse>>, AppError> {
    let req: CreateActorRequest = parse_json(&body, false).map_err(AppError::unprocessable)?;
    req.validate().map_err(AppError::unprocessable)?;

    let row = state.store.create_actor(req.into()).await.map_err(|e| {
        tracing::error!(error = ?e, "create actor failed");
        AppError::unprocessable("unprocessable")
    })?;

    tracing::info!(actor_id = row.id, sub = ctx.subject(), "actor created");
    Ok(Json(Created::new(row.into())))
}

pub async fn update_actor(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    actor_id: ActorId,
    body: Bytes,
) -> Result<Json<Updated<ActorResponse>>, AppError> {
    let store_failed = |e: RepoError| {
        tracing::error!(error = ?e, actor_id = actor_id.id, "update actor failed");
        AppError::bad_request("unable to update actor")
    };

    state
        .store
        .get_actor(actor_id.id)
        .await
        .map_err(store_failed)?
        .ok_or(AppError::not_found("actor"))?;

    let req: UpdateActorRequest = parse_json(&body, true).map_err(AppError::bad_request)?;
    req.validate().map_err(AppError::bad_request)?;

    // Deleted between the lookup and the update: still "not found".
    let row = state
        .store
        .update_actor(actor_id.id, req.into())
        .await
        .map_err(store_failed)?
        .ok_or(AppError::not_found("actor"))?;

    tracing::info!(actor_id = row.id, sub = ctx.subject(), "actor updated");
    Ok(Json(Updated::new(row.into())))
}

pub async fn delete_actor(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    actor_id: ActorId,
) -> Result<Json<Deleted<ActorResponse>>, AppError> {
    let row = state
        .store
        .delete_actor(actor_id.id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, actor_id = actor_id.id, "delete actor failed");
            AppError::unprocessable("unprocessable")
        })?
        .ok_or(AppError::not_found("actor"))?;

    tracing::info!(actor_id = row.id, sub = ctx.subject(), "actor deleted");
    Ok(Json(Deleted::new(row.into())))
}
