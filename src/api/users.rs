//! Handlers for `/api/users` and the friend sub-resource.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    api::AppJson,
    errors::AppError,
    graph::SocialGraph,
    models::{CreateUserPayload, UpdateUserPayload, User, UserDetail},
    store::DocumentStore,
};

pub async fn list<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = graph.list_users().await?;
    tracing::info!(count = users.len(), "listed users");
    Ok(Json(users))
}

pub async fn create<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<Json<User>, AppError> {
    let user = graph.create_user(payload).await?;
    tracing::info!(user = %user.id, "created user");
    Ok(Json(user))
}

pub async fn get_by_id<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetail>, AppError> {
    let user = graph.get_user(&user_id).await?;
    tracing::info!(user = %user.id, "fetched user");
    Ok(Json(user))
}

pub async fn update<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(user_id): Path<String>,
    AppJson(patch): AppJson<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    let user = graph.update_user(&user_id, patch).await?;
    tracing::info!(user = %user.id, "updated user");
    Ok(Json(user))
}

pub async fn remove<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let user = graph.delete_user(&user_id).await?;
    tracing::info!(user = %user.id, "deleted user");
    Ok(Json(json!({ "message": "User deleted" })))
}

pub async fn add_friend<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path((user_id, friend_id)): Path<(String, String)>,
) -> Result<Json<User>, AppError> {
    let user = graph.add_friend(&user_id, &friend_id).await?;
    tracing::info!(user = %user.id, friend = %friend_id, "added friend");
    Ok(Json(user))
}

pub async fn remove_friend<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path((user_id, friend_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    graph.remove_friend(&user_id, &friend_id).await?;
    tracing::info!(user = %user_id, friend = %friend_id, "removed friend");
    Ok(Json(json!({ "message": "Friend deleted" })))
}
