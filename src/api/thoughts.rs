//! Handlers for `/api/thoughts` and the reaction sub-resource.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    api::AppJson,
    errors::AppError,
    graph::SocialGraph,
    models::{CreateReactionPayload, CreateThoughtPayload, Thought, UpdateThoughtPayload},
    store::DocumentStore,
};

pub async fn list<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
) -> Result<Json<Vec<Thought>>, AppError> {
    let thoughts = graph.list_thoughts().await?;
    tracing::info!(count = thoughts.len(), "listed thoughts");
    Ok(Json(thoughts))
}

pub async fn create<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    AppJson(payload): AppJson<CreateThoughtPayload>,
) -> Result<Json<Thought>, AppError> {
    let thought = graph.create_thought(payload).await?;
    tracing::info!(thought = %thought.id, user = %thought.username, "created thought");
    Ok(Json(thought))
}

pub async fn get_by_id<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(thought_id): Path<String>,
) -> Result<Json<Thought>, AppError> {
    let thought = graph.get_thought(&thought_id).await?;
    tracing::info!(thought = %thought.id, "fetched thought");
    Ok(Json(thought))
}

pub async fn update<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(thought_id): Path<String>,
    AppJson(patch): AppJson<UpdateThoughtPayload>,
) -> Result<Json<Thought>, AppError> {
    let thought = graph.update_thought(&thought_id, patch).await?;
    tracing::info!(thought = %thought.id, "updated thought");
    Ok(Json(thought))
}

pub async fn remove<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(thought_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let thought = graph.delete_thought(&thought_id).await?;
    tracing::info!(thought = %thought.id, "deleted thought");
    Ok(Json(json!({ "message": "Thought deleted" })))
}

pub async fn add_reaction<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path(thought_id): Path<String>,
    AppJson(payload): AppJson<CreateReactionPayload>,
) -> Result<Json<Thought>, AppError> {
    let thought = graph.add_reaction(&thought_id, payload).await?;
    tracing::info!(thought = %thought.id, "added reaction");
    Ok(Json(thought))
}

pub async fn remove_reaction<S: DocumentStore>(
    State(graph): State<SocialGraph<S>>,
    Path((thought_id, reaction_id)): Path<(String, String)>,
) -> Result<Json<Thought>, AppError> {
    let thought = graph.remove_reaction(&thought_id, &reaction_id).await?;
    tracing::info!(thought = %thought.id, reaction = %reaction_id, "removed reaction");
    Ok(Json(thought))
}
