//! HTTP surface: route table and handlers.

pub mod thoughts;
pub mod users;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    routing::{delete, get, post},
};
use serde::de::DeserializeOwned;

use crate::{
    errors::{AppError, ValidationError},
    graph::SocialGraph,
    store::DocumentStore,
};

/// JSON body extractor that reports rejections through [`AppError`], so a
/// malformed or incomplete body gets the same `{"message": ...}` shape and
/// status mapping as every other failure.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ValidationError::single("body", "validation.body", rejection.body_text())
            })?;
        Ok(AppJson(value))
    }
}

/// Build the API router over any document store.
pub fn router<S: DocumentStore>(graph: SocialGraph<S>) -> Router {
    Router::new()
        .route("/api/users", get(users::list::<S>).post(users::create::<S>))
        .route(
            "/api/users/{user_id}",
            get(users::get_by_id::<S>)
                .put(users::update::<S>)
                .delete(users::remove::<S>),
        )
        .route(
            "/api/users/{user_id}/friends/{friend_id}",
            post(users::add_friend::<S>).delete(users::remove_friend::<S>),
        )
        .route("/api/thoughts", get(thoughts::list::<S>).post(thoughts::create::<S>))
        .route(
            "/api/thoughts/{thought_id}",
            get(thoughts::get_by_id::<S>)
                .put(thoughts::update::<S>)
                .delete(thoughts::remove::<S>),
        )
        .route(
            "/api/thoughts/{thought_id}/reactions",
            post(thoughts::add_reaction::<S>),
        )
        .route(
            "/api/thoughts/{thought_id}/reactions/{reaction_id}",
            delete(thoughts::remove_reaction::<S>),
        )
        .with_state(graph)
}
