use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::descriptor::EntityDescriptor;
use super::policy::{AccessPolicy, ActorRole, CrudAction};

pub const ROLE_HEADER: &str = "x-actor-role";

/// Storage abstraction backing one entity collection.
pub trait EntityStore<D: EntityDescriptor>: Send + Sync {
    fn insert(&self, record: D::Record) -> Result<D::Record, StoreError>;
    fn get(&self, id: &str) -> Result<Option<D::Record>, StoreError>;
    fn list(&self) -> Result<Vec<D::Record>, StoreError>;
    fn update(&self, record: D::Record) -> Result<(), StoreError>;
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Error enumeration for entity store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

struct CrudState<D, S> {
    store: Arc<S>,
    policy: AccessPolicy,
    _entity: PhantomData<fn() -> D>,
}

impl<D, S> Clone for CrudState<D, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy,
            _entity: PhantomData,
        }
    }
}

/// Build the uniform CRUD router for one entity descriptor.
pub fn crud_router<D, S>(store: Arc<S>, policy: AccessPolicy) -> Router
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let state = Arc::new(CrudState::<D, S> {
        store,
        policy,
        _entity: PhantomData,
    });

    Router::new()
        .route(
            &format!("/api/v1/{}", D::PATH),
            get(list_handler::<D, S>).post(create_handler::<D, S>),
        )
        .route(
            &format!("/api/v1/{}/:id", D::PATH),
            get(get_handler::<D, S>)
                .put(update_handler::<D, S>)
                .delete(delete_handler::<D, S>),
        )
        .with_state(state)
}

fn role_from(headers: &HeaderMap) -> ActorRole {
    let value = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok());
    ActorRole::from_header(value)
}

fn forbidden(role: ActorRole, action: CrudAction) -> Response {
    let payload = json!({
        "error": "access denied",
        "role": role,
        "action": action,
    });
    (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
}

fn store_failure(error: StoreError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

async fn list_handler<D, S>(
    State(state): State<Arc<CrudState<D, S>>>,
    headers: HeaderMap,
) -> Response
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let role = role_from(&headers);
    if !state.policy.allows(role, CrudAction::List, D::KIND) {
        return forbidden(role, CrudAction::List);
    }

    match state.store.list() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => store_failure(error),
    }
}

async fn get_handler<D, S>(
    State(state): State<Arc<CrudState<D, S>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let role = role_from(&headers);
    if !state.policy.allows(role, CrudAction::Get, D::KIND) {
        return forbidden(role, CrudAction::Get);
    }

    match state.store.get(&id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "record not found", "id": id });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

async fn create_handler<D, S>(
    State(state): State<Arc<CrudState<D, S>>>,
    headers: HeaderMap,
    axum::Json(record): axum::Json<D::Record>,
) -> Response
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let role = role_from(&headers);
    if !state.policy.allows(role, CrudAction::Create, D::KIND) {
        return forbidden(role, CrudAction::Create);
    }

    match state.store.insert(record) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(StoreError::Conflict) => {
            let payload = json!({ "error": "record already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

async fn update_handler<D, S>(
    State(state): State<Arc<CrudState<D, S>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    axum::Json(record): axum::Json<D::Record>,
) -> Response
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let role = role_from(&headers);
    if !state.policy.allows(role, CrudAction::Update, D::KIND) {
        return forbidden(role, CrudAction::Update);
    }

    if D::id(&record) != id {
        let payload = json!({ "error": "record id does not match the request path" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    match state.store.update(record) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "id": id }))).into_response(),
        Err(StoreError::NotFound) => {
            let payload = json!({ "error": "record not found", "id": id });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

async fn delete_handler<D, S>(
    State(state): State<Arc<CrudState<D, S>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    D: EntityDescriptor + 'static,
    S: EntityStore<D> + 'static,
{
    let role = role_from(&headers);
    if !state.policy.allows(role, CrudAction::Delete, D::KIND) {
        return forbidden(role, CrudAction::Delete);
    }

    match state.store.delete(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => {
            let payload = json!({ "error": "record not found", "id": id });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => store_failure(error),
    }
}
