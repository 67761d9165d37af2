//! Integration specifications for the typed directory CRUD surface,
//! exercising the capability table end-to-end through the generic router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use chrono::{NaiveDate, TimeZone, Utc};
use plenum::workflows::directory::{
    crud_router, AccessPolicy, ConferenceEntity, ConferenceRecord, EntityDescriptor, EntityStore,
    StoreError,
};
use plenum::workflows::registration::ConferenceLifecycle;
use tower::ServiceExt;

#[derive(Default, Clone)]
struct MemoryStore {
    records: Arc<Mutex<HashMap<String, ConferenceRecord>>>,
}

impl EntityStore<ConferenceEntity> for MemoryStore {
    fn insert(&self, record: ConferenceRecord) -> Result<ConferenceRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = ConferenceEntity::id(&record).to_string();
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<ConferenceRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ConferenceRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<ConferenceRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    fn update(&self, record: ConferenceRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = ConferenceEntity::id(&record).to_string();
        if guard.contains_key(&id) {
            guard.insert(id, record);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.remove(id).is_some())
    }
}

fn conference(id: &str) -> ConferenceRecord {
    ConferenceRecord {
        id: id.to_string(),
        title: "PlenumMUN 2026".to_string(),
        lifecycle: ConferenceLifecycle::Preparation,
        total_seats: 220,
        registration_deadline: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        start: NaiveDate::from_ymd_opt(2026, 10, 2).expect("valid date"),
        end: NaiveDate::from_ymd_opt(2026, 10, 6).expect("valid date"),
    }
}

fn build_router() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::default();
    let router = crud_router::<ConferenceEntity, MemoryStore>(Arc::new(store.clone()), AccessPolicy);
    (router, store)
}

async fn send(
    router: axum::Router,
    method: &str,
    uri: &str,
    role: Option<&str>,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let mut request = axum::http::Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        request = request.header("x-actor-role", role);
    }

    let request = match body {
        Some(body) => request
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => request.body(axum::body::Body::empty()).unwrap(),
    };

    router.oneshot(request).await.expect("route executes")
}

#[tokio::test]
async fn admin_walks_the_full_crud_cycle() {
    let (router, _) = build_router();

    let body = serde_json::to_value(conference("conf-1")).unwrap();
    let response = send(
        router.clone(),
        "POST",
        "/api/v1/conferences",
        Some("admin"),
        Some(body.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        router.clone(),
        "GET",
        "/api/v1/conferences/conf-1",
        Some("admin"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut updated = conference("conf-1");
    updated.lifecycle = ConferenceLifecycle::ParticipantRegistration;
    let response = send(
        router.clone(),
        "PUT",
        "/api/v1/conferences/conf-1",
        Some("admin"),
        Some(serde_json::to_value(updated).unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        router.clone(),
        "DELETE",
        "/api/v1/conferences/conf-1",
        Some("admin"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        router,
        "GET",
        "/api/v1/conferences/conf-1",
        Some("admin"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn guests_may_list_but_not_read_conferences() {
    let (router, store) = build_router();
    store.insert(conference("conf-1")).expect("seed succeeds");

    let response = send(router.clone(), "GET", "/api/v1/conferences", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        router,
        "GET",
        "/api/v1/conferences/conf-1",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn team_members_cannot_delete_conferences() {
    let (router, store) = build_router();
    store.insert(conference("conf-1")).expect("seed succeeds");

    let response = send(
        router,
        "DELETE",
        "/api/v1/conferences/conf-1",
        Some("team_member"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_creates_surface_conflict() {
    let (router, store) = build_router();
    store.insert(conference("conf-1")).expect("seed succeeds");

    let response = send(
        router,
        "POST",
        "/api/v1/conferences",
        Some("admin"),
        Some(serde_json::to_value(conference("conf-1")).unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn mismatched_update_ids_are_rejected() {
    let (router, store) = build_router();
    store.insert(conference("conf-1")).expect("seed succeeds");

    let response = send(
        router,
        "PUT",
        "/api/v1/conferences/conf-1",
        Some("admin"),
        Some(serde_json::to_value(conference("conf-2")).unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
