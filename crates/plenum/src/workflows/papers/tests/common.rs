use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::papers::domain::{PaperId, PaperKind, PaperSubmission};
use crate::workflows::papers::repository::{PaperRecord, PaperRepository, RepositoryError};
use crate::workflows::papers::router::paper_router;
use crate::workflows::papers::service::PaperService;
use crate::workflows::papers::PaperStatus;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<PaperId, PaperRecord>>>,
}

impl PaperRepository for MemoryRepository {
    fn insert(&self, record: PaperRecord) -> Result<PaperRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.meta.paper_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.meta.paper_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PaperRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.meta.paper_id) {
            guard.insert(record.meta.paper_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &PaperId) -> Result<Option<PaperRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn in_review(&self, _limit: usize) -> Result<Vec<PaperRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == PaperStatus::InReview)
            .cloned()
            .collect())
    }
}

/// Repository that always reports a duplicate on insert.
pub(super) struct ConflictRepository;

impl PaperRepository for ConflictRepository {
    fn insert(&self, _record: PaperRecord) -> Result<PaperRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: PaperRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &PaperId) -> Result<Option<PaperRecord>, RepositoryError> {
        Ok(None)
    }

    fn in_review(&self, _limit: usize) -> Result<Vec<PaperRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Repository simulating a storage outage.
pub(super) struct UnavailableRepository;

impl PaperRepository for UnavailableRepository {
    fn insert(&self, _record: PaperRecord) -> Result<PaperRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn update(&self, _record: PaperRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn fetch(&self, _id: &PaperId) -> Result<Option<PaperRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn in_review(&self, _limit: usize) -> Result<Vec<PaperRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn submission() -> PaperSubmission {
    PaperSubmission {
        title: "Measures to strengthen maritime security".to_string(),
        kind: PaperKind::WorkingPaper,
        committee: "Security Council".to_string(),
        delegation: "Kingdom of Norway".to_string(),
        content: "The Security Council, recalling its previous resolutions,".to_string(),
    }
}

pub(super) fn empty_title_submission() -> PaperSubmission {
    PaperSubmission {
        title: "   ".to_string(),
        ..submission()
    }
}

pub(super) fn build_service() -> (PaperService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = PaperService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn build_router() -> axum::Router {
    let (service, _) = build_service();
    paper_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is json")
}
