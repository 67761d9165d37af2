use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use plenum::workflows::assignment::AssignmentWeights;
use plenum::workflows::directory::{
    CommitteeEntity, ConferenceEntity, DelegationEntity, EntityDescriptor, EntityStore,
    PaperDirectoryEntity, ParticipantEntity, StoreError,
};
use plenum::workflows::papers::{PaperId, PaperRecord, PaperRepository, PaperStatus, RepositoryError};
use plenum::workflows::registration::ConferenceLifecycle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) weights: Arc<Mutex<AssignmentWeights>>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPaperRepository {
    records: Arc<Mutex<HashMap<PaperId, PaperRecord>>>,
}

impl PaperRepository for InMemoryPaperRepository {
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

    fn in_review(&self, limit: usize) -> Result<Vec<PaperRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == PaperStatus::InReview)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// In-memory entity store shared by all directory collections.
pub(crate) struct InMemoryEntityStore<D: EntityDescriptor> {
    records: Arc<Mutex<HashMap<String, D::Record>>>,
}

impl<D: EntityDescriptor> Default for InMemoryEntityStore<D> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<D: EntityDescriptor> Clone for InMemoryEntityStore<D> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<D: EntityDescriptor> EntityStore<D> for InMemoryEntityStore<D> {
    fn insert(&self, record: D::Record) -> Result<D::Record, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = D::id(&record).to_string();
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<D::Record>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<D::Record>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<D::Record> = guard.values().cloned().collect();
        records.sort_by(|a, b| D::id(a).cmp(D::id(b)));
        Ok(records)
    }

    fn update(&self, record: D::Record) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = D::id(&record).to_string();
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

/// One store per directory collection, all sharing the in-memory backend.
#[derive(Default, Clone)]
pub(crate) struct DirectoryStores {
    pub(crate) conferences: Arc<InMemoryEntityStore<ConferenceEntity>>,
    pub(crate) committees: Arc<InMemoryEntityStore<CommitteeEntity>>,
    pub(crate) delegations: Arc<InMemoryEntityStore<DelegationEntity>>,
    pub(crate) participants: Arc<InMemoryEntityStore<ParticipantEntity>>,
    pub(crate) papers: Arc<InMemoryEntityStore<PaperDirectoryEntity>>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_lifecycle(raw: &str) -> Result<ConferenceLifecycle, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pre" => Ok(ConferenceLifecycle::Pre),
        "preparation" => Ok(ConferenceLifecycle::Preparation),
        "participant_registration" | "registration" => {
            Ok(ConferenceLifecycle::ParticipantRegistration)
        }
        "active" => Ok(ConferenceLifecycle::Active),
        "post" => Ok(ConferenceLifecycle::Post),
        other => Err(format!(
            "unknown lifecycle '{other}' (expected pre, preparation, participant_registration, active, or post)"
        )),
    }
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
