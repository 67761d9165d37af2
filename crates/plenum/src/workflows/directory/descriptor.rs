use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::policy::EntityKind;
use crate::workflows::papers::domain::{PaperKind, PaperStatus};
use crate::workflows::registration::domain::{ConferenceLifecycle, ConsentSnapshot};

/// Statically-typed descriptor binding an entity kind, its route path, and
/// its record schema.
pub trait EntityDescriptor: Send + Sync {
    const KIND: EntityKind;
    const PATH: &'static str;
    type Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn id(record: &Self::Record) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    pub id: String,
    pub title: String,
    pub lifecycle: ConferenceLifecycle,
    pub total_seats: u32,
    pub registration_deadline: DateTime<Utc>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub struct ConferenceEntity;

impl EntityDescriptor for ConferenceEntity {
    const KIND: EntityKind = EntityKind::Conference;
    const PATH: &'static str = "conferences";
    type Record = ConferenceRecord;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeRecord {
    pub id: String,
    pub conference_id: String,
    pub name: String,
    pub seats: u32,
}

pub struct CommitteeEntity;

impl EntityDescriptor for CommitteeEntity {
    const KIND: EntityKind = EntityKind::Committee;
    const PATH: &'static str = "committees";
    type Record = CommitteeRecord;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationRecord {
    pub id: String,
    pub conference_id: String,
    pub nation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_delegate: Option<String>,
}

pub struct DelegationEntity;

impl EntityDescriptor for DelegationEntity {
    const KIND: EntityKind = EntityKind::Delegation;
    const PATH: &'static str = "delegations";
    type Record = DelegationRecord;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
    pub delegation_id: String,
    pub display_name: String,
    pub birth_date: NaiveDate,
    pub consents: ConsentSnapshot,
}

pub struct ParticipantEntity;

impl EntityDescriptor for ParticipantEntity {
    const KIND: EntityKind = EntityKind::Participant;
    const PATH: &'static str = "participants";
    type Record = ParticipantRecord;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }
}

/// Thin directory listing for papers; the full lifecycle lives in the papers
/// workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperDirectoryRecord {
    pub id: String,
    pub committee_id: String,
    pub kind: PaperKind,
    pub status: PaperStatus,
}

pub struct PaperDirectoryEntity;

impl EntityDescriptor for PaperDirectoryEntity {
    const KIND: EntityKind = EntityKind::Paper;
    const PATH: &'static str = "papers-directory";
    type Record = PaperDirectoryRecord;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }
}
