use serde::{Deserialize, Serialize};

use super::domain::{PaperId, PaperKind, PaperStatus, ReviewComment};
use super::version::PaperVersion;

/// Descriptive fields of a paper, stable across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMeta {
    pub paper_id: PaperId,
    pub title: String,
    pub kind: PaperKind,
    pub committee: String,
    pub delegation: String,
}

/// Repository record: meta, review lifecycle, ordered versions, and the flat
/// review thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub meta: PaperMeta,
    pub status: PaperStatus,
    pub versions: Vec<PaperVersion>,
    pub review: Vec<ReviewComment>,
}

impl PaperRecord {
    pub fn latest_version(&self) -> Option<&PaperVersion> {
        self.versions.last()
    }

    pub fn status_view(&self) -> PaperStatusView {
        PaperStatusView {
            paper_id: self.meta.paper_id.clone(),
            kind: self.meta.kind.label(),
            status: self.status.label(),
            status_icon: self.status.icon(),
            version_count: self.versions.len() as u32,
            latest_hash: self
                .latest_version()
                .map(|version| version.content_hash.clone()),
            review_comments: self.review.len() as u32,
        }
    }
}

/// Sanitized projection exposed over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct PaperStatusView {
    pub paper_id: PaperId,
    pub kind: &'static str,
    pub status: &'static str,
    pub status_icon: &'static str,
    pub version_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_hash: Option<String>,
    pub review_comments: u32,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait PaperRepository: Send + Sync {
    fn insert(&self, record: PaperRecord) -> Result<PaperRecord, RepositoryError>;
    fn update(&self, record: PaperRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PaperId) -> Result<Option<PaperRecord>, RepositoryError>;
    fn in_review(&self, limit: usize) -> Result<Vec<PaperRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
