use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::domain::{PaperId, PaperStatus, PaperSubmission, ReviewComment};
use super::repository::{PaperMeta, PaperRecord, PaperRepository, RepositoryError};
use super::version::{content_matches, PaperVersion};

static PAPER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_paper_id() -> PaperId {
    let id = PAPER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PaperId(format!("paper-{id:06}"))
}

/// Service facade over the paper repository: intake, versioning, drift
/// detection, and the review thread.
pub struct PaperService<R> {
    repository: Arc<R>,
}

impl<R> PaperService<R>
where
    R: PaperRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Accept a new paper and store its first version.
    pub fn submit(&self, submission: PaperSubmission) -> Result<PaperRecord, PaperServiceError> {
        if submission.title.trim().is_empty() {
            return Err(SubmissionError::EmptyTitle.into());
        }
        if submission.content.trim().is_empty() {
            return Err(SubmissionError::EmptyContent.into());
        }

        let record = PaperRecord {
            meta: PaperMeta {
                paper_id: next_paper_id(),
                title: submission.title,
                kind: submission.kind,
                committee: submission.committee,
                delegation: submission.delegation,
            },
            status: PaperStatus::Submitted,
            versions: vec![PaperVersion::new(1, submission.content)],
            review: Vec::new(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Append a new version unless the content digest matches the latest one.
    pub fn save_version(
        &self,
        paper_id: &PaperId,
        content: String,
    ) -> Result<SavedVersion, PaperServiceError> {
        let mut record = self.fetch(paper_id)?;

        let latest_hash = record
            .latest_version()
            .map(|version| version.content_hash.clone());
        if content_matches(Some(&content), latest_hash.as_deref()) {
            return Ok(SavedVersion {
                version: record.versions.len() as u32,
                changed: false,
            });
        }

        let next_index = record.versions.len() as u32 + 1;
        record.versions.push(PaperVersion::new(next_index, content));
        self.repository.update(record)?;

        Ok(SavedVersion {
            version: next_index,
            changed: true,
        })
    }

    /// Whether a cached draft still matches the latest stored version.
    /// Missing drafts or missing stored versions report "no match".
    pub fn check_drift(
        &self,
        paper_id: &PaperId,
        cached_content: Option<&str>,
    ) -> Result<bool, PaperServiceError> {
        let record = self.fetch(paper_id)?;
        let stored_hash = record
            .latest_version()
            .map(|version| version.content_hash.as_str());
        Ok(content_matches(cached_content, stored_hash))
    }

    /// Post a review comment. The first comment moves a submitted paper into
    /// review.
    pub fn add_review_comment(
        &self,
        paper_id: &PaperId,
        author: String,
        body: String,
    ) -> Result<PaperRecord, PaperServiceError> {
        let mut record = self.fetch(paper_id)?;

        record.review.push(ReviewComment {
            author,
            body,
            posted_at: Utc::now(),
        });
        if record.status == PaperStatus::Submitted {
            record.status = PaperStatus::InReview;
        }

        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn set_status(
        &self,
        paper_id: &PaperId,
        status: PaperStatus,
    ) -> Result<PaperRecord, PaperServiceError> {
        let mut record = self.fetch(paper_id)?;
        record.status = status;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, paper_id: &PaperId) -> Result<PaperRecord, PaperServiceError> {
        self.fetch(paper_id)
    }

    fn fetch(&self, paper_id: &PaperId) -> Result<PaperRecord, PaperServiceError> {
        let record = self
            .repository
            .fetch(paper_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Result of a save-version request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavedVersion {
    pub version: u32,
    pub changed: bool,
}

/// Validation failures on inbound submissions.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("paper title must not be empty")]
    EmptyTitle,
    #[error("paper content must not be empty")]
    EmptyContent,
}

/// Error raised by the paper service.
#[derive(Debug, thiserror::Error)]
pub enum PaperServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
