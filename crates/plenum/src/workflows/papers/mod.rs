//! Paper submission, versioning, and resolution-document workflows.

pub mod domain;
pub mod repository;
pub mod resolution;
pub mod router;
pub mod service;
pub mod structure;
pub mod version;

#[cfg(test)]
mod tests;

pub use domain::{PaperId, PaperKind, PaperStatus, PaperSubmission, ReviewComment};
pub use repository::{PaperMeta, PaperRecord, PaperRepository, PaperStatusView, RepositoryError};
pub use resolution::{Clause, ClauseId, OperativeClause, Resolution};
pub use router::paper_router;
pub use service::{PaperService, PaperServiceError, SavedVersion, SubmissionError};
pub use structure::{validate_document, DocumentNode, NodeKind, StructureError};
pub use version::{content_digest, content_matches, PaperVersion};
