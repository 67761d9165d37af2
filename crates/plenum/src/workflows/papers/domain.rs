use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted papers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperId(pub String);

/// Document categories a delegation can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperKind {
    PositionPaper,
    WorkingPaper,
    IntroductionPaper,
}

impl PaperKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PositionPaper => "Position Paper",
            Self::WorkingPaper => "Working Paper",
            Self::IntroductionPaper => "Introduction Paper",
        }
    }

    /// Icon key consumed by the UI layer.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::PositionPaper => "flag",
            Self::WorkingPaper => "file-pen",
            Self::IntroductionPaper => "file-lines",
        }
    }
}

/// Review lifecycle tracked per paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperStatus {
    Draft,
    Submitted,
    InReview,
    ChangesRequested,
    Accepted,
    Rejected,
}

impl PaperStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::InReview => "In Review",
            Self::ChangesRequested => "Changes Requested",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Draft => "pencil",
            Self::Submitted => "inbox",
            Self::InReview => "magnifying-glass",
            Self::ChangesRequested => "rotate-left",
            Self::Accepted => "check",
            Self::Rejected => "xmark",
        }
    }
}

/// Inbound payload for a new paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSubmission {
    pub title: String,
    pub kind: PaperKind,
    pub committee: String,
    pub delegation: String,
    pub content: String,
}

/// One entry in a paper's flat review thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub author: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}
