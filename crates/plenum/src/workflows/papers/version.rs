use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One stored revision of a paper's editor content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperVersion {
    pub index: u32,
    pub content: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl PaperVersion {
    pub fn new(index: u32, content: impl Into<String>) -> Self {
        let content = content.into();
        let content_hash = content_digest(&content);
        Self {
            index,
            content,
            content_hash,
            created_at: Utc::now(),
        }
    }
}

/// Lowercase hex digest of the serialized content. Used only to detect
/// accidental drift between a cached draft and the stored version.
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether the current editor content still matches a previously stored hash.
///
/// Fails closed: a missing content or hash reports "no match" so callers
/// assume the draft has changed.
pub fn content_matches(content: Option<&str>, stored_hash: Option<&str>) -> bool {
    match (content, stored_hash) {
        (Some(content), Some(stored_hash)) => content_digest(content) == stored_hash,
        _ => false,
    }
}
