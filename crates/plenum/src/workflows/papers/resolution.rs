use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_SUFFIX_LEN: usize = 6;

/// Clause identifier, unique within one editing session.
///
/// Built from a millisecond timestamp plus a random alphanumeric suffix.
/// Clauses never cross document boundaries, so global uniqueness is not
/// required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClauseId(pub String);

impl ClauseId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        Self(format!("{millis}-{suffix}"))
    }
}

/// A single preamble clause or operative sub-clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: ClauseId,
    pub content: String,
}

impl Clause {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: ClauseId::generate(),
            content: content.into(),
        }
    }
}

/// An operative clause, optionally grouping sub-clauses one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperativeClause {
    pub id: ClauseId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_clauses: Vec<Clause>,
}

impl OperativeClause {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: ClauseId::generate(),
            content: content.into(),
            sub_clauses: Vec::new(),
        }
    }

    pub fn push_sub_clause(&mut self, content: impl Into<String>) -> ClauseId {
        let clause = Clause::new(content);
        let id = clause.id.clone();
        self.sub_clauses.push(clause);
        id
    }
}

/// Structured working-paper document. Both clause lists are ordered; the
/// order is presentation- and export-significant. The model only guarantees
/// that content is a string — structural rules live in [`super::structure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub committee_name: String,
    pub preamble: Vec<Clause>,
    pub operative: Vec<OperativeClause>,
}

impl Resolution {
    /// Construct an empty resolution seeded with a committee name.
    pub fn for_committee(committee_name: impl Into<String>) -> Self {
        Self {
            committee_name: committee_name.into(),
            preamble: Vec::new(),
            operative: Vec::new(),
        }
    }

    pub fn push_preamble_clause(&mut self, content: impl Into<String>) -> ClauseId {
        let clause = Clause::new(content);
        let id = clause.id.clone();
        self.preamble.push(clause);
        id
    }

    pub fn push_operative_clause(&mut self, content: impl Into<String>) -> ClauseId {
        let clause = OperativeClause::new(content);
        let id = clause.id.clone();
        self.operative.push(clause);
        id
    }

    pub fn remove_preamble_clause(&mut self, id: &ClauseId) -> Option<Clause> {
        let index = self.preamble.iter().position(|clause| &clause.id == id)?;
        Some(self.preamble.remove(index))
    }

    pub fn remove_operative_clause(&mut self, id: &ClauseId) -> Option<OperativeClause> {
        let index = self.operative.iter().position(|clause| &clause.id == id)?;
        Some(self.operative.remove(index))
    }

    /// Move a preamble clause to a new position, clamping to the list end.
    pub fn move_preamble_clause(&mut self, id: &ClauseId, to: usize) -> bool {
        let Some(index) = self.preamble.iter().position(|clause| &clause.id == id) else {
            return false;
        };
        let clause = self.preamble.remove(index);
        let to = to.min(self.preamble.len());
        self.preamble.insert(to, clause);
        true
    }

    pub fn move_operative_clause(&mut self, id: &ClauseId, to: usize) -> bool {
        let Some(index) = self.operative.iter().position(|clause| &clause.id == id) else {
            return false;
        };
        let clause = self.operative.remove(index);
        let to = to.min(self.operative.len());
        self.operative.insert(to, clause);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.operative.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_resolution_is_empty() {
        let resolution = Resolution::for_committee("Security Council");
        assert_eq!(resolution.committee_name, "Security Council");
        assert!(resolution.is_empty());
    }

    #[test]
    fn clause_ids_generated_back_to_back_are_distinct() {
        // Two generations inside the same millisecond must still differ
        // thanks to the random suffix.
        let ids: Vec<ClauseId> = (0..64).map(|_| ClauseId::generate()).collect();
        for (index, id) in ids.iter().enumerate() {
            assert!(
                !ids[index + 1..].contains(id),
                "duplicate clause id {}",
                id.0
            );
        }
    }

    #[test]
    fn clauses_keep_insertion_order() {
        let mut resolution = Resolution::for_committee("GA");
        resolution.push_preamble_clause("Recalling its resolution 1325,");
        resolution.push_preamble_clause("Noting with concern,");
        resolution.push_operative_clause("Decides to remain seized of the matter;");

        let contents: Vec<&str> = resolution
            .preamble
            .iter()
            .map(|clause| clause.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec!["Recalling its resolution 1325,", "Noting with concern,"]
        );
    }

    #[test]
    fn reorder_moves_clause_and_clamps_target() {
        let mut resolution = Resolution::for_committee("GA");
        resolution.push_operative_clause("first");
        resolution.push_operative_clause("second");
        let id = resolution.operative[1].id.clone();

        assert!(resolution.move_operative_clause(&id, 0));
        assert_eq!(resolution.operative[0].content, "second");

        assert!(resolution.move_operative_clause(&id, 99));
        assert_eq!(resolution.operative[1].content, "second");
    }

    #[test]
    fn remove_returns_the_clause() {
        let mut resolution = Resolution::for_committee("GA");
        resolution.push_preamble_clause("Alarmed by,");
        let id = resolution.preamble[0].id.clone();

        let removed = resolution.remove_preamble_clause(&id);
        assert_eq!(removed.map(|clause| clause.content), Some("Alarmed by,".to_string()));
        assert!(resolution.preamble.is_empty());
        assert!(resolution.remove_preamble_clause(&id).is_none());
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let mut resolution = Resolution::for_committee("ECOSOC");
        resolution.push_preamble_clause("Guided by the Charter,");
        let operative = resolution.push_operative_clause("Calls upon members to:");
        if let Some(clause) = resolution
            .operative
            .iter_mut()
            .find(|clause| clause.id == operative)
        {
            clause.push_sub_clause("report annually;");
        }

        let json = serde_json::to_string(&resolution).expect("serializes");
        let parsed: Resolution = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, resolution);
    }
}
