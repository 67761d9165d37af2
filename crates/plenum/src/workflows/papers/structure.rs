use serde::{Deserialize, Serialize};

/// Node kinds in a rendered resolution document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Header,
    PreambleSection,
    PreambleClause,
    OperativeSection,
    OperativeClause,
    SubClause,
}

impl NodeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::PreambleSection => "preamble section",
            Self::PreambleClause => "preamble clause",
            Self::OperativeSection => "operative section",
            Self::OperativeClause => "operative clause",
            Self::SubClause => "sub-clause",
        }
    }
}

/// A node in the rendered document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<DocumentNode>) -> Self {
        Self { kind, children }
    }
}

/// Violations of the document content model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("document must contain exactly a header, a preamble section, and an operative section, found {found} top-level node(s)")]
    WrongSectionCount { found: usize },
    #[error("expected {expected} at top-level position {position}, found {found}")]
    UnexpectedSection {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{parent} may not contain {child}")]
    ForbiddenChild {
        parent: &'static str,
        child: &'static str,
    },
    #[error("{kind} must be a leaf node")]
    UnexpectedChildren { kind: &'static str },
}

const TOP_LEVEL: [NodeKind; 3] = [
    NodeKind::Header,
    NodeKind::PreambleSection,
    NodeKind::OperativeSection,
];

/// Validate a rendered document against the content-model grammar: a header
/// followed by a preamble section of preamble clauses, followed by an
/// operative section of operative clauses, whose sub-clauses nest exactly one
/// level deep.
pub fn validate_document(nodes: &[DocumentNode]) -> Result<(), StructureError> {
    if nodes.len() != TOP_LEVEL.len() {
        return Err(StructureError::WrongSectionCount { found: nodes.len() });
    }

    for (position, (node, expected)) in nodes.iter().zip(TOP_LEVEL).enumerate() {
        if node.kind != expected {
            return Err(StructureError::UnexpectedSection {
                position,
                expected: expected.label(),
                found: node.kind.label(),
            });
        }
    }

    let header = &nodes[0];
    if !header.children.is_empty() {
        return Err(StructureError::UnexpectedChildren {
            kind: NodeKind::Header.label(),
        });
    }

    for clause in &nodes[1].children {
        if clause.kind != NodeKind::PreambleClause {
            return Err(StructureError::ForbiddenChild {
                parent: NodeKind::PreambleSection.label(),
                child: clause.kind.label(),
            });
        }
        if !clause.children.is_empty() {
            return Err(StructureError::UnexpectedChildren {
                kind: NodeKind::PreambleClause.label(),
            });
        }
    }

    for clause in &nodes[2].children {
        if clause.kind != NodeKind::OperativeClause {
            return Err(StructureError::ForbiddenChild {
                parent: NodeKind::OperativeSection.label(),
                child: clause.kind.label(),
            });
        }
        for sub in &clause.children {
            if sub.kind != NodeKind::SubClause {
                return Err(StructureError::ForbiddenChild {
                    parent: NodeKind::OperativeClause.label(),
                    child: sub.kind.label(),
                });
            }
            if !sub.children.is_empty() {
                return Err(StructureError::UnexpectedChildren {
                    kind: NodeKind::SubClause.label(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed() -> Vec<DocumentNode> {
        vec![
            DocumentNode::leaf(NodeKind::Header),
            DocumentNode::with_children(
                NodeKind::PreambleSection,
                vec![DocumentNode::leaf(NodeKind::PreambleClause)],
            ),
            DocumentNode::with_children(
                NodeKind::OperativeSection,
                vec![DocumentNode::with_children(
                    NodeKind::OperativeClause,
                    vec![DocumentNode::leaf(NodeKind::SubClause)],
                )],
            ),
        ]
    }

    #[test]
    fn accepts_well_formed_document() {
        assert_eq!(validate_document(&well_formed()), Ok(()));
    }

    #[test]
    fn accepts_empty_sections() {
        let nodes = vec![
            DocumentNode::leaf(NodeKind::Header),
            DocumentNode::leaf(NodeKind::PreambleSection),
            DocumentNode::leaf(NodeKind::OperativeSection),
        ];
        assert_eq!(validate_document(&nodes), Ok(()));
    }

    #[test]
    fn rejects_missing_header() {
        let mut nodes = well_formed();
        nodes.remove(0);
        assert!(matches!(
            validate_document(&nodes),
            Err(StructureError::WrongSectionCount { found: 2 })
        ));
    }

    #[test]
    fn rejects_sections_out_of_order() {
        let mut nodes = well_formed();
        nodes.swap(1, 2);
        assert!(matches!(
            validate_document(&nodes),
            Err(StructureError::UnexpectedSection { position: 1, .. })
        ));
    }

    #[test]
    fn rejects_operative_clause_in_preamble() {
        let mut nodes = well_formed();
        nodes[1]
            .children
            .push(DocumentNode::leaf(NodeKind::OperativeClause));
        assert!(matches!(
            validate_document(&nodes),
            Err(StructureError::ForbiddenChild { .. })
        ));
    }

    #[test]
    fn rejects_nesting_below_sub_clauses() {
        let mut nodes = well_formed();
        nodes[2].children[0].children[0]
            .children
            .push(DocumentNode::leaf(NodeKind::SubClause));
        assert!(matches!(
            validate_document(&nodes),
            Err(StructureError::UnexpectedChildren { .. })
        ));
    }
}
