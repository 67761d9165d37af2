use serde::{Deserialize, Serialize};

/// Entities exposed through the directory CRUD surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Conference,
    Committee,
    Delegation,
    Participant,
    Paper,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Committee => "Committee",
            Self::Delegation => "Delegation",
            Self::Participant => "Participant",
            Self::Paper => "Paper",
        }
    }
}

/// Uniform CRUD actions checked against the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrudAction {
    Get,
    List,
    Create,
    Update,
    Delete,
}

/// Caller roles recognized by the directory routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    TeamMember,
    DelegationLeader,
    Participant,
    Guest,
}

impl ActorRole {
    /// Parse the role header value, treating unknown values as Guest.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("admin") => Self::Admin,
            Some(value) if value.eq_ignore_ascii_case("team_member") => Self::TeamMember,
            Some(value) if value.eq_ignore_ascii_case("delegation_leader") => {
                Self::DelegationLeader
            }
            Some(value) if value.eq_ignore_ascii_case("participant") => Self::Participant,
            _ => Self::Guest,
        }
    }
}

/// Capability table deciding which role may perform which action on which
/// entity. Resolved entirely at compile time via matches over the sum types.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn allows(&self, role: ActorRole, action: CrudAction, kind: EntityKind) -> bool {
        match role {
            ActorRole::Admin => true,
            ActorRole::TeamMember => !matches!(
                (action, kind),
                (CrudAction::Delete, EntityKind::Conference)
            ),
            ActorRole::DelegationLeader => match action {
                CrudAction::Get | CrudAction::List => true,
                CrudAction::Update => {
                    matches!(kind, EntityKind::Delegation | EntityKind::Participant)
                }
                CrudAction::Create | CrudAction::Delete => false,
            },
            ActorRole::Participant => matches!(action, CrudAction::Get | CrudAction::List),
            ActorRole::Guest => {
                matches!(action, CrudAction::List)
                    && matches!(kind, EntityKind::Conference | EntityKind::Committee)
            }
        }
    }
}
