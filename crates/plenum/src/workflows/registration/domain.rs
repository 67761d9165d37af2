use serde::{Deserialize, Serialize};

/// Lifecycle phases a conference moves through from planning to wrap-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceLifecycle {
    Pre,
    Preparation,
    ParticipantRegistration,
    Active,
    Post,
}

impl ConferenceLifecycle {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Pre,
            Self::Preparation,
            Self::ParticipantRegistration,
            Self::Active,
            Self::Post,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pre => "Pre-announcement",
            Self::Preparation => "Preparation",
            Self::ParticipantRegistration => "Participant Registration",
            Self::Active => "Active",
            Self::Post => "Post-conference",
        }
    }
}

/// Derived state of the registration window, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationWindow {
    NotYetOpen,
    WaitingList,
    Open,
    Closed,
    Unknown,
}

impl RegistrationWindow {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotYetOpen => "Not Yet Open",
            Self::WaitingList => "Waiting List",
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }
}

/// Classification of how hard the waiting list presses on available seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitingListPressure {
    Vacancies,
    ShortList,
    LongList,
}

impl WaitingListPressure {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vacancies => "Vacancies",
            Self::ShortList => "Short List",
            Self::LongList => "Long List",
        }
    }
}

/// Aggregated consent/postal state. Problem dominates Pending dominates Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    Done,
    Pending,
    Problem,
}

impl ConsentState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::Pending => "Pending",
            Self::Problem => "Problem",
        }
    }
}

/// Seat occupancy counters for one conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCounts {
    pub total_seats: u32,
    pub participants: u32,
    pub waiting_list: u32,
}

/// Per-participant consent sub-statuses folded into the postal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSnapshot {
    pub terms: ConsentState,
    pub guardian_consent: ConsentState,
    pub media_consent: ConsentState,
}
