pub mod domain;
pub mod status;

pub use domain::{
    ConferenceLifecycle, ConsentSnapshot, ConsentState, RegistrationWindow, SeatCounts,
    WaitingListPressure,
};
pub use status::{
    age_at_conference, is_of_age, postal_status, registration_window, waiting_list_pressure,
};
