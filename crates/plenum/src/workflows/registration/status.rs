use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::domain::{
    ConferenceLifecycle, ConsentSnapshot, ConsentState, RegistrationWindow, SeatCounts,
    WaitingListPressure,
};

/// Waiting-list entries assumed to no-show before seats run out.
pub const NO_SHOW_FORGIVENESS: u32 = 5;
/// Waiting-list overhang beyond free seats that counts as a long list.
pub const LONG_LIST_THRESHOLD: u32 = 20;
/// Age at conference start that exempts a participant from guardian consent.
pub const ADULT_AGE_YEARS: i32 = 18;

/// Exact calendar age in whole years at the conference start date.
///
/// Returns `None` when the start precedes the birth date. A Feb-29 birth
/// completes its year on Mar 1 in common years, which falls out of the
/// month/day comparison.
pub fn age_at_conference(birth_date: NaiveDate, conference_start: NaiveDate) -> Option<i32> {
    if conference_start < birth_date {
        return None;
    }

    let mut age = conference_start.year() - birth_date.year();
    let anniversary_reached = (conference_start.month(), conference_start.day())
        >= (birth_date.month(), birth_date.day());
    if !anniversary_reached {
        age -= 1;
    }

    Some(age)
}

/// Whether the participant is of age at conference start, exempting guardian
/// consent. Unknown ages count as underage.
pub fn is_of_age(birth_date: NaiveDate, conference_start: NaiveDate) -> bool {
    age_at_conference(birth_date, conference_start)
        .map(|age| age >= ADULT_AGE_YEARS)
        .unwrap_or(false)
}

/// Derive the registration window from the conference lifecycle and the
/// assignment deadline. First matching rule wins; `Active` and `Post` close
/// registration regardless of the deadline.
pub fn registration_window(
    lifecycle: ConferenceLifecycle,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RegistrationWindow {
    match lifecycle {
        ConferenceLifecycle::Pre => RegistrationWindow::NotYetOpen,
        ConferenceLifecycle::Preparation => RegistrationWindow::WaitingList,
        ConferenceLifecycle::Active | ConferenceLifecycle::Post => RegistrationWindow::Closed,
        ConferenceLifecycle::ParticipantRegistration if now > deadline => {
            RegistrationWindow::Closed
        }
        ConferenceLifecycle::ParticipantRegistration => RegistrationWindow::Open,
    }
}

/// Classify waiting-list pressure against available seats.
///
/// The no-show forgiveness discounts waiting entries expected to drop out;
/// the long-list check subtracts free seats so vacancies that already absorb
/// waiting entries are not penalized twice.
pub fn waiting_list_pressure(counts: SeatCounts) -> WaitingListPressure {
    let SeatCounts {
        total_seats,
        participants,
        waiting_list,
    } = counts;

    let expected_claims = waiting_list.saturating_sub(NO_SHOW_FORGIVENESS);
    if total_seats > participants.saturating_add(expected_claims) {
        return WaitingListPressure::Vacancies;
    }

    let free_seats = total_seats.saturating_sub(participants);
    if waiting_list.saturating_sub(free_seats) > LONG_LIST_THRESHOLD {
        return WaitingListPressure::LongList;
    }

    WaitingListPressure::ShortList
}

/// Fold consent sub-statuses into a single postal status. Guardian consent is
/// skipped for of-age participants; Problem dominates Pending dominates Done.
pub fn postal_status(consents: &ConsentSnapshot, of_age: bool) -> ConsentState {
    let mut folded = consents.terms.max(consents.media_consent);
    if !of_age {
        folded = folded.max(consents.guardian_consent);
    }
    folded
}
