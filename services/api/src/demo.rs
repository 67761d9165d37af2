use crate::infra::InMemoryPaperRepository;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use plenum::error::AppError;
use plenum::workflows::papers::{PaperKind, PaperService, PaperStatus, PaperSubmission};
use plenum::workflows::registration::{
    age_at_conference, is_of_age, registration_window, waiting_list_pressure, ConferenceLifecycle,
    SeatCounts,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RegistrationReportArgs {
    /// Conference lifecycle phase (pre, preparation, participant_registration, active, post)
    #[arg(long, value_parser = crate::infra::parse_lifecycle)]
    pub(crate) lifecycle: ConferenceLifecycle,
    /// Registration deadline (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) registration_deadline: NaiveDate,
    /// Conference start date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) conference_start: NaiveDate,
    /// Total seats available at the conference
    #[arg(long, default_value_t = 200)]
    pub(crate) total_seats: u32,
    /// Confirmed participants
    #[arg(long, default_value_t = 0)]
    pub(crate) participants: u32,
    /// Waiting-list entries
    #[arg(long, default_value_t = 0)]
    pub(crate) waiting_list: u32,
    /// Optional participant birth date (YYYY-MM-DD) for the age section
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) birth_date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Committee the demo paper is submitted to
    #[arg(long, default_value = "General Assembly")]
    pub(crate) committee: String,
    /// Delegation submitting the demo paper
    #[arg(long, default_value = "Kingdom of Norway")]
    pub(crate) delegation: String,
    /// Skip the registration snapshot portion of the demo
    #[arg(long)]
    pub(crate) skip_registration: bool,
}

pub(crate) fn run_registration_report(args: RegistrationReportArgs) -> Result<(), AppError> {
    let RegistrationReportArgs {
        lifecycle,
        registration_deadline,
        conference_start,
        total_seats,
        participants,
        waiting_list,
        birth_date,
    } = args;

    let now = Utc::now();
    let deadline = Utc.from_utc_datetime(
        &registration_deadline.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)),
    );
    let window = registration_window(lifecycle, deadline, now);
    let counts = SeatCounts {
        total_seats,
        participants,
        waiting_list,
    };
    let pressure = waiting_list_pressure(counts);

    println!("Registration report");
    println!(
        "Lifecycle: {} | deadline {} | evaluated {}",
        lifecycle.label(),
        registration_deadline,
        now.date_naive()
    );
    println!("Registration window: {}", window.label());
    println!(
        "Seats: {}/{} taken, {} waiting -> {}",
        participants,
        total_seats,
        waiting_list,
        pressure.label()
    );

    if let Some(birth) = birth_date {
        match age_at_conference(birth, conference_start) {
            Some(age) => {
                let of_age = is_of_age(birth, conference_start);
                println!(
                    "Age at conference start: {} ({})",
                    age,
                    if of_age {
                        "of age, guardian consent waived"
                    } else {
                        "underage, guardian consent required"
                    }
                );
            }
            None => println!("Age at conference start: birth date is after the conference"),
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        committee,
        delegation,
        skip_registration,
    } = args;

    println!("Plenum conference demo");

    if !skip_registration {
        let today = Utc::now();
        let deadline = today + chrono::Duration::days(30);
        let window = registration_window(ConferenceLifecycle::ParticipantRegistration, deadline, today);
        let counts = SeatCounts {
            total_seats: 200,
            participants: 140,
            waiting_list: 12,
        };

        println!("\nRegistration snapshot");
        println!("- Window: {}", window.label());
        println!(
            "- Seats: {}/{} taken, {} waiting -> {}",
            counts.participants,
            counts.total_seats,
            counts.waiting_list,
            waiting_list_pressure(counts).label()
        );
    }

    println!("\nPaper workflow demo");
    let repository = Arc::new(InMemoryPaperRepository::default());
    let service = PaperService::new(repository);

    let submission = PaperSubmission {
        title: "Addressing access to clean water".to_string(),
        kind: PaperKind::PositionPaper,
        committee,
        delegation,
        content: "The delegation affirms its commitment,".to_string(),
    };
    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Submitted {} -> status {}",
        record.meta.paper_id.0,
        record.status.label()
    );

    match service.save_version(
        &record.meta.paper_id,
        "The delegation, deeply concerned by recent findings,".to_string(),
    ) {
        Ok(saved) => println!(
            "- Saved version {} (changed: {})",
            saved.version, saved.changed
        ),
        Err(err) => {
            println!("  Version save failed: {}", err);
            return Ok(());
        }
    }

    let stale_draft = "an outdated local draft";
    match service.check_drift(&record.meta.paper_id, Some(stale_draft)) {
        Ok(matches) => println!(
            "- Drift check against a stale draft: {}",
            if matches { "in sync" } else { "drift detected" }
        ),
        Err(err) => {
            println!("  Drift check failed: {}", err);
            return Ok(());
        }
    }

    match service.add_review_comment(
        &record.meta.paper_id,
        "chair".to_string(),
        "Tighten operative clause 1.".to_string(),
    ) {
        Ok(reviewed) => println!(
            "- First review comment moved the paper to {}",
            reviewed.status.label()
        ),
        Err(err) => {
            println!("  Review comment failed: {}", err);
            return Ok(());
        }
    }

    match service.set_status(&record.meta.paper_id, PaperStatus::Accepted) {
        Ok(accepted) => match serde_json::to_string_pretty(&accepted.status_view()) {
            Ok(json) => println!("- Public status payload:\n{}", json),
            Err(err) => println!("- Public status payload unavailable: {}", err),
        },
        Err(err) => println!("  Status update failed: {}", err),
    }

    Ok(())
}
