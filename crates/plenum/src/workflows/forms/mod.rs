//! Declarative validators for inbound form payloads.
//!
//! These run before anything reaches the data layer; they check shape and
//! business constraints only and never touch storage.

pub mod export;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use export::{export_participants, ExportError, ParticipantRow};

const MIN_PHONE_DIGITS: usize = 6;
const MAX_PHONE_DIGITS: usize = 15;

/// Validation failures surfaced to the caller before persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("conference title must not be empty")]
    EmptyConferenceTitle,
    #[error("conference must end on or after it starts")]
    ConferenceEndsBeforeStart,
    #[error("total seats must be greater than zero")]
    NoSeats,
    #[error("registration deadline must not be after the conference start")]
    DeadlineAfterStart,
    #[error("survey question must not be empty")]
    EmptySurveyQuestion,
    #[error("survey needs at least two distinct options")]
    TooFewSurveyOptions,
    #[error("survey options must not be blank")]
    BlankSurveyOption,
    #[error("phone number contains invalid character '{0}'")]
    InvalidPhoneCharacter(char),
    #[error("phone number must contain 6 to 15 digits, found {found}")]
    PhoneDigitCount { found: usize },
    #[error("unsupported csv delimiter '{0}'")]
    UnsupportedDelimiter(char),
    #[error("csv export needs at least one column")]
    NoExportColumns,
    #[error("duplicate export column '{0}'")]
    DuplicateExportColumn(&'static str),
}

/// Conference configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceSettingsForm {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_seats: u32,
    pub registration_deadline: DateTime<Utc>,
}

impl ConferenceSettingsForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyConferenceTitle);
        }
        if self.end < self.start {
            return Err(ValidationError::ConferenceEndsBeforeStart);
        }
        if self.total_seats == 0 {
            return Err(ValidationError::NoSeats);
        }
        if self.registration_deadline.date_naive() > self.start {
            return Err(ValidationError::DeadlineAfterStart);
        }
        Ok(())
    }
}

/// Participant survey definition form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyForm {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl SurveyForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::EmptySurveyQuestion);
        }
        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(ValidationError::BlankSurveyOption);
        }

        let mut distinct: Vec<&str> = self.options.iter().map(|option| option.trim()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(ValidationError::TooFewSurveyOptions);
        }
        Ok(())
    }
}

/// Validate a phone number: optional leading `+`, then digits with common
/// separators, carrying 6 to 15 digits overall.
pub fn phone_number(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = 0usize;
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' | '/' => {}
            other => return Err(ValidationError::InvalidPhoneCharacter(other)),
        }
    }

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::PhoneDigitCount { found: digits });
    }
    Ok(())
}

/// Columns available for the participant list export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantColumn {
    Id,
    DisplayName,
    Delegation,
    BirthDate,
    Age,
    PostalStatus,
}

impl ParticipantColumn {
    pub const fn header(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DisplayName => "display_name",
            Self::Delegation => "delegation",
            Self::BirthDate => "birth_date",
            Self::Age => "age",
            Self::PostalStatus => "postal_status",
        }
    }
}

const SUPPORTED_DELIMITERS: [char; 3] = [',', ';', '\t'];

/// Settings controlling the participant CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvExportSettings {
    pub delimiter: char,
    pub columns: Vec<ParticipantColumn>,
    pub include_header: bool,
}

impl CsvExportSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !SUPPORTED_DELIMITERS.contains(&self.delimiter) {
            return Err(ValidationError::UnsupportedDelimiter(self.delimiter));
        }
        if self.columns.is_empty() {
            return Err(ValidationError::NoExportColumns);
        }
        for (index, column) in self.columns.iter().enumerate() {
            if self.columns[index + 1..].contains(column) {
                return Err(ValidationError::DuplicateExportColumn(column.header()));
            }
        }
        Ok(())
    }
}
