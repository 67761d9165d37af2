use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CsvExportSettings, ParticipantColumn, ValidationError};
use crate::workflows::registration::domain::ConsentState;

/// One participant row as handed to the export, already joined with its
/// derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub id: String,
    pub display_name: String,
    pub delegation: String,
    pub birth_date: NaiveDate,
    pub age: Option<i32>,
    pub postal_status: ConsentState,
}

impl ParticipantRow {
    fn field(&self, column: ParticipantColumn) -> String {
        match column {
            ParticipantColumn::Id => self.id.clone(),
            ParticipantColumn::DisplayName => self.display_name.clone(),
            ParticipantColumn::Delegation => self.delegation.clone(),
            ParticipantColumn::BirthDate => self.birth_date.to_string(),
            ParticipantColumn::Age => self
                .age
                .map(|age| age.to_string())
                .unwrap_or_default(),
            ParticipantColumn::PostalStatus => self.postal_status.label().to_string(),
        }
    }
}

/// Failures while rendering the CSV payload.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Settings(#[from] ValidationError),
    #[error("csv write failed: {0}")]
    Write(#[from] csv::Error),
    #[error("export buffer was not valid utf-8")]
    InvalidUtf8,
}

/// Render participant rows as CSV according to validated export settings.
pub fn export_participants(
    settings: &CsvExportSettings,
    rows: &[ParticipantRow],
) -> Result<String, ExportError> {
    settings.validate()?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(settings.delimiter as u8)
        .from_writer(Vec::new());

    if settings.include_header {
        writer.write_record(settings.columns.iter().map(|column| column.header()))?;
    }

    for row in rows {
        writer.write_record(settings.columns.iter().map(|column| row.field(*column)))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|error| ExportError::Write(csv::Error::from(error.into_error())))?;
    String::from_utf8(buffer).map_err(|_| ExportError::InvalidUtf8)
}
