mod parser;

use crate::workflows::tasklist::{AvailabilitySlot, InvalidDataError, Task, Workload};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read CSV file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),
}

/// Loads tasks and availability from CSV exports.
///
/// Tasks use the header `Name,Total Hours,Completed Hours,Due Date`;
/// availability uses `Date,Hours`.
pub struct CsvWorkloadImporter;

impl CsvWorkloadImporter {
    pub fn tasks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let tasks = Self::tasks_from_reader(file)?;
        debug!(path = %path.display(), count = tasks.len(), "tasks imported");
        Ok(tasks)
    }

    pub fn tasks_from_reader<R: Read>(reader: R) -> Result<Vec<Task>, ImportError> {
        parser::parse_tasks(reader)
    }

    pub fn availability_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<AvailabilitySlot>, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let slots = Self::availability_from_reader(file)?;
        debug!(path = %path.display(), count = slots.len(), "availability imported");
        Ok(slots)
    }

    pub fn availability_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<AvailabilitySlot>, ImportError> {
        parser::parse_availability(reader)
    }

    /// Replaces whichever lists have a CSV path, keeping the rest of `base`.
    pub fn overlay(
        base: Workload,
        tasks_csv: Option<&Path>,
        availability_csv: Option<&Path>,
    ) -> Result<Workload, ImportError> {
        let mut workload = base;
        if let Some(path) = tasks_csv {
            workload = workload.with_tasks(Self::tasks_from_path(path)?);
        }
        if let Some(path) = availability_csv {
            workload = workload.with_availability(Self::availability_from_path(path)?);
        }
        Ok(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::tasklist::RecordRef;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn parse_date_supports_plain_dates_and_rfc3339() {
        assert_eq!(
            parser::parse_date_for_tests("2025-09-19"),
            NaiveDate::from_ymd_opt(2025, 9, 19)
        );
        assert_eq!(
            parser::parse_date_for_tests("2025-09-19T23:30:00Z"),
            NaiveDate::from_ymd_opt(2025, 9, 19)
        );
        assert!(parser::parse_date_for_tests("  ").is_none());
        assert!(parser::parse_date_for_tests("09/19/2025").is_none());
    }

    #[test]
    fn tasks_parse_with_trimmed_cells() {
        let csv = "Name,Total Hours,Completed Hours,Due Date\n  Math Week 5 , 4 , 3 , 2025-09-19 \n";
        let tasks = CsvWorkloadImporter::tasks_from_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Math Week 5");
        assert_eq!(tasks[0].remaining_hours(), 1.0);
        assert_eq!(
            tasks[0].due_date,
            NaiveDate::from_ymd_opt(2025, 9, 19).expect("valid date")
        );
    }

    #[test]
    fn blank_cell_is_reported_as_missing_field() {
        let csv = "Name,Total Hours,Completed Hours,Due Date\nEssay,4,,2025-09-19\n";
        let error = CsvWorkloadImporter::tasks_from_reader(Cursor::new(csv))
            .expect_err("missing completed hours");

        match error {
            ImportError::InvalidData(InvalidDataError::MissingField { record, field }) => {
                assert_eq!(field, "completed_hours");
                assert_eq!(
                    record,
                    RecordRef::Task {
                        position: 1,
                        name: "Essay".to_string()
                    }
                );
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_hours_name_the_row_and_column() {
        let csv = "Date,Hours\n2025-09-15,2\n2025-09-16,lots\n";
        let error = CsvWorkloadImporter::availability_from_reader(Cursor::new(csv))
            .expect_err("hours must be numeric");

        assert_eq!(
            error.to_string(),
            "availability slot #2 (2025-09-16) has unreadable hours 'lots': invalid float literal"
        );
    }

    #[test]
    fn shape_violations_are_rejected_on_import() {
        let csv = "Date,Hours\n2025-09-15,-2\n";
        assert!(matches!(
            CsvWorkloadImporter::availability_from_reader(Cursor::new(csv)),
            Err(ImportError::InvalidData(
                InvalidDataError::NegativeValue { .. }
            ))
        ));
    }

    #[test]
    fn missing_file_propagates_io_error() {
        let error = CsvWorkloadImporter::tasks_from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(error, ImportError::Io(_)));
    }
}
