use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit of work with a fixed effort estimate and a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub total_hours: f64,
    pub completed_hours: f64,
    pub due_date: NaiveDate,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        total_hours: f64,
        completed_hours: f64,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            total_hours,
            completed_hours,
            due_date,
        }
    }

    /// Hours of effort still outstanding. Never negative.
    pub fn remaining_hours(&self) -> f64 {
        (self.total_hours - self.completed_hours).max(0.0)
    }

    /// `position` is the 1-based index used in error messages.
    pub fn validate(&self, position: usize) -> Result<(), InvalidDataError> {
        let record = || RecordRef::Task {
            position,
            name: self.name.trim().to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(InvalidDataError::MissingField {
                record: record(),
                field: "name",
            });
        }

        check_hours(record, "total_hours", self.total_hours)?;
        check_hours(record, "completed_hours", self.completed_hours)?;

        if self.completed_hours > self.total_hours {
            return Err(InvalidDataError::CompletedExceedsTotal {
                record: record(),
                completed: self.completed_hours,
                total: self.total_hours,
            });
        }

        Ok(())
    }
}

/// Hours free for work on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub hours: f64,
}

impl AvailabilitySlot {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self { date, hours }
    }

    pub fn validate(&self, position: usize) -> Result<(), InvalidDataError> {
        check_hours(
            || RecordRef::Availability {
                position,
                date: Some(self.date),
            },
            "hours",
            self.hours,
        )
    }
}

/// The tasks and availability a report is computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workload {
    tasks: Vec<Task>,
    availability: Vec<AvailabilitySlot>,
}

impl Workload {
    pub fn new(tasks: Vec<Task>, availability: Vec<AvailabilitySlot>) -> Self {
        Self {
            tasks,
            availability,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn availability(&self) -> &[AvailabilitySlot] {
        &self.availability
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        Self { tasks, ..self }
    }

    pub fn with_availability(self, availability: Vec<AvailabilitySlot>) -> Self {
        Self {
            availability,
            ..self
        }
    }

    /// Fails on the first record that violates its basic shape.
    pub fn validate(&self) -> Result<(), InvalidDataError> {
        for (index, task) in self.tasks.iter().enumerate() {
            task.validate(index + 1)?;
        }
        for (index, slot) in self.availability.iter().enumerate() {
            slot.validate(index + 1)?;
        }
        Ok(())
    }
}

fn check_hours(
    record: impl Fn() -> RecordRef,
    field: &'static str,
    value: f64,
) -> Result<(), InvalidDataError> {
    if !value.is_finite() {
        return Err(InvalidDataError::NonFiniteValue {
            record: record(),
            field,
        });
    }
    if value < 0.0 {
        return Err(InvalidDataError::NegativeValue {
            record: record(),
            field,
            value,
        });
    }
    Ok(())
}

/// Identifies the offending record in an [`InvalidDataError`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRef {
    Task {
        position: usize,
        name: String,
    },
    Availability {
        position: usize,
        date: Option<NaiveDate>,
    },
    HoursUsedToday,
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Task { position, name } if name.is_empty() => {
                write!(f, "task #{position}")
            }
            RecordRef::Task { position, name } => write!(f, "task #{position} '{name}'"),
            RecordRef::Availability {
                position,
                date: Some(date),
            } => write!(f, "availability slot #{position} ({date})"),
            RecordRef::Availability { position, .. } => {
                write!(f, "availability slot #{position}")
            }
            RecordRef::HoursUsedToday => write!(f, "hours used today"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidDataError {
    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: RecordRef,
        field: &'static str,
    },
    #[error("{record} has negative {field} ({value})")]
    NegativeValue {
        record: RecordRef,
        field: &'static str,
        value: f64,
    },
    #[error("{record} has a non-finite {field}")]
    NonFiniteValue {
        record: RecordRef,
        field: &'static str,
    },
    #[error("{record} lists {completed} completed hours but only {total} total hours")]
    CompletedExceedsTotal {
        record: RecordRef,
        completed: f64,
        total: f64,
    },
    #[error("{record} has unreadable {field} '{value}': {reason}")]
    Unparseable {
        record: RecordRef,
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityStatus {
    OnTrack,
    AtRisk,
}

/// Slack absorbed when comparing hour totals, so `1.0 - 0.7` still fits in `0.3`.
pub const HOURS_TOLERANCE: f64 = 1e-9;

/// Whether `available_hours` covers `required_hours`. Equality counts as covered.
pub fn hours_cover(available_hours: f64, required_hours: f64) -> bool {
    available_hours + HOURS_TOLERANCE >= required_hours
}

impl FeasibilityStatus {
    pub fn classify(available_hours: f64, required_hours: f64) -> Self {
        if hours_cover(available_hours, required_hours) {
            Self::OnTrack
        } else {
            Self::AtRisk
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadVerdict {
    Feasible,
    Overcommitted,
}

impl WorkloadVerdict {
    pub fn classify(total_available_hours: f64, total_remaining_hours: f64) -> Self {
        if hours_cover(total_available_hours, total_remaining_hours) {
            Self::Feasible
        } else {
            Self::Overcommitted
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Feasible => "Feasible",
            Self::Overcommitted => "Overcommitted",
        }
    }
}
