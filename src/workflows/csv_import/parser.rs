use crate::workflows::tasklist::{AvailabilitySlot, InvalidDataError, RecordRef, Task};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::ImportError;

#[derive(Debug, Deserialize)]
struct TaskRow {
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(
        rename = "Total Hours",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    total_hours: Option<String>,
    #[serde(
        rename = "Completed Hours",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_hours: Option<String>,
    #[serde(rename = "Due Date", default, deserialize_with = "empty_string_as_none")]
    due_date: Option<String>,
}

impl TaskRow {
    fn into_task(self, position: usize) -> Result<Task, InvalidDataError> {
        let record = || RecordRef::Task {
            position,
            name: self.name.clone().unwrap_or_default(),
        };

        let name = required(record, "name", self.name.as_deref())?;
        let total_hours = parse_hours(record, "total_hours", self.total_hours.as_deref())?;
        let completed_hours =
            parse_hours(record, "completed_hours", self.completed_hours.as_deref())?;
        let due_date = parse_date_field(record, "due_date", self.due_date.as_deref())?;

        Ok(Task::new(name, total_hours, completed_hours, due_date))
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    #[serde(rename = "Date", default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(rename = "Hours", default, deserialize_with = "empty_string_as_none")]
    hours: Option<String>,
}

impl AvailabilityRow {
    fn into_slot(self, position: usize) -> Result<AvailabilitySlot, InvalidDataError> {
        let parsed_date = self.date.as_deref().and_then(parse_date);
        let record = || RecordRef::Availability {
            position,
            date: parsed_date,
        };

        let date = parse_date_field(record, "date", self.date.as_deref())?;
        let hours = parse_hours(record, "hours", self.hours.as_deref())?;

        Ok(AvailabilitySlot::new(date, hours))
    }
}

pub(crate) fn parse_tasks<R: Read>(reader: R) -> Result<Vec<Task>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut tasks = Vec::new();

    for (index, row) in csv_reader.deserialize::<TaskRow>().enumerate() {
        let task = row?.into_task(index + 1)?;
        task.validate(index + 1)?;
        tasks.push(task);
    }

    Ok(tasks)
}

pub(crate) fn parse_availability<R: Read>(
    reader: R,
) -> Result<Vec<AvailabilitySlot>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut slots = Vec::new();

    for (index, row) in csv_reader.deserialize::<AvailabilityRow>().enumerate() {
        let slot = row?.into_slot(index + 1)?;
        slot.validate(index + 1)?;
        slots.push(slot);
    }

    Ok(slots)
}

fn required<'a>(
    record: impl Fn() -> RecordRef,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, InvalidDataError> {
    value.ok_or_else(|| InvalidDataError::MissingField {
        record: record(),
        field,
    })
}

fn parse_hours(
    record: impl Fn() -> RecordRef + Copy,
    field: &'static str,
    value: Option<&str>,
) -> Result<f64, InvalidDataError> {
    let raw = required(record, field, value)?;
    raw.parse::<f64>()
        .map_err(|err| InvalidDataError::Unparseable {
            record: record(),
            field,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

fn parse_date_field(
    record: impl Fn() -> RecordRef + Copy,
    field: &'static str,
    value: Option<&str>,
) -> Result<NaiveDate, InvalidDataError> {
    let raw = required(record, field, value)?;
    parse_date(raw).ok_or_else(|| InvalidDataError::Unparseable {
        record: record(),
        field,
        value: raw.to_string(),
        reason: "expected YYYY-MM-DD or an RFC 3339 timestamp".to_string(),
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
