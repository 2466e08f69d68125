use super::domain::{AvailabilitySlot, Task, Workload};
use chrono::NaiveDate;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("embedded calendar contains an invalid date"),
    }
}

/// (name, total hours, completed hours, due date)
const TASKS: &[(&str, f64, f64, NaiveDate)] = &[
    ("Math Week 5", 4.0, 3.0, ymd(2025, 9, 19)),
    ("English Paragraph", 1.0, 1.0, ymd(2025, 9, 17)),
    ("Music DNA 2", 2.0, 1.0, ymd(2025, 9, 19)),
    ("Triangle CS", 1.0, 0.75, ymd(2025, 9, 22)),
    ("Quiz 2 Math", 1.0, 1.0, ymd(2025, 9, 19)),
];

const AVAILABILITY: &[(NaiveDate, f64)] = &[
    (ymd(2025, 9, 15), 2.0),
    (ymd(2025, 9, 16), 5.0),
    (ymd(2025, 9, 17), 4.5),
    (ymd(2025, 9, 18), 4.0),
    (ymd(2025, 9, 19), 2.0),
    (ymd(2025, 9, 20), 10.0),
    (ymd(2025, 9, 21), 0.0),
    (ymd(2025, 9, 22), 2.0),
    (ymd(2025, 9, 23), 4.0),
];

/// The workload compiled into the binary, used when no CSV source is configured.
pub fn embedded_workload() -> Workload {
    let tasks = TASKS
        .iter()
        .map(|&(name, total, completed, due)| Task::new(name, total, completed, due))
        .collect();
    let availability = AVAILABILITY
        .iter()
        .map(|&(date, hours)| AvailabilitySlot::new(date, hours))
        .collect();

    Workload::new(tasks, availability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_workload_is_well_formed() {
        let workload = embedded_workload();
        assert_eq!(workload.tasks().len(), 5);
        assert_eq!(workload.availability().len(), 9);
        workload.validate().expect("embedded data validates");
    }

    #[test]
    fn embedded_availability_is_in_calendar_order() {
        let workload = embedded_workload();
        assert!(workload
            .availability()
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
    }
}
