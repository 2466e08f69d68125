use chrono::{Days, NaiveDate};
use tasklist::workflows::tasklist::{
    embedded_workload, AvailabilitySlot, FeasibilityStatus, InvalidDataError, ReportKind, Task,
    Workload, WorkloadPlanner, WorkloadVerdict,
};

fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 14)
        .expect("valid base date")
        .checked_add_days(Days::new(n))
        .expect("valid day")
}

fn report_task() -> Task {
    Task::new("Report", 10.0, 4.0, day(3))
}

fn availability(hours: [f64; 3]) -> Vec<AvailabilitySlot> {
    hours
        .iter()
        .enumerate()
        .map(|(index, &hours)| AvailabilitySlot::new(day(index as u64 + 1), hours))
        .collect()
}

#[test]
fn boundary_equal_availability_is_on_track() {
    let workload = Workload::new(vec![report_task()], availability([2.0, 2.0, 2.0]));
    let planner = WorkloadPlanner::new(&workload, day(1), 0.0).expect("workload validates");
    let report = planner.report();

    let assessment = &report.assessments[0];
    assert_eq!(assessment.remaining_hours, 6.0);
    assert_eq!(assessment.available_hours, 6.0);
    assert_eq!(assessment.status, FeasibilityStatus::OnTrack);
    assert_eq!(report.overall.verdict, WorkloadVerdict::Feasible);
}

#[test]
fn insufficient_availability_is_at_risk() {
    let workload = Workload::new(vec![report_task()], availability([1.0, 1.0, 1.0]));
    let planner = WorkloadPlanner::new(&workload, day(1), 0.0).expect("workload validates");
    let report = planner.report();

    assert_eq!(report.assessments[0].available_hours, 3.0);
    assert_eq!(report.assessments[0].status, FeasibilityStatus::AtRisk);
    assert_eq!(report.overall.at_risk_tasks, 1);
    assert_eq!(report.overall.verdict, WorkloadVerdict::Overcommitted);
}

#[test]
fn decimal_remaining_hours_that_exactly_fit_are_on_track() {
    let workload = Workload::new(
        vec![Task::new("Reading", 1.0, 0.7, day(1))],
        vec![AvailabilitySlot::new(day(1), 0.3)],
    );
    let planner = WorkloadPlanner::new(&workload, day(1), 0.0).expect("workload validates");
    let report = planner.report();

    assert_eq!(report.assessments[0].status, FeasibilityStatus::OnTrack);
    assert_eq!(report.overall.at_risk_tasks, 0);
    assert_eq!(report.overall.verdict, WorkloadVerdict::Feasible);
}

#[test]
fn today_after_every_slot_leaves_no_availability() {
    let workload = embedded_workload();
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    let planner = WorkloadPlanner::new(&workload, today, 2.0).expect("embedded data validates");
    let report = planner.report();

    assert_eq!(report.adjustment.remaining_today, None);
    assert_eq!(report.overall.total_available_hours, 0.0);
    assert_eq!(report.overall.available_before_earliest_due, 0.0);
    assert_eq!(report.overall.at_risk_tasks, 3);
    assert_eq!(report.overall.verdict, WorkloadVerdict::Overcommitted);

    for assessment in &report.assessments {
        assert_eq!(assessment.available_hours, 0.0, "{}", assessment.name);
        let expected = if assessment.remaining_hours > 0.0 {
            FeasibilityStatus::AtRisk
        } else {
            FeasibilityStatus::OnTrack
        };
        assert_eq!(assessment.status, expected, "{}", assessment.name);
    }

    assert_eq!(report.windows.len(), 3);
    for window in &report.windows {
        assert_eq!(window.available_hours, 0.0, "{}", window.name);
        assert!(window.window_start > today);
    }
}

#[test]
fn every_task_status_follows_the_cumulative_inequality() {
    let workload = embedded_workload();
    let today = NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid date");
    let planner = WorkloadPlanner::new(&workload, today, 4.0).expect("embedded data validates");

    for assessment in planner.report().assessments {
        let expected = if assessment.available_hours >= assessment.remaining_hours {
            FeasibilityStatus::OnTrack
        } else {
            FeasibilityStatus::AtRisk
        };
        assert_eq!(assessment.status, expected, "{}", assessment.name);
        assert_eq!(
            assessment.available_hours,
            planner.cumulative_availability(assessment.due_date)
        );
    }
}

#[test]
fn embedded_workload_report_matches_declared_calendar() {
    let workload = embedded_workload();
    let today = NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid date");
    let planner = WorkloadPlanner::new(&workload, today, 0.0).expect("embedded data validates");
    let report = planner.report();

    let names: Vec<&str> = report
        .assessments
        .iter()
        .map(|assessment| assessment.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "English Paragraph",
            "Math Week 5",
            "Music DNA 2",
            "Quiz 2 Math",
            "Triangle CS"
        ]
    );
    assert_eq!(report.overall.total_remaining_hours, 2.25);
    assert_eq!(report.overall.total_available_hours, 33.5);
    assert_eq!(report.overall.available_before_earliest_due, 11.5);
    assert_eq!(report.overall.verdict, WorkloadVerdict::Feasible);

    let windows = &report.windows;
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].name, "English Paragraph");
    assert_eq!(windows[0].window_start, day(2));
    assert_eq!(windows[0].available_hours, 9.5);
    assert_eq!(windows[1].name, "Math Week 5 & Music DNA 2 & Quiz 2 Math");
    assert_eq!(windows[1].required_hours, 2.0);
    assert_eq!(windows[1].available_hours, 6.0);
    assert_eq!(windows[2].window_start, day(6));
    assert_eq!(windows[2].available_hours, 12.0);
}

#[test]
fn malformed_records_fail_without_a_report() {
    let workload = Workload::new(
        vec![report_task(), Task::new("Broken", 1.0, 2.0, day(2))],
        availability([2.0, 2.0, 2.0]),
    );

    let error = WorkloadPlanner::new(&workload, day(1), 0.0).expect_err("invalid task rejected");
    assert!(matches!(error, InvalidDataError::CompletedExceedsTotal { .. }));
    assert_eq!(
        error.to_string(),
        "task #2 'Broken' lists 2 completed hours but only 1 total hours"
    );
}

#[test]
fn summary_sections_follow_report_kind() {
    let workload = Workload::new(vec![report_task()], availability([2.0, 2.0, 2.0]));
    let planner = WorkloadPlanner::new(&workload, day(1), 0.0).expect("workload validates");
    let report = planner.report();

    let buffers = report.summary(ReportKind::Buffers);
    assert!(buffers.tasks.is_some());
    assert!(buffers.overall.is_some());
    assert!(buffers.procrastination.is_none());

    let procrastination = report.summary(ReportKind::Procrastination);
    assert!(procrastination.tasks.is_none());
    assert_eq!(
        procrastination.procrastination.map(|windows| windows.len()),
        Some(1)
    );
}
