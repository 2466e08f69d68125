use super::domain::{
    AvailabilitySlot, FeasibilityStatus, InvalidDataError, RecordRef, Task, Workload,
    WorkloadVerdict,
};
use super::report::{
    OverallSummary, ProcrastinationWindow, TaskAssessment, TodayAdjustment, WorkloadReport,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Evaluates a validated workload against the availability left from `today` on.
#[derive(Debug)]
pub struct WorkloadPlanner<'a> {
    workload: &'a Workload,
    today: NaiveDate,
    availability: Vec<AvailabilitySlot>,
    adjustment: TodayAdjustment,
}

impl<'a> WorkloadPlanner<'a> {
    /// Validates the workload and applies the hours already spent today.
    pub fn new(
        workload: &'a Workload,
        today: NaiveDate,
        hours_used_today: f64,
    ) -> Result<Self, InvalidDataError> {
        workload.validate()?;

        if !hours_used_today.is_finite() {
            return Err(InvalidDataError::NonFiniteValue {
                record: RecordRef::HoursUsedToday,
                field: "hours",
            });
        }
        if hours_used_today < 0.0 {
            return Err(InvalidDataError::NegativeValue {
                record: RecordRef::HoursUsedToday,
                field: "hours",
                value: hours_used_today,
            });
        }

        let (availability, adjustment) =
            adjust_availability(workload.availability(), today, hours_used_today);

        debug!(
            tasks = workload.tasks().len(),
            slots = availability.len(),
            %today,
            hours_used_today,
            "workload loaded"
        );

        Ok(Self {
            workload,
            today,
            availability,
            adjustment,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Availability after the today adjustment, including past slots.
    pub fn adjusted_availability(&self) -> &[AvailabilitySlot] {
        &self.availability
    }

    /// Hours dated within `start..=end`, ignoring anything before today.
    pub fn available_between(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let start = start.max(self.today);
        self.availability
            .iter()
            .filter(|slot| start <= slot.date && slot.date <= end)
            .map(|slot| slot.hours)
            .sum()
    }

    /// Hours available from today through `through`, inclusive.
    pub fn cumulative_availability(&self, through: NaiveDate) -> f64 {
        self.available_between(self.today, through)
    }

    pub fn total_available(&self) -> f64 {
        self.availability
            .iter()
            .filter(|slot| slot.date >= self.today)
            .map(|slot| slot.hours)
            .sum()
    }

    pub fn assess(&self, task: &Task) -> TaskAssessment {
        let remaining_hours = task.remaining_hours();
        let available_hours = self.cumulative_availability(task.due_date);
        let status = FeasibilityStatus::classify(available_hours, remaining_hours);

        if status == FeasibilityStatus::AtRisk {
            warn!(
                task = %task.name,
                due = %task.due_date,
                remaining_hours,
                available_hours,
                "task at risk of missing its due date"
            );
        }

        TaskAssessment {
            name: task.name.clone(),
            due_date: task.due_date,
            remaining_hours,
            available_hours,
            buffer_hours: available_hours - remaining_hours,
            status,
        }
    }

    /// Per-task feasibility ordered by due date; ties keep declaration order.
    pub fn assessments(&self) -> Vec<TaskAssessment> {
        let mut tasks: Vec<&Task> = self.workload.tasks().iter().collect();
        tasks.sort_by_key(|task| task.due_date);
        tasks.into_iter().map(|task| self.assess(task)).collect()
    }

    pub fn overall(&self, assessments: &[TaskAssessment]) -> OverallSummary {
        let total_remaining_hours: f64 = self
            .workload
            .tasks()
            .iter()
            .map(Task::remaining_hours)
            .sum();
        let total_available_hours = self.total_available();
        let earliest_due_date = self.workload.tasks().iter().map(|task| task.due_date).min();
        let available_before_earliest_due = earliest_due_date
            .map(|due| self.cumulative_availability(due))
            .unwrap_or(0.0);
        let at_risk_tasks = assessments
            .iter()
            .filter(|assessment| assessment.status == FeasibilityStatus::AtRisk)
            .count();

        let verdict = WorkloadVerdict::classify(total_available_hours, total_remaining_hours);
        if verdict == WorkloadVerdict::Overcommitted {
            warn!(
                total_remaining_hours,
                total_available_hours, "workload exceeds remaining availability"
            );
        }

        OverallSummary {
            total_remaining_hours,
            total_available_hours,
            earliest_due_date,
            available_before_earliest_due,
            at_risk_tasks,
            margin_hours: total_available_hours - total_remaining_hours,
            verdict,
        }
    }

    /// Assumes no work starts on a group until the previous due date has passed.
    /// Each window opens the day after the previous due date or after today,
    /// whichever is later, so today's hours never count toward a window.
    pub fn procrastination_windows(&self) -> Vec<ProcrastinationWindow> {
        let mut previous_due: Option<NaiveDate> = None;
        let mut windows = Vec::new();

        for (due_date, group) in merge_by_due_date(self.workload.tasks()) {
            let window_start = previous_due
                .map_or(self.today, |due| due.max(self.today))
                .succ_opt()
                .unwrap_or(NaiveDate::MAX);
            let available_hours = self.available_between(window_start, due_date);
            let required_hours = group.remaining_hours();

            debug!(
                tasks = %group.name,
                %window_start,
                %due_date,
                available_hours,
                required_hours,
                "procrastination window"
            );

            windows.push(ProcrastinationWindow {
                name: group.name,
                due_date,
                window_start,
                required_hours,
                available_hours,
                buffer_hours: available_hours - required_hours,
                status: FeasibilityStatus::classify(available_hours, required_hours),
            });
            previous_due = Some(due_date);
        }

        windows
    }

    pub fn report(&self) -> WorkloadReport {
        let assessments = self.assessments();
        let overall = self.overall(&assessments);
        let windows = self.procrastination_windows();

        info!(
            today = %self.today,
            tasks = assessments.len(),
            at_risk = overall.at_risk_tasks,
            verdict = overall.verdict.label(),
            "workload report generated"
        );

        WorkloadReport {
            today: self.today,
            adjustment: self.adjustment.clone(),
            assessments,
            overall,
            windows,
        }
    }
}

/// Subtracts `hours_used` from the first slot dated `today`, clamping at zero.
pub fn adjust_availability(
    availability: &[AvailabilitySlot],
    today: NaiveDate,
    hours_used: f64,
) -> (Vec<AvailabilitySlot>, TodayAdjustment) {
    let mut adjusted = availability.to_vec();
    let remaining_today = adjusted
        .iter_mut()
        .find(|slot| slot.date == today)
        .map(|slot| {
            slot.hours = (slot.hours - hours_used).max(0.0);
            slot.hours
        });

    (
        adjusted,
        TodayAdjustment {
            hours_used,
            remaining_today,
        },
    )
}

struct MergedGroup {
    name: String,
    total_hours: f64,
    completed_hours: f64,
}

impl MergedGroup {
    fn remaining_hours(&self) -> f64 {
        (self.total_hours - self.completed_hours).max(0.0)
    }
}

fn merge_by_due_date(tasks: &[Task]) -> BTreeMap<NaiveDate, MergedGroup> {
    let mut groups: BTreeMap<NaiveDate, MergedGroup> = BTreeMap::new();

    for task in tasks {
        groups
            .entry(task.due_date)
            .and_modify(|group| {
                group.name.push_str(" & ");
                group.name.push_str(&task.name);
                group.total_hours += task.total_hours;
                group.completed_hours += task.completed_hours;
            })
            .or_insert_with(|| MergedGroup {
                name: task.name.clone(),
                total_hours: task.total_hours,
                completed_hours: task.completed_hours,
            });
    }

    groups
}
