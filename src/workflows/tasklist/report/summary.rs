use super::super::domain::{FeasibilityStatus, WorkloadVerdict};
use super::views::{
    OverallSummaryView, ProcrastinationWindowView, TaskAssessmentView, TodayAdjustmentView,
    WorkloadReportSummary,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Which sections of the report to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    #[default]
    Full,
    Buffers,
    Procrastination,
}

impl ReportKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Full => "Workload report",
            Self::Buffers => "Buffer time report",
            Self::Procrastination => "Procrastination report",
        }
    }

    pub const fn includes_buffers(self) -> bool {
        matches!(self, Self::Full | Self::Buffers)
    }

    pub const fn includes_procrastination(self) -> bool {
        matches!(self, Self::Full | Self::Procrastination)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayAdjustment {
    pub hours_used: f64,
    /// `None` when no availability is declared for today.
    pub remaining_today: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskAssessment {
    pub name: String,
    pub due_date: NaiveDate,
    pub remaining_hours: f64,
    pub available_hours: f64,
    pub buffer_hours: f64,
    pub status: FeasibilityStatus,
}

impl TaskAssessment {
    pub fn to_view(&self) -> TaskAssessmentView {
        TaskAssessmentView {
            name: self.name.clone(),
            due_date: self.due_date,
            remaining_hours: self.remaining_hours,
            available_hours: self.available_hours,
            buffer_hours: self.buffer_hours,
            status: self.status,
            status_label: self.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallSummary {
    pub total_remaining_hours: f64,
    pub total_available_hours: f64,
    pub earliest_due_date: Option<NaiveDate>,
    pub available_before_earliest_due: f64,
    pub at_risk_tasks: usize,
    /// Available minus remaining; negative when overcommitted.
    pub margin_hours: f64,
    pub verdict: WorkloadVerdict,
}

impl OverallSummary {
    pub fn to_view(&self) -> OverallSummaryView {
        OverallSummaryView {
            total_remaining_hours: self.total_remaining_hours,
            total_available_hours: self.total_available_hours,
            earliest_due_date: self.earliest_due_date,
            available_before_earliest_due: self.available_before_earliest_due,
            at_risk_tasks: self.at_risk_tasks,
            margin_hours: self.margin_hours,
            verdict: self.verdict,
            verdict_label: self.verdict.label(),
        }
    }
}

/// A group of tasks sharing a due date, evaluated only against the hours
/// between the previous due date and its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcrastinationWindow {
    pub name: String,
    pub due_date: NaiveDate,
    pub window_start: NaiveDate,
    pub required_hours: f64,
    pub available_hours: f64,
    pub buffer_hours: f64,
    pub status: FeasibilityStatus,
}

impl ProcrastinationWindow {
    pub fn to_view(&self) -> ProcrastinationWindowView {
        ProcrastinationWindowView {
            name: self.name.clone(),
            due_date: self.due_date,
            window_start: self.window_start,
            required_hours: self.required_hours,
            available_hours: self.available_hours,
            buffer_hours: self.buffer_hours,
            status: self.status,
            status_label: self.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadReport {
    pub today: NaiveDate,
    pub adjustment: TodayAdjustment,
    pub assessments: Vec<TaskAssessment>,
    pub overall: OverallSummary,
    pub windows: Vec<ProcrastinationWindow>,
}

impl WorkloadReport {
    pub fn summary(&self, kind: ReportKind) -> WorkloadReportSummary {
        let (tasks, overall) = if kind.includes_buffers() {
            (
                Some(
                    self.assessments
                        .iter()
                        .map(TaskAssessment::to_view)
                        .collect::<Vec<_>>(),
                ),
                Some(self.overall.to_view()),
            )
        } else {
            (None, None)
        };

        let procrastination = kind.includes_procrastination().then(|| {
            self.windows
                .iter()
                .map(ProcrastinationWindow::to_view)
                .collect::<Vec<_>>()
        });

        WorkloadReportSummary {
            kind,
            title: kind.title(),
            today: self.today,
            today_adjustment: TodayAdjustmentView {
                hours_used: self.adjustment.hours_used,
                remaining_today: self.adjustment.remaining_today,
            },
            tasks,
            overall,
            procrastination,
        }
    }
}
