use super::super::domain::{FeasibilityStatus, WorkloadVerdict};
use super::summary::ReportKind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TodayAdjustmentView {
    pub hours_used: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_today: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskAssessmentView {
    pub name: String,
    pub due_date: NaiveDate,
    pub remaining_hours: f64,
    pub available_hours: f64,
    pub buffer_hours: f64,
    pub status: FeasibilityStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallSummaryView {
    pub total_remaining_hours: f64,
    pub total_available_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_due_date: Option<NaiveDate>,
    pub available_before_earliest_due: f64,
    pub at_risk_tasks: usize,
    pub margin_hours: f64,
    pub verdict: WorkloadVerdict,
    pub verdict_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcrastinationWindowView {
    pub name: String,
    pub due_date: NaiveDate,
    pub window_start: NaiveDate,
    pub required_hours: f64,
    pub available_hours: f64,
    pub buffer_hours: f64,
    pub status: FeasibilityStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReportSummary {
    pub kind: ReportKind,
    pub title: &'static str,
    pub today: NaiveDate,
    pub today_adjustment: TodayAdjustmentView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskAssessmentView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallSummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procrastination: Option<Vec<ProcrastinationWindowView>>,
}
