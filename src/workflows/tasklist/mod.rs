mod data;
pub mod domain;
mod planner;
pub mod report;

pub use data::embedded_workload;
pub use domain::{
    AvailabilitySlot, FeasibilityStatus, InvalidDataError, RecordRef, Task, Workload,
    WorkloadVerdict,
};
pub use planner::{adjust_availability, WorkloadPlanner};
pub use report::{ReportKind, WorkloadReport};
