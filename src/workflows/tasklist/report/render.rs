use super::super::domain::{FeasibilityStatus, WorkloadVerdict};
use super::views::WorkloadReportSummary;
use chrono::NaiveDate;

/// Human-readable rendering of a report summary, one line per entry.
pub fn render_text(summary: &WorkloadReportSummary) -> String {
    let mut lines = vec![
        summary.title.to_string(),
        format!("Today is {}", summary.today.format("%A, %B %d, %Y")),
    ];

    let adjustment = &summary.today_adjustment;
    match adjustment.remaining_today {
        Some(remaining) => lines.push(format!(
            "Hours used today: {:.1} ({:.1} hours left today)",
            adjustment.hours_used, remaining
        )),
        None if adjustment.hours_used > 0.0 => lines.push(format!(
            "Hours used today: {:.1} (no availability declared for today)",
            adjustment.hours_used
        )),
        None => {}
    }

    if let Some(tasks) = &summary.tasks {
        lines.push(String::new());
        lines.push("Task feasibility".to_string());
        if tasks.is_empty() {
            lines.push("- no tasks declared".to_string());
        }
        for task in tasks {
            lines.push(format!(
                "- {} (due {}): {:.1}h available, {:.1}h required -> {}, {}",
                task.name,
                short_date(task.due_date),
                task.available_hours,
                task.remaining_hours,
                task.status_label,
                buffer_note(task.status, task.buffer_hours),
            ));
        }
    }

    if let Some(overall) = &summary.overall {
        lines.push(String::new());
        lines.push("Overall workload".to_string());
        lines.push(format!(
            "- Total remaining work: {:.1}h",
            overall.total_remaining_hours
        ));
        lines.push(format!(
            "- Total available time: {:.1}h",
            overall.total_available_hours
        ));
        if let Some(earliest) = overall.earliest_due_date {
            lines.push(format!(
                "- Available through earliest due date ({}): {:.1}h",
                short_date(earliest),
                overall.available_before_earliest_due
            ));
        }
        lines.push(format!("- Tasks at risk: {}", overall.at_risk_tasks));
        let verdict = match overall.verdict {
            WorkloadVerdict::Feasible => {
                format!("{:.1}h to spare", overall.margin_hours.max(0.0))
            }
            WorkloadVerdict::Overcommitted => {
                format!("short by {:.1}h, find extra time", -overall.margin_hours)
            }
        };
        lines.push(format!("- Verdict: {}, {}", overall.verdict_label, verdict));
    }

    if let Some(windows) = &summary.procrastination {
        lines.push(String::new());
        lines.push("Procrastination windows".to_string());
        if windows.is_empty() {
            lines.push("- no tasks declared".to_string());
        }
        for window in windows {
            let outcome = match window.status {
                FeasibilityStatus::OnTrack => format!(
                    "can procrastinate until then with {:.1}h spare",
                    window.buffer_hours.max(0.0)
                ),
                FeasibilityStatus::AtRisk => format!(
                    "procrastination fails, short by {:.1}h",
                    -window.buffer_hours
                ),
            };
            lines.push(format!(
                "- {} (due {}): window {} -> {}, {:.1}h available, {:.1}h required -> {}",
                window.name,
                short_date(window.due_date),
                short_date(window.window_start),
                short_date(window.due_date),
                window.available_hours,
                window.required_hours,
                outcome,
            ));
        }
    }

    lines.join("\n")
}

fn short_date(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

fn buffer_note(status: FeasibilityStatus, buffer_hours: f64) -> String {
    match status {
        // On-track buffers can sit a rounding tail below zero.
        FeasibilityStatus::OnTrack => format!("buffer {:.1}h", buffer_hours.max(0.0)),
        FeasibilityStatus::AtRisk => format!("short by {:.1}h", -buffer_hours),
    }
}
