//! Plain-text rendering for terminal output.

use bastion_core::{Role, User};
use bastion_service::{Notification, NotificationLevel};
use bastion_state::{LifecycleAction, Resource};
use bastion_store::DashboardSummary;

const HEADERS: [&str; 7] = ["ID", "NAME", "REGION", "RESOURCE GROUP", "COST/MONTH", "LAST USED", "STATUS"];

/// The command that performs `action`.
pub fn command_hint(action: LifecycleAction) -> &'static str {
    match action {
        LifecycleAction::ApproveForDeletion => "approve",
        LifecycleAction::RejectForDeletion => "keep --ritm",
        LifecycleAction::ConfirmDeletion => "admin confirm",
        LifecycleAction::RejectDeletion => "admin reject",
    }
}

/// Status label, with the RITM number when one is recorded.
pub fn status_cell(resource: &Resource) -> String {
    match resource.ritm_number() {
        Some(ritm) => format!("{} ({ritm})", resource.status().label()),
        None => resource.status().label().to_string(),
    }
}

/// What `role` can do with `resource`, or why it cannot do anything.
pub fn actions_cell(resource: &Resource, role: Role) -> String {
    let actions = resource.available_actions(role);
    if actions.is_empty() {
        return resource.status().note().to_string();
    }
    actions
        .into_iter()
        .map(command_hint)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Aligned table of `resources` with an actions column for `role`.
pub fn resource_table(resources: &[Resource], role: Role) -> String {
    if resources.is_empty() {
        return "No resources found.\n".to_string();
    }

    let rows: Vec<[String; 8]> = resources
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.region.clone(),
                r.resource_group.clone(),
                r.cost_per_month.to_string(),
                r.last_used.to_string(),
                status_cell(r),
                actions_cell(r, role),
            ]
        })
        .collect();

    let mut widths = [0usize; 7];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = rows
            .iter()
            .map(|row| row[i].chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().copied(), &widths, "ACTIONS");
    for row in &rows {
        push_row(&mut out, row[..7].iter().map(String::as_str), &widths, &row[7]);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 7], last: &str) {
    for (cell, width) in cells.zip(widths) {
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count()) + 2;
        out.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(last);
    out.push('\n');
}

pub fn summary(summary: &DashboardSummary) -> String {
    format!(
        "Total bastions:          {}\n\
         Pending decision:        {}\n\
         Approved for deletion:   {}\n\
         Potential savings:       {} / month\n",
        summary.total, summary.pending, summary.approved_for_deletion, summary.potential_savings
    )
}

pub fn notification(n: &Notification) -> String {
    let mark = match n.level {
        NotificationLevel::Success => "OK",
        NotificationLevel::Failure => "FAILED",
    };
    let mut line = format!("{mark}: {}. {}", n.title, n.message);
    if n.retryable {
        line.push_str(" (retrying may succeed)");
    }
    line
}

pub fn user_line(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role)
}
