//! Plain-text rendering of screen state for the terminal

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::{
    models::{ClearReport, Dashboard, Item, Loan, User},
    notice::{NoticeBoard, NoticeKind},
};

/// `dd/mm/yyyy HH:MM`, the format the desk staff are used to
pub fn datetime(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

fn optional_datetime(value: Option<&NaiveDateTime>) -> String {
    value.map(datetime).unwrap_or_else(|| "-".to_string())
}

pub fn notice(board: &NoticeBoard) -> Option<String> {
    board.current().map(|n| match n.kind {
        NoticeKind::Error => format!("[error] {}", n.text),
        NoticeKind::Success => format!("[ok] {}", n.text),
    })
}

pub fn dashboard(snapshot: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available items : {} / {}", snapshot.items_available, snapshot.items_total);
    let _ = writeln!(out, "Active loans    : {}", snapshot.active_loans);
    let _ = writeln!(out, "Total loans     : {}", snapshot.total_loans);
    let _ = writeln!(out, "Occupancy       : {}%", snapshot.occupancy_percent());
    out
}

pub fn items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<26} {:<28} {:<15} {:<11} {}", "ID", "NAME", "KIND", "STATUS", "LOCATION");
    for item in items {
        let status = if item.available { "available" } else { "in use" };
        let _ = writeln!(
            out,
            "{:<26} {:<28} {:<15} {:<11} {}",
            item.id,
            item.name,
            item.kind.to_string(),
            status,
            item.location
        );
    }
    out
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<26} {:<28} {:<11} {:<14} {}", "ID", "NAME", "ROLE", "BADGE", "EMAIL");
    for user in users {
        let _ = writeln!(
            out,
            "{:<26} {:<28} {:<11} {:<14} {}",
            user.id,
            user.name,
            user.role.to_string(),
            user.badge,
            user.email
        );
    }
    out
}

pub fn loans(loans: &[Loan]) -> String {
    if loans.is_empty() {
        return "No reservations\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<26} {:<24} {:<20} {:<10} {:<16} {:<16} {}",
        "ID", "ITEM", "USER", "STATUS", "RESERVED", "PICKED UP", "RETURNED"
    );
    for loan in loans {
        let _ = writeln!(
            out,
            "{:<26} {:<24} {:<20} {:<10} {:<16} {:<16} {}",
            loan.id,
            loan.item_name,
            format!("{} ({})", loan.user_name, loan.user_badge),
            loan.status.to_string(),
            datetime(&loan.reserved_at),
            optional_datetime(loan.picked_up_at.as_ref()),
            optional_datetime(loan.returned_at.as_ref())
        );
    }
    out
}

pub fn clear_report(report: &ClearReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.message);
    let _ = writeln!(out, "Active reservations removed : {}", report.active_removed);
    let _ = writeln!(out, "Total reservations removed  : {}", report.total_removed);
    let _ = writeln!(out, "Items made available        : {}", report.items_released);
    let _ = writeln!(out, "At                          : {}", datetime(&report.timestamp));
    out
}
