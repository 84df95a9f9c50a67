//! Per-screen state controllers
//!
//! Each controller owns its working copy of server collections and is only
//! mutated through `&mut self`, so at most one operation per screen is in
//! flight. Screens never share state; each refetches on its own.

pub mod clear;
pub mod dashboard;
pub mod desk;
pub mod history;
pub mod items;
pub mod new_loan;
pub mod users;

use validator::Validate;

use crate::{
    error::{ConsoleError, ConsoleResult},
    models::Identified,
    notice::NoticeBoard,
};

pub use clear::ClearScreen;
pub use dashboard::DashboardScreen;
pub use desk::{DeskScreen, DeskState, LoadedUser};
pub use history::HistoryScreen;
pub use items::ItemsScreen;
pub use new_loan::NewLoanScreen;
pub use users::UsersScreen;

/// Local copy of a server collection, keyed by record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Add a record confirmed by the server. A record with the same id is
    /// replaced rather than duplicated.
    pub fn append(&mut self, record: T) {
        match self.position(record.id()) {
            Some(idx) => self.records[idx] = record,
            None => self.records.push(record),
        }
    }

    /// Replace the record stored under `id`; appends if it is not present
    pub fn replace(&mut self, id: &str, record: T) {
        match self.position(id) {
            Some(idx) => self.records[idx] = record,
            None => self.records.push(record),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.position(id).map(|idx| self.records.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Validate a form, raising the failure on the screen's notice board
pub(crate) fn check_form<F: Validate>(form: &F, notices: &mut NoticeBoard) -> ConsoleResult<()> {
    form.validate().map_err(|e| {
        let err = ConsoleError::from(e);
        if let ConsoleError::Validation(msg) = &err {
            notices.error(msg.clone());
        }
        err
    })
}

/// Reject an action locally with a visible message
pub(crate) fn reject<T>(notices: &mut NoticeBoard, message: &str) -> ConsoleResult<T> {
    notices.error(message);
    Err(ConsoleError::Validation(message.to_string()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::models::{Item, ItemKind, Loan, LoanStatus, User, UserRole};

    pub fn user(id: &str, name: &str, badge: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            role: UserRole::Student,
            badge: badge.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
        }
    }

    pub fn item(id: &str, name: &str, available: bool) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            kind: ItemKind::Key,
            available,
            location: "Bloco A".to_string(),
        }
    }

    pub fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    pub fn loan(id: &str, item_id: &str, status: LoanStatus, reserved: &str, returned: Option<&str>) -> Loan {
        Loan {
            id: id.to_string(),
            item_id: item_id.to_string(),
            item_name: format!("Item {}", item_id),
            user_id: "u1".to_string(),
            user_name: "Ana".to_string(),
            user_badge: "2023010187".to_string(),
            reserved_at: at(reserved),
            picked_up_at: None,
            returned_at: returned.map(at),
            status,
        }
    }
}
