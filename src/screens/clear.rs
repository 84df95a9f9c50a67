//! Bulk reset of every reservation

use std::time::Duration;

use super::reject;
use crate::{client::PortariaApi, error::ConsoleResult, models::ClearReport, notice::NoticeBoard};

pub struct ClearScreen<A> {
    api: A,
    confirmed: bool,
    report: Option<ClearReport>,
    notices: NoticeBoard,
}

impl<A: PortariaApi> ClearScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            confirmed: false,
            report: None,
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn set_confirmed(&mut self, confirmed: bool) {
        self.confirmed = confirmed;
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn report(&self) -> Option<&ClearReport> {
        self.report.as_ref()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Delete all reservations. Refused unless confirmed; cannot be undone.
    pub async fn clear_all(&mut self) -> ConsoleResult<&ClearReport> {
        if !self.confirmed {
            return reject(&mut self.notices, "You must confirm the operation before proceeding");
        }
        self.notices.clear();
        self.report = None;

        match self.api.clear_all_loans().await {
            Ok(report) => {
                tracing::info!(
                    "Cleared {} reservations ({} active), {} items released",
                    report.total_removed,
                    report.active_removed,
                    report.items_released
                );
                self.confirmed = false;
                self.notices.success("All reservations were removed");
                Ok(&*self.report.insert(report))
            }
            Err(e) => {
                tracing::error!("Error clearing reservations: {}", e);
                self.notices.error("Error clearing reservations. Try again.");
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.confirmed = false;
        self.report = None;
        self.notices.clear();
    }
}
