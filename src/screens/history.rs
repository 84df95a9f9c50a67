//! Loan history screen

use std::cmp::Ordering;
use std::time::Duration;

use crate::{
    client::PortariaApi,
    error::ConsoleResult,
    models::{HandoverRequest, Loan, LoanStatus},
    notice::NoticeBoard,
};

/// Open loans first, newest reservation first; returned loans after,
/// most recently returned first. The sort is stable.
pub fn sort_history(loans: &mut [Loan]) {
    loans.sort_by(|a, b| match (a.is_open(), b.is_open()) {
        (true, true) => b.reserved_at.cmp(&a.reserved_at),
        (false, false) => b.returned_at.cmp(&a.returned_at),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    All,
    Badge(String),
}

pub struct HistoryScreen<A> {
    api: A,
    scope: Scope,
    loans: Vec<Loan>,
    notices: NoticeBoard,
}

impl<A: PortariaApi> HistoryScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            scope: Scope::All,
            loans: Vec::new(),
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn active(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|l| l.is_open())
    }

    pub fn finished(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|l| !l.is_open())
    }

    pub fn count(&self, status: LoanStatus) -> usize {
        self.loans.iter().filter(|l| l.status == status).count()
    }

    /// Every loan the service knows about
    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.scope = Scope::All;
        self.refresh().await
    }

    /// Loans of one user, open and returned
    pub async fn load_for_badge(&mut self, badge: &str) -> ConsoleResult<()> {
        self.scope = Scope::Badge(badge.trim().to_string());
        self.refresh().await
    }

    async fn refresh(&mut self) -> ConsoleResult<()> {
        let result = match &self.scope {
            Scope::All => self.api.list_loans().await,
            Scope::Badge(badge) => self.api.list_loans_by_badge(badge).await,
        };
        match result {
            Ok(mut loans) => {
                sort_history(&mut loans);
                self.loans = loans;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading reservations: {}", e);
                self.notices.error("Error loading reservations");
                Err(e)
            }
        }
    }

    /// Mark a reservation as picked up on behalf of `badge`
    pub async fn register_pickup(&mut self, loan_id: &str, badge: &str) -> ConsoleResult<Loan> {
        let request = HandoverRequest {
            user_badge: badge.trim().to_string(),
        };
        self.notices.clear();
        let result = self.api.register_pickup(loan_id, &request).await;
        self.settle(result, loan_id, "Pickup registered", "Error registering pickup")
            .await
    }

    /// Mark a loan as returned on behalf of `badge`
    pub async fn register_return(&mut self, loan_id: &str, badge: &str) -> ConsoleResult<Loan> {
        let request = HandoverRequest {
            user_badge: badge.trim().to_string(),
        };
        self.notices.clear();
        let result = self.api.register_return(loan_id, &request).await;
        self.settle(result, loan_id, "Return registered", "Error registering return")
            .await
    }

    /// A transition the service accepted stays reported as done when the
    /// reload after it fails.
    async fn settle(
        &mut self,
        result: ConsoleResult<Loan>,
        loan_id: &str,
        success: &str,
        failure: &str,
    ) -> ConsoleResult<Loan> {
        let loan = match result {
            Ok(loan) => loan,
            Err(e) => {
                tracing::error!("{} {}: {}", failure, loan_id, e);
                self.notices.error(failure);
                return Err(e);
            }
        };

        match self.refresh().await {
            Ok(()) => self.notices.success(format!("{}: {}", success, loan.item_name)),
            Err(_) => self.notices.error(format!(
                "{}: {}, but the list could not be refreshed",
                success, loan.item_name
            )),
        }
        Ok(loan)
    }
}
