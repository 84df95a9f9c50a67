//! Manual reservation form: pick an available item and a user

use std::time::Duration;

use super::check_form;
use crate::{
    client::PortariaApi,
    error::ConsoleResult,
    models::{Item, Loan, LoanRequest, User},
    notice::NoticeBoard,
};

pub struct NewLoanScreen<A> {
    api: A,
    available_items: Vec<Item>,
    users: Vec<User>,
    form: LoanRequest,
    lists_loaded: bool,
    notices: NoticeBoard,
}

impl<A: PortariaApi> NewLoanScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            available_items: Vec::new(),
            users: Vec::new(),
            form: LoanRequest::default(),
            lists_loaded: false,
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn available_items(&self) -> &[Item] {
        &self.available_items
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &LoanRequest {
        &self.form
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn select_item(&mut self, item_id: &str) {
        self.form.item_id = item_id.trim().to_string();
    }

    pub fn select_user(&mut self, badge: &str) {
        self.form.user_badge = badge.trim().to_string();
    }

    /// Fetch both pick lists; they are independent, so they load together
    pub async fn load(&mut self) -> ConsoleResult<()> {
        let result = tokio::try_join!(self.api.list_available_items(), self.api.list_users());
        match result {
            Ok((items, users)) => {
                self.available_items = items;
                self.users = users;
                self.lists_loaded = true;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading data: {}", e);
                self.notices.error("Error loading data");
                Err(e)
            }
        }
    }

    /// Create the reservation. The pick lists are reloaded afterwards only
    /// if they were loaded before.
    pub async fn submit(&mut self) -> ConsoleResult<Loan> {
        if let Err(e) = check_form(&self.form, &mut self.notices) {
            self.notices.error("Fill in all fields");
            return Err(e);
        }
        self.notices.clear();

        match self.api.create_loan(&self.form).await {
            Ok(loan) => {
                self.form = LoanRequest::default();
                // The new reservation took an item off the list
                if self.lists_loaded {
                    if let Err(e) = self.load().await {
                        tracing::warn!("Reload after reservation failed: {}", e);
                    }
                }
                self.notices.success("Reservation created");
                Ok(loan)
            }
            Err(e) => {
                tracing::error!("Error creating reservation: {}", e);
                self.notices.error("Error creating reservation");
                Err(e)
            }
        }
    }
}
