//! Badge desk: scan a badge, then reserve, hand over and take back items
//!
//! The desk is either empty ([`DeskState::NoUserLoaded`]) or showing one
//! user together with their open loans and the items still available.
//! Loading a user takes three requests; the desk only switches to the
//! loaded state when all three succeed.

use std::time::Duration;

use super::reject;
use crate::{
    client::PortariaApi,
    error::{ConsoleError, ConsoleResult},
    models::{Item, Loan, User},
    notice::NoticeBoard,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedUser {
    pub user: User,
    pub active_loans: Vec<Loan>,
    pub available_items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeskState {
    #[default]
    NoUserLoaded,
    UserLoaded(LoadedUser),
}

pub struct DeskScreen<A> {
    api: A,
    state: DeskState,
    notices: NoticeBoard,
}

impl<A: PortariaApi> DeskScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            state: DeskState::NoUserLoaded,
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn state(&self) -> &DeskState {
        &self.state
    }

    pub fn loaded(&self) -> Option<&LoadedUser> {
        match &self.state {
            DeskState::UserLoaded(loaded) => Some(loaded),
            DeskState::NoUserLoaded => None,
        }
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Back to the empty desk
    pub fn reset(&mut self) {
        self.state = DeskState::NoUserLoaded;
        self.notices.clear();
    }

    /// Resolve a typed or scanned badge number
    pub async fn lookup(&mut self, input: &str) -> ConsoleResult<&LoadedUser> {
        let badge = input.trim();
        if badge.is_empty() {
            return reject(&mut self.notices, "Enter a badge number");
        }
        self.notices.clear();

        match self.fetch_session(badge).await {
            Ok(loaded) => {
                tracing::info!(
                    "Badge {} resolved: {} active loans, {} items available",
                    badge,
                    loaded.active_loans.len(),
                    loaded.available_items.len()
                );
                self.notices.success(format!("User found: {}", loaded.user.name));
                self.state = DeskState::UserLoaded(loaded);
                self.loaded()
                    .ok_or_else(|| ConsoleError::InvalidState("desk lost its user".to_string()))
            }
            Err(e) => {
                tracing::warn!("Badge lookup for {} failed: {}", badge, e);
                self.state = DeskState::NoUserLoaded;
                self.notices.error("User not found or lookup failed");
                Err(e)
            }
        }
    }

    async fn fetch_session(&self, badge: &str) -> ConsoleResult<LoadedUser> {
        let user = self.api.read_badge(badge).await?;
        let active_loans = self.api.active_loans_by_badge(badge).await?;
        let available_items = self.api.list_available_items().await?;
        Ok(LoadedUser {
            user,
            active_loans,
            available_items,
        })
    }

    fn current_badge(&mut self) -> ConsoleResult<String> {
        match &self.state {
            DeskState::UserLoaded(loaded) => Ok(loaded.user.badge.clone()),
            DeskState::NoUserLoaded => {
                self.notices.error("Scan a badge first");
                Err(ConsoleError::InvalidState("no user loaded".to_string()))
            }
        }
    }

    /// Reserve an item for the loaded user, then reload both lists
    pub async fn checkout(&mut self, item_id: &str) -> ConsoleResult<Loan> {
        let badge = self.current_badge()?;
        let item_id = item_id.trim();
        if item_id.is_empty() {
            return reject(&mut self.notices, "Choose an item");
        }
        self.notices.clear();

        let result = self.api.reserve_by_badge(&badge, item_id).await;
        self.settle(result, &badge, true, "Reservation created", "Error creating reservation")
            .await
    }

    /// Record that the user took the item
    pub async fn pickup(&mut self, loan_id: &str) -> ConsoleResult<Loan> {
        let badge = self.current_badge()?;
        let loan_id = loan_id.trim();
        if loan_id.is_empty() {
            return reject(&mut self.notices, "Choose a reservation");
        }
        self.notices.clear();

        let result = self.api.pickup_by_badge(&badge, loan_id).await;
        self.settle(result, &badge, false, "Pickup registered", "Error registering pickup")
            .await
    }

    /// Record that the user brought the item back; the item becomes
    /// available again so both lists are reloaded.
    pub async fn give_back(&mut self, loan_id: &str) -> ConsoleResult<Loan> {
        let badge = self.current_badge()?;
        let loan_id = loan_id.trim();
        if loan_id.is_empty() {
            return reject(&mut self.notices, "Choose a reservation");
        }
        self.notices.clear();

        let result = self.api.return_by_badge(&badge, loan_id).await;
        self.settle(result, &badge, true, "Return registered", "Error registering return")
            .await
    }

    /// Report the outcome of a desk action and reload what it changed.
    ///
    /// Once the service accepted the action it is reported as done, even
    /// when the reload fails; the desk then keeps its previous lists.
    async fn settle(
        &mut self,
        result: ConsoleResult<Loan>,
        badge: &str,
        items_changed: bool,
        success: &str,
        failure: &str,
    ) -> ConsoleResult<Loan> {
        let loan = match result {
            Ok(loan) => loan,
            Err(e) => {
                tracing::error!("{}: {}", failure, e);
                self.notices.error(failure);
                return Err(e);
            }
        };

        match self.fetch_lists(badge, items_changed).await {
            Ok((active_loans, available_items)) => {
                if let DeskState::UserLoaded(loaded) = &mut self.state {
                    loaded.active_loans = active_loans;
                    if let Some(items) = available_items {
                        loaded.available_items = items;
                    }
                }
                self.notices.success(format!("{}: {}", success, loan.item_name));
            }
            Err(e) => {
                tracing::warn!("Reload after '{}' for badge {} failed: {}", success, badge, e);
                self.notices.error(format!(
                    "{}: {}, but lists could not be refreshed",
                    success, loan.item_name
                ));
            }
        }
        Ok(loan)
    }

    async fn fetch_lists(&self, badge: &str, items_changed: bool) -> ConsoleResult<(Vec<Loan>, Option<Vec<Item>>)> {
        let active_loans = self.api.active_loans_by_badge(badge).await?;
        let available_items = if items_changed {
            Some(self.api.list_available_items().await?)
        } else {
            None
        };
        Ok((active_loans, available_items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPortariaApi;
    use crate::models::LoanStatus;
    use crate::screens::fixtures::{item, loan, user};

    const BADGE: &str = "2023010187";

    fn not_found() -> ConsoleError {
        ConsoleError::Api {
            status: 404,
            status_text: "Not Found".to_string(),
        }
    }

    fn expect_session(api: &mut MockPortariaApi) {
        api.expect_read_badge()
            .withf(|b| b == BADGE)
            .times(1)
            .returning(|_| Ok(user("u1", "Ana", BADGE)));
    }

    #[tokio::test]
    async fn test_unknown_badge() {
        let mut api = MockPortariaApi::new();
        api.expect_read_badge().times(1).returning(|_| Err(not_found()));
        api.expect_active_loans_by_badge().never();
        api.expect_list_available_items().never();

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        assert!(desk.lookup("0000000000").await.is_err());

        assert_eq!(desk.state(), &DeskState::NoUserLoaded);
        assert_eq!(desk.notices().error_text(), Some("User not found or lookup failed"));
    }

    #[tokio::test]
    async fn test_blank_badge_makes_no_call() {
        let mut api = MockPortariaApi::new();
        api.expect_read_badge().never();

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        let err = desk.lookup("   ").await.unwrap_err();

        assert!(err.is_local());
        assert_eq!(desk.notices().error_text(), Some("Enter a badge number"));
    }

    #[tokio::test]
    async fn test_lookup_loads_user() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge()
            .times(1)
            .returning(|_| Ok(vec![loan("r1", "i9", LoanStatus::Reserved, "2024-05-01 09:00", None)]));
        api.expect_list_available_items()
            .times(1)
            .returning(|| Ok(vec![item("i1", "Sala 101", true)]));

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        let loaded = desk.lookup(" 2023010187\n").await.unwrap();

        assert_eq!(loaded.user.name, "Ana");
        assert_eq!(loaded.active_loans.len(), 1);
        assert_eq!(loaded.available_items.len(), 1);
        assert_eq!(desk.notices().success_text(), Some("User found: Ana"));
    }

    #[tokio::test]
    async fn test_partial_lookup_discards_everything() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge().times(1).returning(|_| Ok(vec![]));
        api.expect_list_available_items().times(1).returning(|| {
            Err(ConsoleError::Api {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })
        });

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        assert!(desk.lookup(BADGE).await.is_err());
        assert!(desk.loaded().is_none());
    }

    #[tokio::test]
    async fn test_checkout_refetches_both_lists() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);

        let mut loans_calls = 0;
        api.expect_active_loans_by_badge().times(2).returning(move |_| {
            loans_calls += 1;
            if loans_calls == 1 {
                Ok(vec![])
            } else {
                Ok(vec![loan("r1", "i1", LoanStatus::Reserved, "2024-05-01 09:00", None)])
            }
        });
        let mut items_calls = 0;
        api.expect_list_available_items().times(2).returning(move || {
            items_calls += 1;
            if items_calls == 1 {
                Ok(vec![item("i1", "Sala 101", true), item("i2", "Sala 102", true)])
            } else {
                Ok(vec![item("i2", "Sala 102", true)])
            }
        });
        api.expect_reserve_by_badge()
            .withf(|b, i| b == BADGE && i == "i1")
            .times(1)
            .returning(|_, _| Ok(loan("r1", "i1", LoanStatus::Reserved, "2024-05-01 09:00", None)));

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        desk.checkout("i1").await.unwrap();

        let loaded = desk.loaded().unwrap();
        assert_eq!(loaded.active_loans.len(), 1);
        assert!(loaded.available_items.iter().all(|i| i.id != "i1"));
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_state() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge().times(1).returning(|_| Ok(vec![]));
        api.expect_list_available_items()
            .times(1)
            .returning(|| Ok(vec![item("i1", "Sala 101", true)]));
        api.expect_reserve_by_badge().times(1).returning(|_, _| {
            Err(ConsoleError::Api {
                status: 400,
                status_text: "Bad Request".to_string(),
            })
        });

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        let before = desk.state().clone();

        assert!(desk.checkout("i1").await.is_err());
        assert_eq!(desk.state(), &before);
        assert_eq!(desk.notices().error_text(), Some("Error creating reservation"));
    }

    #[tokio::test]
    async fn test_pickup_only_refetches_loans() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge()
            .times(2)
            .returning(|_| Ok(vec![loan("r1", "i1", LoanStatus::Reserved, "2024-05-01 09:00", None)]));
        api.expect_list_available_items().times(1).returning(|| Ok(vec![]));
        api.expect_pickup_by_badge()
            .withf(|b, l| b == BADGE && l == "r1")
            .times(1)
            .returning(|_, _| Ok(loan("r1", "i1", LoanStatus::PickedUp, "2024-05-01 09:00", None)));

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        let picked = desk.pickup("r1").await.unwrap();

        assert_eq!(picked.status, LoanStatus::PickedUp);
        assert_eq!(desk.notices().success_text(), Some("Pickup registered: Item i1"));
    }

    #[tokio::test]
    async fn test_return_refetches_items() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge().times(2).returning(|_| Ok(vec![]));
        let mut items_calls = 0;
        api.expect_list_available_items().times(2).returning(move || {
            items_calls += 1;
            if items_calls == 1 {
                Ok(vec![])
            } else {
                Ok(vec![item("i1", "Sala 101", true)])
            }
        });
        api.expect_return_by_badge().times(1).returning(|_, _| {
            Ok(loan(
                "r1",
                "i1",
                LoanStatus::Returned,
                "2024-05-01 09:00",
                Some("2024-05-01 17:00"),
            ))
        });

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        desk.give_back("r1").await.unwrap();

        assert_eq!(desk.loaded().unwrap().available_items.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_survives_failed_reload() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);

        let mut loans_calls = 0;
        api.expect_active_loans_by_badge().times(2).returning(move |_| {
            loans_calls += 1;
            if loans_calls == 1 {
                Ok(vec![])
            } else {
                Err(ConsoleError::Api {
                    status: 502,
                    status_text: "Bad Gateway".to_string(),
                })
            }
        });
        api.expect_list_available_items()
            .times(1)
            .returning(|| Ok(vec![item("i1", "Sala 101", true)]));
        api.expect_reserve_by_badge()
            .times(1)
            .returning(|_, _| Ok(loan("r1", "i1", LoanStatus::Reserved, "2024-05-01 09:00", None)));

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        let before = desk.state().clone();

        let created = desk.checkout("i1").await.unwrap();

        assert_eq!(created.id, "r1");
        assert_eq!(desk.state(), &before);
        assert_eq!(
            desk.notices().error_text(),
            Some("Reservation created: Item i1, but lists could not be refreshed")
        );
    }

    #[tokio::test]
    async fn test_blank_reservation_id_makes_no_call() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge().times(1).returning(|_| Ok(vec![]));
        api.expect_list_available_items().times(1).returning(|| Ok(vec![]));
        api.expect_pickup_by_badge().never();
        api.expect_return_by_badge().never();

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();

        let err = desk.pickup("  ").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(desk.notices().error_text(), Some("Choose a reservation"));
        assert!(desk.give_back("").await.unwrap_err().is_local());
    }

    #[tokio::test]
    async fn test_actions_need_a_user() {
        let mut api = MockPortariaApi::new();
        api.expect_reserve_by_badge().never();

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        let err = desk.checkout("i1").await.unwrap_err();

        assert!(matches!(err, ConsoleError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_reset() {
        let mut api = MockPortariaApi::new();
        expect_session(&mut api);
        api.expect_active_loans_by_badge().times(1).returning(|_| Ok(vec![]));
        api.expect_list_available_items().times(1).returning(|| Ok(vec![]));

        let mut desk = DeskScreen::new(api, Duration::from_secs(5));
        desk.lookup(BADGE).await.unwrap();
        desk.reset();

        assert_eq!(desk.state(), &DeskState::NoUserLoaded);
        assert!(desk.notices().current().is_none());
    }
}
