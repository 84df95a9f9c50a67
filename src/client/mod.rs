//! Transport client for the loan service
//!
//! [`PortariaApi`] has one method per remote endpoint. [`ApiClient`] is the
//! HTTP implementation; screen controllers only depend on the trait.

pub mod http;
pub mod response;

use async_trait::async_trait;

use crate::{
    error::ConsoleResult,
    models::{ClearReport, Dashboard, HandoverRequest, Item, ItemForm, Loan, LoanRequest, User, UserForm},
};

pub use http::ApiClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortariaApi: Send + Sync {
    // Dashboard
    async fn dashboard(&self) -> ConsoleResult<Dashboard>;

    // Users
    async fn list_users(&self) -> ConsoleResult<Vec<User>>;
    async fn get_user(&self, id: &str) -> ConsoleResult<User>;
    async fn find_user_by_badge(&self, badge: &str) -> ConsoleResult<User>;
    async fn create_user(&self, form: &UserForm) -> ConsoleResult<User>;
    async fn update_user(&self, id: &str, form: &UserForm) -> ConsoleResult<User>;
    async fn delete_user(&self, id: &str) -> ConsoleResult<()>;

    // Items
    async fn list_items(&self) -> ConsoleResult<Vec<Item>>;
    async fn list_available_items(&self) -> ConsoleResult<Vec<Item>>;
    async fn get_item(&self, id: &str) -> ConsoleResult<Item>;
    async fn create_item(&self, form: &ItemForm) -> ConsoleResult<Item>;
    async fn update_item(&self, id: &str, form: &ItemForm) -> ConsoleResult<Item>;
    async fn set_item_availability(&self, id: &str, available: bool) -> ConsoleResult<Item>;
    async fn delete_item(&self, id: &str) -> ConsoleResult<()>;

    // Loans
    async fn list_loans(&self) -> ConsoleResult<Vec<Loan>>;
    async fn list_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>>;
    async fn list_active_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>>;
    async fn create_loan(&self, request: &LoanRequest) -> ConsoleResult<Loan>;
    async fn register_pickup(&self, loan_id: &str, request: &HandoverRequest) -> ConsoleResult<Loan>;
    async fn register_return(&self, loan_id: &str, request: &HandoverRequest) -> ConsoleResult<Loan>;

    /// Delete every loan and release the items they held. Irreversible.
    async fn clear_all_loans(&self) -> ConsoleResult<ClearReport>;

    // Badge desk
    async fn read_badge(&self, badge: &str) -> ConsoleResult<User>;
    async fn reserve_by_badge(&self, badge: &str, item_id: &str) -> ConsoleResult<Loan>;
    async fn pickup_by_badge(&self, badge: &str, loan_id: &str) -> ConsoleResult<Loan>;
    async fn return_by_badge(&self, badge: &str, loan_id: &str) -> ConsoleResult<Loan>;
    async fn active_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>>;
}
