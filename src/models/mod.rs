//! Data models mirrored from the loan service

pub mod dashboard;
pub mod enums;
pub mod item;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use dashboard::Dashboard;
pub use enums::{ItemKind, LoanStatus, UserRole};
pub use item::{Item, ItemForm};
pub use loan::{ClearReport, HandoverRequest, Loan, LoanRequest};
pub use user::{User, UserForm};

/// Records addressed by a server-assigned identifier
pub trait Identified {
    fn id(&self) -> &str;
}
