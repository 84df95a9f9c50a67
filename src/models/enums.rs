//! Shared domain enums (wire values match the loan service)

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of a registered user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    #[serde(rename = "ALUNO")]
    Student,
    #[serde(rename = "PROFESSOR")]
    Professor,
    #[serde(rename = "PORTEIRO")]
    Doorkeeper,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Student, UserRole::Professor, UserRole::Doorkeeper];
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Student => "Student",
            UserRole::Professor => "Professor",
            UserRole::Doorkeeper => "Doorkeeper",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aluno" | "student" => Ok(UserRole::Student),
            "professor" => Ok(UserRole::Professor),
            "porteiro" | "doorkeeper" => Ok(UserRole::Doorkeeper),
            other => Err(format!("unknown user role '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// Category of a lendable item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    #[serde(rename = "CHAVE")]
    Key,
    #[serde(rename = "CONTROLE")]
    RemoteControl,
    #[serde(rename = "OUTRO")]
    Other,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemKind::Key => "Key",
            ItemKind::RemoteControl => "Remote control",
            ItemKind::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chave" | "key" => Ok(ItemKind::Key),
            "controle" | "remote" | "remote-control" => Ok(ItemKind::RemoteControl),
            "outro" | "other" => Ok(ItemKind::Other),
            other => Err(format!("unknown item kind '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Loan lifecycle; transitions only move forward and are done by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "RESERVADO")]
    Reserved,
    #[serde(rename = "RETIRADO")]
    PickedUp,
    #[serde(rename = "DEVOLVIDO")]
    Returned,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 3] = [LoanStatus::Reserved, LoanStatus::PickedUp, LoanStatus::Returned];

    pub fn is_open(&self) -> bool {
        !matches!(self, LoanStatus::Returned)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Reserved => "Reserved",
            LoanStatus::PickedUp => "Picked up",
            LoanStatus::Returned => "Returned",
        };
        write!(f, "{}", label)
    }
}
