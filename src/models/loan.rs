//! Loan (reservation) model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::LoanStatus;
use super::Identified;

/// Loan with the denormalized item and user fields the service sends back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    #[serde(rename = "usuarioId")]
    pub user_id: String,
    #[serde(rename = "nomeUsuario")]
    pub user_name: String,
    #[serde(rename = "matriculaUsuario")]
    pub user_badge: String,
    #[serde(rename = "dataReserva")]
    pub reserved_at: NaiveDateTime,
    #[serde(rename = "dataRetirada", default)]
    pub picked_up_at: Option<NaiveDateTime>,
    #[serde(rename = "dataDevolucao", default)]
    pub returned_at: Option<NaiveDateTime>,
    pub status: LoanStatus,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

impl Identified for Loan {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create loan request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoanRequest {
    #[serde(rename = "itemId")]
    #[validate(length(min = 1, message = "Item is required"))]
    pub item_id: String,
    #[serde(rename = "matriculaUsuario")]
    #[validate(length(min = 1, message = "User badge is required"))]
    pub user_badge: String,
}

/// Pickup/return request, carrying the acting badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoverRequest {
    #[serde(rename = "matriculaUsuario")]
    pub user_badge: String,
}

/// Outcome of the bulk "clear all reservations" operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearReport {
    pub message: String,
    #[serde(rename = "reservasAtivasRemovidas")]
    pub active_removed: u64,
    #[serde(rename = "totalReservasRemovidas")]
    pub total_removed: u64,
    #[serde(rename = "itensDisponibilizados")]
    pub items_released: u64,
    pub timestamp: NaiveDateTime,
}
