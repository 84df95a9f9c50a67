//! Dashboard snapshot

use serde::{Deserialize, Serialize};

/// Counters recomputed by the service on every fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "itensDisponiveis")]
    pub items_available: u64,
    #[serde(rename = "totalItens")]
    pub items_total: u64,
    #[serde(rename = "reservasAtivas")]
    pub active_loans: u64,
    #[serde(rename = "totalReservas")]
    pub total_loans: u64,
}

impl Dashboard {
    /// Share of items currently out, as a rounded percentage. 0 when there are no items.
    pub fn occupancy_percent(&self) -> u64 {
        if self.items_total == 0 {
            return 0;
        }
        let in_use = self.items_total.saturating_sub(self.items_available);
        ((in_use as f64 / self.items_total as f64) * 100.0).round() as u64
    }
}
