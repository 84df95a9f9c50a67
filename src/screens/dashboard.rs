//! Dashboard screen

use std::time::Duration;

use crate::{client::PortariaApi, error::ConsoleResult, models::Dashboard, notice::NoticeBoard};

pub struct DashboardScreen<A> {
    api: A,
    snapshot: Option<Dashboard>,
    notices: NoticeBoard,
}

impl<A: PortariaApi> DashboardScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            snapshot: None,
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn snapshot(&self) -> Option<&Dashboard> {
        self.snapshot.as_ref()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn occupancy_percent(&self) -> u64 {
        self.snapshot.map(|d| d.occupancy_percent()).unwrap_or(0)
    }

    pub async fn load(&mut self) -> ConsoleResult<&Dashboard> {
        match self.api.dashboard().await {
            Ok(snapshot) => Ok(&*self.snapshot.insert(snapshot)),
            Err(e) => {
                tracing::error!("Error loading dashboard: {}", e);
                self.notices.error("Error loading dashboard");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPortariaApi;

    #[tokio::test]
    async fn test_counters_verbatim() {
        let mut api = MockPortariaApi::new();
        api.expect_dashboard().times(1).returning(|| {
            Ok(Dashboard {
                items_available: 3,
                items_total: 10,
                active_loans: 7,
                total_loans: 41,
            })
        });

        let mut screen = DashboardScreen::new(api, Duration::from_secs(5));
        let snapshot = *screen.load().await.unwrap();

        assert_eq!(snapshot.total_loans, 41);
        assert_eq!(screen.occupancy_percent(), 70);
    }

    #[tokio::test]
    async fn test_no_snapshot_means_zero() {
        let mut api = MockPortariaApi::new();
        api.expect_dashboard().times(1).returning(|| {
            Err(crate::error::ConsoleError::Api {
                status: 503,
                status_text: "Service Unavailable".to_string(),
            })
        });

        let mut screen = DashboardScreen::new(api, Duration::from_secs(5));
        assert!(screen.load().await.is_err());
        assert_eq!(screen.occupancy_percent(), 0);
        assert!(screen.snapshot().is_none());
    }
}
