//! Dashboard summary cards: inventory status, active inventory and the
//! financial overview. Each card keeps its last good value (zero until the
//! first successful fetch).

use crate::client::InventoryClient;
use crate::effect::{Outcome, Outgoing};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{FinancialOverview, InventoryStatus};

/// Capacity the active-inventory gauge is drawn against.
pub const INVENTORY_CAPACITY: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTicket {
    InventoryStatus,
    ActiveInventory,
    FinancialOverview,
}

pub type SummaryRequest = Outgoing<SummaryTicket>;

#[derive(Debug, Clone)]
pub struct Dashboard {
    client: InventoryClient,
    inventory_status: InventoryStatus,
    active_inventory: u64,
    financial_overview: FinancialOverview,
}

impl Dashboard {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            client,
            inventory_status: InventoryStatus::default(),
            active_inventory: 0,
            financial_overview: FinancialOverview::default(),
        }
    }

    pub fn inventory_status(&self) -> InventoryStatus {
        self.inventory_status
    }

    pub fn active_inventory(&self) -> u64 {
        self.active_inventory
    }

    pub fn financial_overview(&self) -> FinancialOverview {
        self.financial_overview
    }

    /// Share of the gauge filled, capped at 100.
    pub fn inventory_usage_percent(&self) -> f64 {
        let percent = self.active_inventory as f64 / INVENTORY_CAPACITY as f64 * 100.0;
        percent.min(100.0)
    }

    pub fn refresh(&self) -> Vec<SummaryRequest> {
        vec![
            Outgoing::new(
                SummaryTicket::InventoryStatus,
                self.client.build_inventory_status(),
            ),
            Outgoing::new(
                SummaryTicket::ActiveInventory,
                self.client.build_active_inventory_count(),
            ),
            Outgoing::new(
                SummaryTicket::FinancialOverview,
                self.client.build_financial_overview(),
            ),
        ]
    }

    pub fn complete(
        &mut self,
        ticket: SummaryTicket,
        response: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        let result = match ticket {
            SummaryTicket::InventoryStatus => response
                .and_then(|r| self.client.parse_inventory_status(r))
                .map(|status| self.inventory_status = status),
            SummaryTicket::ActiveInventory => response
                .and_then(|r| self.client.parse_active_inventory_count(r))
                .map(|count| self.active_inventory = count),
            SummaryTicket::FinancialOverview => response
                .and_then(|r| self.client.parse_financial_overview(r))
                .map(|overview| self.financial_overview = overview),
        };
        match result {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                tracing::error!(?ticket, error = %err, "summary fetch failed");
                Outcome::Failed(err)
            }
        }
    }
}
