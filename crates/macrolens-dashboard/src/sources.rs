//! Adapter handles shared by every dashboard.

use std::sync::Arc;

use macrolens_fetch::url::Endpoints;
use macrolens_fetch::{
    AdapterRef, FredAdapter, GdeltAdapter, HttpClient, MarketAdapter, TicAdapter, WorldBankAdapter,
};

/// One adapter per upstream source.
///
/// Dashboards only see [`AdapterRef`]s, so tests can swap in fakes with
/// [`Sources::from_adapters`].
#[derive(Debug, Clone)]
pub struct Sources {
    /// FRED CSV series.
    pub fred: AdapterRef,
    /// Market chart closes.
    pub market: AdapterRef,
    /// World Bank indicators, latest value.
    pub world_bank: AdapterRef,
    /// TIC major foreign holders.
    pub tic: AdapterRef,
    /// GDELT article counts.
    pub gdelt: AdapterRef,
}

impl Sources {
    /// Creates the live adapters, all sharing one HTTP client.
    #[must_use]
    pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            fred: Arc::new(FredAdapter::new(client.clone(), endpoints.clone())),
            market: Arc::new(MarketAdapter::new(client.clone(), endpoints.clone())),
            world_bank: Arc::new(WorldBankAdapter::new(client.clone(), endpoints.clone())),
            tic: Arc::new(TicAdapter::new(client.clone(), endpoints.clone())),
            gdelt: Arc::new(GdeltAdapter::new(client, endpoints)),
        }
    }

    /// Uses the same adapter for every source.
    #[must_use]
    pub fn from_adapters(adapter: AdapterRef) -> Self {
        Self {
            fred: Arc::clone(&adapter),
            market: Arc::clone(&adapter),
            world_bank: Arc::clone(&adapter),
            tic: Arc::clone(&adapter),
            gdelt: adapter,
        }
    }
}
