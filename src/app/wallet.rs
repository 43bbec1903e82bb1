use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use derive_getters::Getters;
use log::debug;
use rust_decimal::Decimal;

use crate::{
    api::WalletApi,
    app::calc,
    models::{Asset, DisplayableInvestment, Investment, WalletSummary},
};

/// The independent fetches behind one wallet snapshot. `WalletApi` is the
/// production implementation; tests substitute an in-memory fake.
#[async_trait]
pub trait WalletData: Send + Sync {
    async fn assets(&self) -> Result<Vec<Asset>>;
    async fn investments(&self) -> Result<Vec<Investment>>;
    async fn history(&self) -> Result<Vec<Investment>>;
    async fn total_balance(&self) -> Result<Decimal>;
    async fn future_balance(&self) -> Result<Decimal>;
}

#[async_trait]
impl WalletData for WalletApi {
    async fn assets(&self) -> Result<Vec<Asset>> {
        self.list_assets().await
    }

    async fn investments(&self) -> Result<Vec<Investment>> {
        self.list_investments().await
    }

    async fn history(&self) -> Result<Vec<Investment>> {
        self.list_history().await
    }

    async fn total_balance(&self) -> Result<Decimal> {
        WalletApi::total_balance(self).await
    }

    async fn future_balance(&self) -> Result<Decimal> {
        WalletApi::future_balance(self).await
    }
}

/// One consistent view of the wallet: the asset catalog, enriched active
/// and historical positions, and the summary figures. Built only when
/// every fetch succeeded.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct WalletSnapshot {
    assets: Vec<Asset>,
    active: Vec<DisplayableInvestment>,
    history: Vec<DisplayableInvestment>,
    summary: WalletSummary,
}

/// Aggregated wallet state. Each refresh carries a generation number and
/// a finished fetch is applied only while it is still the latest one, so
/// a stale response never overwrites newer data.
pub struct Wallet {
    source: Arc<dyn WalletData>,
    snapshot: Option<WalletSnapshot>,
    generation: u64,
}

impl Wallet {
    pub fn new(source: Arc<dyn WalletData>) -> Self {
        Self {
            source,
            snapshot: None,
            generation: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&WalletSnapshot> {
        self.snapshot.as_ref()
    }

    /// Starts a refresh and hands back its generation together with the
    /// future producing the snapshot. The caller decides where to await
    /// it; the TUI spawns it to keep the event loop responsive.
    pub fn start_refresh(
        &mut self,
    ) -> (u64, impl Future<Output = Result<WalletSnapshot>> + Send + use<>) {
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        debug!("Starting wallet refresh (generation {})", generation);

        (generation, async move {
            fetch_snapshot(source.as_ref()).await
        })
    }

    /// Applies a finished snapshot, unless a newer refresh was issued in
    /// the meantime.
    pub fn apply(&mut self, generation: u64, snapshot: WalletSnapshot) -> bool {
        if generation != self.generation {
            debug!("Dropping stale wallet snapshot (generation {})", generation);
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Fetch-and-apply in one step, for callers without a background loop.
    pub async fn refresh(&mut self) -> Result<()> {
        let (generation, fetch) = self.start_refresh();
        let snapshot = fetch.await?;
        self.apply(generation, snapshot);
        Ok(())
    }
}

/// Issues the five independent fetches concurrently and combines them.
/// All-or-nothing: if any fetch fails the whole aggregation fails and
/// partial results are discarded.
async fn fetch_snapshot(source: &dyn WalletData) -> Result<WalletSnapshot> {
    let (assets, active, history, total_balance, future_balance) = tokio::try_join!(
        source.assets(),
        source.investments(),
        source.history(),
        source.total_balance(),
        source.future_balance(),
    )
    .context("Failed to load wallet data")?;

    let investment_count = active.len() + history.len();
    let active = calc::enrich(&active, &assets, false);
    let history = calc::enrich(&history, &assets, true);
    let summary = WalletSummary::new(total_balance, future_balance, investment_count);

    Ok(WalletSnapshot {
        assets,
        active,
        history,
        summary,
    })
}
