//! Unified façade over all configured data sources.
//!
//! One entry point owns the source list, the TTL cache, and the usage
//! counters. Every read walks the sources in priority order and returns the
//! first payload that passes the quality gate; a cache hit short-circuits
//! the walk entirely. Callers only ever see validation errors raised on
//! their own input; upstream failures degrade to `Ok(None)`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{AbuAdapter, AshareAdapter};
use crate::cache::{CachedPayload, DataCache};
use crate::data_source::{DataSource, HistoryRequest};
use crate::http_client::ReqwestHttpClient;
use crate::stats::{StatsSnapshot, UsageStats};
use crate::{quality, BarSeries, Period, ProviderId, RealtimeQuote, Symbol, TradeDate, ValidationError};

/// Tunables for [`UnifiedSource`].
#[derive(Debug, Clone)]
pub struct UnifiedSourceConfig {
    /// How long a realtime quote stays fresh.
    pub realtime_ttl: Duration,
    /// How long a historical series stays fresh.
    pub history_ttl: Duration,
    pub enable_cache: bool,
    /// Per-request transport timeout handed to every adapter.
    pub timeout_ms: u64,
}

impl Default for UnifiedSourceConfig {
    fn default() -> Self {
        Self {
            realtime_ttl: Duration::from_secs(30),
            history_ttl: Duration::from_secs(300),
            enable_cache: true,
            timeout_ms: 10_000,
        }
    }
}

/// Multi-source quote resolver with failover, caching, and usage counters.
pub struct UnifiedSource {
    sources: Vec<Box<dyn DataSource>>,
    cache: DataCache,
    stats: UsageStats,
    config: UnifiedSourceConfig,
}

impl UnifiedSource {
    /// Build with the default source stack: the abu gateway (when
    /// configured) first, then the free web venues.
    pub fn new(config: UnifiedSourceConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new());
        let sources: Vec<Box<dyn DataSource>> = vec![
            Box::new(AbuAdapter::from_env(http.clone()).with_timeout_ms(config.timeout_ms)),
            Box::new(AshareAdapter::new(http).with_timeout_ms(config.timeout_ms)),
        ];
        Self::with_adapters(config, sources)
    }

    /// Build with an explicit source list, in priority order.
    pub fn with_adapters(config: UnifiedSourceConfig, sources: Vec<Box<dyn DataSource>>) -> Self {
        Self {
            cache: DataCache::new(config.enable_cache),
            stats: UsageStats::new(),
            sources,
            config,
        }
    }

    /// Normalize a raw symbol without touching any source.
    pub fn normalize_symbol(raw: &str) -> Result<Symbol, ValidationError> {
        Symbol::parse(raw)
    }

    /// Resolve the current quote for `raw_symbol`.
    ///
    /// `Ok(None)` means every source was tried and none produced a usable
    /// quote; `Err` is reserved for invalid caller input.
    pub async fn get_realtime_price(
        &self,
        raw_symbol: &str,
    ) -> Result<Option<RealtimeQuote>, ValidationError> {
        let symbol = Symbol::parse(raw_symbol)?;
        let key = DataCache::key("realtime", &[symbol.as_str()]);

        if let Some(CachedPayload::Realtime(quote)) = self.cache.get(&key) {
            self.stats.record_cache_hit();
            log::debug!("cache hit: {key}");
            return Ok(Some(quote));
        }
        self.stats.record_request();

        for source in &self.sources {
            if !source.is_available() {
                continue;
            }
            let Some(quote) = source.realtime(&symbol).await else {
                continue;
            };
            if !quality::acceptable_realtime(&quote) {
                log::warn!("{} returned an unusable quote for {symbol}", source.id());
                continue;
            }

            self.stats.record_source_success(source.id());
            self.cache.put(
                key,
                CachedPayload::Realtime(quote.clone()),
                self.config.realtime_ttl,
            );
            log::info!("resolved realtime {symbol} via {}", source.id());
            return Ok(Some(quote));
        }

        self.stats.record_error();
        log::error!("no source produced a realtime quote for {symbol}");
        Ok(None)
    }

    /// Resolve historical bars for `raw_symbol` over `[start, end]`.
    ///
    /// `end` defaults to today (UTC) when omitted.
    pub async fn get_history_data(
        &self,
        raw_symbol: &str,
        start: &str,
        end: Option<&str>,
        period: Period,
    ) -> Result<Option<BarSeries>, ValidationError> {
        let symbol = Symbol::parse(raw_symbol)?;
        let start = TradeDate::parse(start)?;
        let end = match end {
            Some(raw) => TradeDate::parse(raw)?,
            None => TradeDate::today(),
        };
        let req = HistoryRequest::new(symbol, start, end, period)?;

        let key = DataCache::key(
            "history",
            &[
                req.symbol.as_str(),
                &req.start.format_iso(),
                &req.end.format_iso(),
                req.period.as_str(),
            ],
        );

        if let Some(CachedPayload::History(series)) = self.cache.get(&key) {
            self.stats.record_cache_hit();
            log::debug!("cache hit: {key}");
            return Ok(Some(series));
        }
        self.stats.record_request();

        for source in &self.sources {
            if !source.is_available() {
                continue;
            }
            let Some(series) = source.history(&req).await else {
                continue;
            };
            if !quality::acceptable_history(&series) {
                log::warn!("{} returned an empty series for {}", source.id(), req.symbol);
                continue;
            }

            self.stats.record_source_success(source.id());
            self.cache.put(
                key,
                CachedPayload::History(series.clone()),
                self.config.history_ttl,
            );
            log::info!(
                "resolved {} {} bars for {} via {}",
                series.len(),
                req.period.as_str(),
                req.symbol,
                source.id()
            );
            return Ok(Some(series));
        }

        self.stats.record_error();
        log::error!("no source produced history for {}", req.symbol);
        Ok(None)
    }

    /// Configured availability of each source, no network involved.
    pub fn source_availability(&self) -> BTreeMap<ProviderId, bool> {
        self.sources
            .iter()
            .map(|source| (source.id(), source.is_available()))
            .collect()
    }

    /// Probe every source with a known-good request.
    pub async fn test_all_sources(&self) -> BTreeMap<ProviderId, bool> {
        let mut results = BTreeMap::new();
        for source in &self.sources {
            let reachable = source.is_available() && source.test_connection().await;
            log::info!("source {} reachable: {reachable}", source.id());
            results.insert(source.id(), reachable);
        }
        results
    }

    pub fn usage_stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.cache.len())
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        log::info!("data cache cleared");
    }
}
