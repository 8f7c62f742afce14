//! History-only adapter backed by an abu quant gateway service.
//!
//! The gateway is optional infrastructure: when no base URL is configured
//! the adapter constructs in an unavailable state and the façade skips it
//! entirely. Symbols are addressed in the gateway's exchange-suffix form,
//! `600000.XSHG` for Shanghai and `000001.XSHE` for Shenzhen.

use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{BoxFuture, DataSource, HistoryRequest};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{Bar, BarSeries, Market, ProviderId, RealtimeQuote, Symbol, TradeDate};

/// Environment variable holding the gateway base URL, e.g.
/// `http://localhost:8765`.
pub const ABU_GATEWAY_ENV: &str = "ABU_GATEWAY_URL";

/// Bar row as served by the gateway's `/kline` endpoint.
#[derive(Debug, Deserialize)]
struct GatewayBar {
    date: TradeDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    #[serde(default)]
    amount: Option<f64>,
}

pub struct AbuAdapter {
    gateway: Option<String>,
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl AbuAdapter {
    /// Build from [`ABU_GATEWAY_ENV`]; unavailable when the variable is
    /// unset or blank.
    pub fn from_env(http: Arc<dyn HttpClient>) -> Self {
        match std::env::var(ABU_GATEWAY_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_gateway(url, http),
            _ => Self {
                gateway: None,
                http,
                timeout_ms: 10_000,
            },
        }
    }

    pub fn with_gateway(gateway: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            gateway: Some(gateway.into().trim().trim_end_matches('/').to_owned()),
            http,
            timeout_ms: 10_000,
        }
    }

    /// Adapter with no gateway configured; every call short-circuits.
    pub fn disabled() -> Self {
        Self {
            gateway: None,
            http: Arc::new(NoopHttpClient),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_kline(&self, req: &HistoryRequest) -> Option<BarSeries> {
        let base = self.gateway.as_deref()?;
        let url = format!(
            "{base}/kline?symbol={}&start={}&end={}&period={}",
            abu_symbol(&req.symbol),
            req.start.format_iso(),
            req.end.format_iso(),
            req.period.as_str(),
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = match self.http.execute(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                log::warn!("abu gateway returned HTTP {}", response.status);
                return None;
            }
            Err(err) => {
                log::warn!("abu gateway request failed: {err}");
                return None;
            }
        };

        let series = parse_gateway_kline(req, &response.body);
        if series.is_none() {
            log::warn!("abu gateway payload for {} did not parse", req.symbol);
        }
        series
    }
}

impl DataSource for AbuAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Abu
    }

    fn is_available(&self) -> bool {
        self.gateway.is_some()
    }

    fn realtime<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, Option<RealtimeQuote>> {
        Box::pin(async move {
            // History-only source; realtime always defers to the next one.
            log::debug!("abu source has no realtime quote for {symbol}");
            None
        })
    }

    fn history<'a>(&'a self, req: &'a HistoryRequest) -> BoxFuture<'a, Option<BarSeries>> {
        Box::pin(async move {
            if !self.is_available() {
                log::debug!("abu gateway not configured; skipping {}", req.symbol);
                return None;
            }
            self.fetch_kline(req).await
        })
    }

    fn test_connection<'a>(&'a self) -> BoxFuture<'a, bool> {
        // No cheap realtime endpoint to probe; configured means usable.
        let available = self.is_available();
        Box::pin(async move { available })
    }
}

fn abu_symbol(symbol: &Symbol) -> String {
    match symbol.market() {
        Market::Shanghai => format!("{symbol}.XSHG"),
        Market::Shenzhen => format!("{symbol}.XSHE"),
    }
}

fn parse_gateway_kline(req: &HistoryRequest, body: &str) -> Option<BarSeries> {
    let rows: Vec<GatewayBar> = serde_json::from_str(body).ok()?;

    let mut bars = Vec::with_capacity(rows.len());
    for row in rows {
        if row.date < req.start || row.date > req.end {
            continue;
        }
        match Bar::new(
            row.date, row.open, row.high, row.low, row.close, row.volume, row.amount,
        ) {
            Ok(bar) => bars.push(bar),
            Err(err) => log::warn!("dropping malformed gateway bar for {}: {err}", req.symbol),
        }
    }

    if bars.is_empty() {
        return None;
    }
    Some(BarSeries::new(req.symbol.clone(), req.period, bars))
}
