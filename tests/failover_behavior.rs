//! Failover semantics of the unified façade: source priority, skipping of
//! unavailable sources, quality rejection, and exhaustion accounting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ashare_core::data_source::{BoxFuture, DataSource, HistoryRequest};
use ashare_core::{
    Bar, BarSeries, Period, ProviderId, RealtimeQuote, Symbol, TradeDate, UnifiedSource,
    UnifiedSourceConfig, UtcDateTime,
};

/// Test double that returns a pre-scripted payload and counts calls.
struct ScriptedSource {
    id: ProviderId,
    available: bool,
    quote: Option<RealtimeQuote>,
    series: Option<BarSeries>,
    realtime_calls: Arc<AtomicUsize>,
    history_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(id: ProviderId) -> Self {
        Self {
            id,
            available: true,
            quote: None,
            series: None,
            realtime_calls: Arc::new(AtomicUsize::new(0)),
            history_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    fn with_quote(mut self, quote: RealtimeQuote) -> Self {
        self.quote = Some(quote);
        self
    }

    fn with_series(mut self, series: BarSeries) -> Self {
        self.series = Some(series);
        self
    }

    fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.realtime_calls.clone(), self.history_calls.clone())
    }
}

impl DataSource for ScriptedSource {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn realtime<'a>(&'a self, _symbol: &'a Symbol) -> BoxFuture<'a, Option<RealtimeQuote>> {
        self.realtime_calls.fetch_add(1, Ordering::SeqCst);
        let quote = self.quote.clone();
        Box::pin(async move { quote })
    }

    fn history<'a>(&'a self, _req: &'a HistoryRequest) -> BoxFuture<'a, Option<BarSeries>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let series = self.series.clone();
        Box::pin(async move { series })
    }

    fn test_connection<'a>(&'a self) -> BoxFuture<'a, bool> {
        let available = self.available;
        Box::pin(async move { available })
    }
}

fn symbol() -> Symbol {
    Symbol::parse("000001").expect("valid symbol")
}

fn quote(source: ProviderId, price: f64, prev_close: f64) -> RealtimeQuote {
    RealtimeQuote::new(
        symbol(),
        "平安银行",
        price,
        prev_close,
        prev_close,
        price.max(prev_close),
        price.min(prev_close),
        1_000_000,
        12_400_000.0,
        UtcDateTime::now(),
        source,
    )
    .expect("valid quote")
}

fn one_bar_series() -> BarSeries {
    let date = TradeDate::parse("2024-01-15").expect("valid date");
    let bar = Bar::new(date, 10.0, 10.5, 9.8, 10.2, 100_000, None).expect("valid bar");
    BarSeries::new(symbol(), Period::Daily, vec![bar])
}

fn unified(sources: Vec<Box<dyn DataSource>>) -> UnifiedSource {
    UnifiedSource::with_adapters(UnifiedSourceConfig::default(), sources)
}

#[tokio::test]
async fn first_source_with_usable_quote_wins() {
    let empty = ScriptedSource::new(ProviderId::Abu);
    let (empty_calls, _) = empty.counters();
    let full = ScriptedSource::new(ProviderId::Ashare).with_quote(quote(
        ProviderId::Ashare,
        12.45,
        12.22,
    ));
    let (full_calls, _) = full.counters();

    let unified = unified(vec![Box::new(empty), Box::new(full)]);
    let resolved = unified
        .get_realtime_price("000001")
        .await
        .expect("input is valid")
        .expect("second source has a quote");

    assert_eq!(resolved.source, ProviderId::Ashare);
    assert_eq!(resolved.price, 12.45);
    assert_eq!(resolved.change, 0.23);
    assert_eq!(resolved.change_percent, 1.88);
    assert_eq!(empty_calls.load(Ordering::SeqCst), 1);
    assert_eq!(full_calls.load(Ordering::SeqCst), 1);

    let stats = unified.usage_stats();
    assert_eq!(stats.requests, 1);
    assert_eq!(stats.cache_hits, 0);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.usage_of(ProviderId::Ashare), 1);
    assert_eq!(stats.usage_of(ProviderId::Abu), 0);
}

#[tokio::test]
async fn winning_first_source_stops_the_walk() {
    let first = ScriptedSource::new(ProviderId::Abu).with_quote(quote(
        ProviderId::Abu,
        12.45,
        12.22,
    ));
    let second = ScriptedSource::new(ProviderId::Ashare).with_quote(quote(
        ProviderId::Ashare,
        99.0,
        98.0,
    ));
    let (second_calls, _) = second.counters();

    let unified = unified(vec![Box::new(first), Box::new(second)]);
    let resolved = unified
        .get_realtime_price("000001")
        .await
        .expect("input is valid")
        .expect("first source has a quote");

    assert_eq!(resolved.source, ProviderId::Abu);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0, "walk must stop at the winner");
}

#[tokio::test]
async fn unavailable_source_is_skipped_without_a_call() {
    let offline = ScriptedSource::new(ProviderId::Abu)
        .with_quote(quote(ProviderId::Abu, 12.45, 12.22))
        .unavailable();
    let (offline_calls, _) = offline.counters();
    let online = ScriptedSource::new(ProviderId::Ashare).with_quote(quote(
        ProviderId::Ashare,
        12.45,
        12.22,
    ));

    let unified = unified(vec![Box::new(offline), Box::new(online)]);
    let resolved = unified
        .get_realtime_price("000001")
        .await
        .expect("input is valid")
        .expect("online source has a quote");

    assert_eq!(resolved.source, ProviderId::Ashare);
    assert_eq!(offline_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unusable_quote_triggers_failover() {
    // Price 0 passes construction but fails the quality gate.
    let suspended = ScriptedSource::new(ProviderId::Abu).with_quote(quote(
        ProviderId::Abu,
        0.0,
        12.22,
    ));
    let healthy = ScriptedSource::new(ProviderId::Ashare).with_quote(quote(
        ProviderId::Ashare,
        12.45,
        12.22,
    ));

    let unified = unified(vec![Box::new(suspended), Box::new(healthy)]);
    let resolved = unified
        .get_realtime_price("000001")
        .await
        .expect("input is valid")
        .expect("healthy source has a quote");

    assert_eq!(resolved.source, ProviderId::Ashare);
    let stats = unified.usage_stats();
    assert_eq!(stats.usage_of(ProviderId::Abu), 0);
    assert_eq!(stats.usage_of(ProviderId::Ashare), 1);
}

#[tokio::test]
async fn exhausting_all_sources_yields_none_and_one_error() {
    let first = ScriptedSource::new(ProviderId::Abu);
    let second = ScriptedSource::new(ProviderId::Ashare);

    let unified = unified(vec![Box::new(first), Box::new(second)]);
    let resolved = unified
        .get_realtime_price("000001")
        .await
        .expect("input is valid");

    assert!(resolved.is_none());
    let stats = unified.usage_stats();
    assert_eq!(stats.requests, 1);
    assert_eq!(stats.errors, 1);
    assert!(stats.source_usage.is_empty());
}

#[tokio::test]
async fn empty_history_series_triggers_failover() {
    let empty = ScriptedSource::new(ProviderId::Abu)
        .with_series(BarSeries::new(symbol(), Period::Daily, Vec::new()));
    let full = ScriptedSource::new(ProviderId::Ashare).with_series(one_bar_series());
    let (_, full_history_calls) = full.counters();

    let unified = unified(vec![Box::new(empty), Box::new(full)]);
    let series = unified
        .get_history_data("000001", "2024-01-01", Some("2024-01-31"), Period::Daily)
        .await
        .expect("input is valid")
        .expect("second source has bars");

    assert_eq!(series.len(), 1);
    assert_eq!(full_history_calls.load(Ordering::SeqCst), 1);
    let stats = unified.usage_stats();
    assert_eq!(stats.usage_of(ProviderId::Ashare), 1);
    assert_eq!(stats.usage_of(ProviderId::Abu), 0);
}

#[tokio::test]
async fn invalid_input_is_an_error_not_an_attempt() {
    let source = ScriptedSource::new(ProviderId::Ashare).with_quote(quote(
        ProviderId::Ashare,
        12.45,
        12.22,
    ));
    let (calls, _) = source.counters();

    let unified = unified(vec![Box::new(source)]);
    assert!(unified.get_realtime_price("ABCDEF").await.is_err());
    assert!(unified
        .get_history_data("000001", "2024-02-01", Some("2024-01-01"), Period::Daily)
        .await
        .is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let stats = unified.usage_stats();
    assert_eq!(stats.requests, 0);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn probing_reports_per_source_reachability() {
    let offline = ScriptedSource::new(ProviderId::Abu).unavailable();
    let online = ScriptedSource::new(ProviderId::Ashare);

    let unified = unified(vec![Box::new(offline), Box::new(online)]);
    let results = unified.test_all_sources().await;

    assert_eq!(results.get(&ProviderId::Abu), Some(&false));
    assert_eq!(results.get(&ProviderId::Ashare), Some(&true));
}
