//! # Ashare Core
//!
//! Unified access to Chinese A-share market data across multiple upstream
//! sources.
//!
//! ## Overview
//!
//! This crate provides the building blocks for resolving quotes and
//! historical bars with automatic failover:
//!
//! - **Canonical domain models** for symbols, realtime quotes, and bar series
//! - **Source identifiers** for multi-adapter support
//! - **Data source trait** implemented by every upstream adapter
//! - **Unified façade** with priority-ordered failover, a TTL cache, and
//!   usage counters
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Source adapters (abu gateway, free web venues) |
//! | [`cache`] | In-memory TTL cache for resolved payloads |
//! | [`data_source`] | Data source trait and history request type |
//! | [`domain`] | Domain models (Symbol, RealtimeQuote, Bar, BarSeries) |
//! | [`error`] | Validation and core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`quality`] | Payload acceptance predicates |
//! | [`source`] | Source identifiers |
//! | [`stats`] | Usage counters and snapshots |
//! | [`unified`] | Unified multi-source façade |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ashare_core::{Period, UnifiedSource, UnifiedSourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let unified = UnifiedSource::new(UnifiedSourceConfig::default());
//!
//!     if let Some(quote) = unified.get_realtime_price("000001").await? {
//!         println!("{} {:.2} ({:+.2}%)", quote.name, quote.price, quote.change_percent);
//!     }
//!
//!     let bars = unified
//!         .get_history_data("600000", "2024-01-01", None, Period::Daily)
//!         .await?;
//!     println!("bars: {:?}", bars.map(|series| series.len()));
//!
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod quality;
pub mod source;
pub mod stats;
pub mod unified;

pub use adapters::{AbuAdapter, AshareAdapter};
pub use cache::{CachedPayload, DataCache};
pub use data_source::{BoxFuture, DataSource, HistoryRequest};
pub use domain::{Bar, BarSeries, Market, Period, RealtimeQuote, Symbol, TradeDate, UtcDateTime};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use source::ProviderId;
pub use stats::{StatsSnapshot, UsageStats};
pub use unified::{UnifiedSource, UnifiedSourceConfig};
