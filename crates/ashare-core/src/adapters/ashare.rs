//! Adapter over the free Chinese quote web endpoints.
//!
//! Realtime quotes come from sina, tencent, and eastmoney in that order;
//! historical bars from netease (daily only) with a sina kline fallback.
//! Each venue speaks its own ad-hoc text format with positional fields, so
//! the parsers here are deliberately index-literal. Any payload that does
//! not match the expected shape collapses to `None` and the next venue gets
//! a turn.

use std::sync::Arc;

use crate::data_source::{BoxFuture, DataSource, HistoryRequest};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{
    quality, Bar, BarSeries, Market, Period, ProviderId, RealtimeQuote, Symbol, TradeDate,
    UtcDateTime,
};

const SINA_REALTIME_URL: &str = "https://hq.sinajs.cn/list=";
const SINA_REFERER: &str = "https://finance.sina.com.cn/";
const QQ_REALTIME_URL: &str = "https://qt.gtimg.cn/q=";
const EASTMONEY_REALTIME_URL: &str = "https://push2.eastmoney.com/api/qt/stock/get";
const NETEASE_HISTORY_URL: &str = "https://quotes.money.163.com/service/chddata.html";
const SINA_KLINE_URL: &str =
    "https://quotes.sina.cn/cn/api/json_v2.php/CN_MarketData.getKLineData";

/// Price fields in 1/100 CNY plus name and prev close; see the eastmoney
/// push2 field dictionary.
const EASTMONEY_FIELDS: &str = "f43,f44,f45,f46,f47,f48,f57,f58,f60,f170";
const NETEASE_FIELDS: &str = "TCLOSE;HIGH;LOW;TOPEN;LCLOSE;CHG;PCHG;TURNOVER;VOTURNOVER;VATURNOVER";

const SINA_MIN_FIELDS: usize = 32;
const QQ_MIN_FIELDS: usize = 50;
const NETEASE_MIN_FIELDS: usize = 10;

const PROBE_SYMBOL: &str = "000001";

pub struct AshareAdapter {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl AshareAdapter {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_text(&self, venue: &str, request: HttpRequest) -> Option<String> {
        match self.http.execute(request).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                log::warn!("{venue} returned HTTP {}", response.status);
                None
            }
            Err(err) => {
                log::warn!("{venue} request failed: {err}");
                None
            }
        }
    }

    async fn fetch_sina_realtime(&self, symbol: &Symbol) -> Option<RealtimeQuote> {
        let url = format!("{SINA_REALTIME_URL}{}", sina_symbol(symbol));
        let request = HttpRequest::get(url)
            .with_header("referer", SINA_REFERER)
            .with_timeout_ms(self.timeout_ms);
        let body = self.fetch_text("sina", request).await?;

        let quote = parse_sina_realtime(symbol, &body);
        if quote.is_none() {
            log::warn!("sina payload for {symbol} did not parse");
        }
        quote
    }

    async fn fetch_qq_realtime(&self, symbol: &Symbol) -> Option<RealtimeQuote> {
        let url = format!("{QQ_REALTIME_URL}{}", sina_symbol(symbol));
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let body = self.fetch_text("qq", request).await?;

        let quote = parse_qq_realtime(symbol, &body);
        if quote.is_none() {
            log::warn!("qq payload for {symbol} did not parse");
        }
        quote
    }

    async fn fetch_eastmoney_realtime(&self, symbol: &Symbol) -> Option<RealtimeQuote> {
        let url = format!(
            "{EASTMONEY_REALTIME_URL}?secid={}&fields={}",
            eastmoney_secid(symbol),
            urlencoding::encode(EASTMONEY_FIELDS),
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let body = self.fetch_text("eastmoney", request).await?;

        let quote = parse_eastmoney_realtime(symbol, &body);
        if quote.is_none() {
            log::warn!("eastmoney payload for {symbol} did not parse");
        }
        quote
    }

    async fn fetch_netease_history(&self, req: &HistoryRequest) -> Option<BarSeries> {
        let url = format!(
            "{NETEASE_HISTORY_URL}?code={}{}&start={}&end={}&fields={}",
            netease_market_code(&req.symbol),
            req.symbol,
            req.start.format_compact(),
            req.end.format_compact(),
            urlencoding::encode(NETEASE_FIELDS),
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let body = self.fetch_text("netease", request).await?;

        let series = parse_netease_history(req, &body);
        if series.is_none() {
            log::warn!("netease payload for {} did not parse", req.symbol);
        }
        series
    }

    async fn fetch_sina_kline(&self, req: &HistoryRequest) -> Option<BarSeries> {
        let url = format!(
            "{SINA_KLINE_URL}?symbol={}&scale={}&ma=no&datalen=1000",
            sina_symbol(&req.symbol),
            period_scale(req.period),
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let body = self.fetch_text("sina kline", request).await?;

        let series = parse_sina_kline(req, &body);
        if series.is_none() {
            log::warn!("sina kline payload for {} did not parse", req.symbol);
        }
        series
    }
}

impl DataSource for AshareAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Ashare
    }

    fn is_available(&self) -> bool {
        true
    }

    fn realtime<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, Option<RealtimeQuote>> {
        Box::pin(async move {
            if let Some(quote) = self
                .fetch_sina_realtime(symbol)
                .await
                .filter(quality::acceptable_realtime)
            {
                return Some(quote);
            }
            if let Some(quote) = self
                .fetch_qq_realtime(symbol)
                .await
                .filter(quality::acceptable_realtime)
            {
                return Some(quote);
            }
            if let Some(quote) = self
                .fetch_eastmoney_realtime(symbol)
                .await
                .filter(quality::acceptable_realtime)
            {
                return Some(quote);
            }

            log::warn!("all realtime venues failed for {symbol}");
            None
        })
    }

    fn history<'a>(&'a self, req: &'a HistoryRequest) -> BoxFuture<'a, Option<BarSeries>> {
        Box::pin(async move {
            // Netease serves daily bars only; weekly/monthly go straight to
            // the sina kline endpoint.
            if req.period == Period::Daily {
                if let Some(series) = self.fetch_netease_history(req).await {
                    return Some(series);
                }
            }

            let series = self.fetch_sina_kline(req).await;
            if series.is_none() {
                log::warn!("all history venues failed for {}", req.symbol);
            }
            series
        })
    }

    fn test_connection<'a>(&'a self) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            let Ok(symbol) = Symbol::parse(PROBE_SYMBOL) else {
                return false;
            };
            self.realtime(&symbol).await.is_some()
        })
    }
}

/// `sh600000` / `sz000001` form shared by the sina and tencent endpoints.
fn sina_symbol(symbol: &Symbol) -> String {
    match symbol.market() {
        Market::Shanghai => format!("sh{symbol}"),
        Market::Shenzhen => format!("sz{symbol}"),
    }
}

/// Eastmoney secid: market `1` for Shanghai, `0` for Shenzhen.
fn eastmoney_secid(symbol: &Symbol) -> String {
    match symbol.market() {
        Market::Shanghai => format!("1.{symbol}"),
        Market::Shenzhen => format!("0.{symbol}"),
    }
}

/// Netease code prefix: `0` for Shanghai, `1` for Shenzhen.
fn netease_market_code(symbol: &Symbol) -> char {
    match symbol.market() {
        Market::Shanghai => '0',
        Market::Shenzhen => '1',
    }
}

/// Sina kline scale in minutes per bar.
fn period_scale(period: Period) -> u32 {
    match period {
        Period::Daily => 240,
        Period::Weekly => 1680,
        Period::Monthly => 7680,
    }
}

/// Numeric field; venues leave fields empty rather than writing `0`.
fn num(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse().ok()
}

fn qty(field: &str) -> Option<u64> {
    num(field).map(|value| value.max(0.0) as u64)
}

/// Netease writes `None` for fields it has no data for.
fn netease_num(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed == "None" {
        return 0.0;
    }
    trimmed.parse().unwrap_or(0.0)
}

/// Numeric JSON value that may arrive as a number or a quoted string.
fn json_num(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
}

/// `var hq_str_sz000001="平安银行,12.20,12.22,12.45,...";` with comma
/// fields: name 0, open 1, prev close 2, price 3, high 4, low 5, volume 8,
/// amount 9.
fn parse_sina_realtime(symbol: &Symbol, body: &str) -> Option<RealtimeQuote> {
    let data = body.split_once('"')?.1.split_once('"')?.0;
    let fields: Vec<&str> = data.split(',').collect();
    if fields.len() < SINA_MIN_FIELDS {
        return None;
    }

    RealtimeQuote::new(
        symbol.clone(),
        fields[0].trim(),
        num(fields[3])?,
        num(fields[2])?,
        num(fields[1])?,
        num(fields[4])?,
        num(fields[5])?,
        qty(fields[8])?,
        num(fields[9])?,
        UtcDateTime::now(),
        ProviderId::Ashare,
    )
    .ok()
}

/// `v_sz000001="51~平安银行~000001~12.45~...";` with `~` fields: name 1,
/// price 3, prev close 4, open 5, volume 6, high 33, low 34, amount 37.
fn parse_qq_realtime(symbol: &Symbol, body: &str) -> Option<RealtimeQuote> {
    let data = body.split_once('"')?.1.split_once('"')?.0;
    let fields: Vec<&str> = data.split('~').collect();
    if fields.len() < QQ_MIN_FIELDS {
        return None;
    }

    RealtimeQuote::new(
        symbol.clone(),
        fields[1].trim(),
        num(fields[3])?,
        num(fields[4])?,
        num(fields[5])?,
        num(fields[33])?,
        num(fields[34])?,
        qty(fields[6])?,
        num(fields[37])?,
        UtcDateTime::now(),
        ProviderId::Ashare,
    )
    .ok()
}

/// JSON envelope `{"data": {"f43": 1245, ...}}`; prices arrive scaled by
/// 100 and `data` comes back `null` for unknown securities.
fn parse_eastmoney_realtime(symbol: &Symbol, body: &str) -> Option<RealtimeQuote> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let data = value.get("data")?;
    if data.is_null() {
        return None;
    }

    let price_field = |key: &str| -> f64 {
        data.get(key)
            .and_then(json_num)
            .map(|raw| raw / 100.0)
            .unwrap_or(0.0)
    };
    let name = data
        .get("f58")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .trim();
    let volume = data
        .get("f47")
        .and_then(json_num)
        .map(|value| value.max(0.0) as u64)
        .unwrap_or(0);
    let amount = data.get("f48").and_then(json_num).unwrap_or(0.0);

    RealtimeQuote::new(
        symbol.clone(),
        name,
        price_field("f43"),
        price_field("f60"),
        price_field("f46"),
        price_field("f44"),
        price_field("f45"),
        volume,
        amount,
        UtcDateTime::now(),
        ProviderId::Ashare,
    )
    .ok()
}

/// CSV with a header row; data fields: date 0, close 1, high 2, low 3,
/// open 6, volume 8, amount 9. Rows arrive newest first and suspended days
/// carry `None` placeholders.
fn parse_netease_history(req: &HistoryRequest, body: &str) -> Option<BarSeries> {
    let mut bars = Vec::new();
    for line in body.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < NETEASE_MIN_FIELDS {
            continue;
        }
        let Ok(date) = TradeDate::parse(fields[0]) else {
            continue;
        };

        let bar = Bar::new(
            date,
            netease_num(fields[6]),
            netease_num(fields[2]),
            netease_num(fields[3]),
            netease_num(fields[1]),
            netease_num(fields[8]).max(0.0) as u64,
            Some(netease_num(fields[9])),
        );
        match bar {
            Ok(bar) => bars.push(bar),
            Err(err) => log::debug!("dropping netease row {}: {err}", fields[0]),
        }
    }

    if bars.is_empty() {
        return None;
    }
    Some(BarSeries::new(req.symbol.clone(), req.period, bars))
}

/// JSON array of `{"day", "open", "high", "low", "close", "volume"}` rows;
/// numbers arrive as quoted strings. The endpoint has no range parameters,
/// so rows outside the requested window are filtered here. No turnover
/// figure is served.
fn parse_sina_kline(req: &HistoryRequest, body: &str) -> Option<BarSeries> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(body).ok()?;

    let mut bars = Vec::new();
    for row in &rows {
        let Some(day) = row.get("day").and_then(|v| v.as_str()) else {
            continue;
        };
        let Ok(date) = TradeDate::parse(day.get(..10).unwrap_or(day)) else {
            continue;
        };
        if date < req.start || date > req.end {
            continue;
        }

        let field = |key: &str| row.get(key).and_then(json_num);
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            field("open"),
            field("high"),
            field("low"),
            field("close"),
            field("volume"),
        ) else {
            continue;
        };

        match Bar::new(date, open, high, low, close, volume.max(0.0) as u64, None) {
            Ok(bar) => bars.push(bar),
            Err(err) => log::debug!("dropping sina kline row {day}: {err}"),
        }
    }

    if bars.is_empty() {
        return None;
    }
    Some(BarSeries::new(req.symbol.clone(), req.period, bars))
}
