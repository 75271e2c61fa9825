//! Shared fixtures for the gateway integration tests.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mt5_rest_gateway::common::{Mt5Credential, Timeframe};
use mt5_rest_gateway::terminal::{
    LastError, Record, Selector, Terminal, TerminalResult, TradeRequest,
};
use serde_json::{json, Value};

pub const PASSWORD: &str = "secret";

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn credential() -> Mt5Credential {
    Mt5Credential::builder()
        .login(123)
        .password(PASSWORD)
        .server("Demo")
        .build()
        .unwrap()
}

pub fn credential_with_password(password: &str) -> Mt5Credential {
    Mt5Credential {
        password: password.to_string(),
        ..credential()
    }
}

pub fn eurusd() -> Record {
    record(json!({"name": "EURUSD", "bid": 1.1000, "ask": 1.1002, "digits": 5}))
}

pub fn position(ticket: u64, symbol: &str, side: i64, volume: f64) -> Record {
    record(json!({
        "ticket": ticket,
        "symbol": symbol,
        "type": side,
        "volume": volume,
        "magic": 42,
        "comment": "grid",
    }))
}

/// In-memory terminal recording every call made against it.
pub struct MockTerminal {
    pub initialize_ok: bool,
    pub password: String,
    pub last_error: LastError,
    pub account: Option<Record>,
    pub symbols: Option<Vec<Record>>,
    pub symbol_infos: Vec<Record>,
    pub rates: Option<Vec<Record>>,
    pub orders: Option<Vec<Record>>,
    pub positions: Option<Vec<Record>>,
    pub orders_total: i64,
    pub positions_total: i64,
    pub send_retcode: Option<i64>,
    pub call_delay: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<TradeRequest>>,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self {
            initialize_ok: true,
            password: PASSWORD.to_string(),
            last_error: LastError::new(-6, "Terminal: Authorization failed"),
            account: Some(record(json!({
                "login": 123,
                "server": "Demo",
                "balance": 10000.0,
                "equity": 10012.5,
                "currency": "USD",
                "leverage": 100,
            }))),
            symbols: Some(Vec::new()),
            symbol_infos: vec![eurusd()],
            rates: Some(Vec::new()),
            orders: Some(Vec::new()),
            positions: Some(Vec::new()),
            orders_total: 0,
            positions_total: 0,
            send_retcode: Some(10009),
            call_delay: None,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }
}

impl MockTerminal {
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| *c == name).count()
    }

    pub fn sent(&self) -> Vec<TradeRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn max_active_sessions(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn record_call(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn matches(selector: &Selector, row: &Record) -> bool {
        match selector {
            Selector::All | Selector::Group(_) => true,
            Selector::Symbol(symbol) => row.get("symbol").and_then(Value::as_str) == Some(symbol),
            Selector::Ticket(ticket) => row.get("ticket").and_then(Value::as_u64) == Some(*ticket),
        }
    }

    fn filtered(rows: &Option<Vec<Record>>, selector: &Selector) -> Option<Vec<Record>> {
        rows.as_ref().map(|rows| {
            rows.iter()
                .filter(|row| Self::matches(selector, row))
                .cloned()
                .collect()
        })
    }
}

#[async_trait]
impl Terminal for MockTerminal {
    async fn initialize(&self) -> TerminalResult<bool> {
        self.record_call("initialize");
        if self.initialize_ok {
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
        }
        Ok(self.initialize_ok)
    }

    async fn login(&self, _login: i64, password: &str, _server: &str) -> TerminalResult<bool> {
        self.record_call("login");
        Ok(password == self.password)
    }

    async fn shutdown(&self) -> TerminalResult<()> {
        self.record_call("shutdown");
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    async fn last_error(&self) -> TerminalResult<LastError> {
        self.record_call("last_error");
        Ok(self.last_error.clone())
    }

    async fn account_info(&self) -> TerminalResult<Option<Record>> {
        self.record_call("account_info");
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.account.clone())
    }

    async fn symbols_get(&self) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("symbols_get");
        Ok(self.symbols.clone())
    }

    async fn symbol_info(&self, symbol: &str) -> TerminalResult<Option<Record>> {
        self.record_call("symbol_info");
        Ok(self
            .symbol_infos
            .iter()
            .find(|info| info.get("name").and_then(Value::as_str) == Some(symbol))
            .cloned())
    }

    async fn copy_rates_from(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _date_from: DateTime<Utc>,
        _count: u32,
    ) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("copy_rates_from");
        Ok(self.rates.clone())
    }

    async fn copy_rates_from_pos(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _start_pos: u32,
        _count: u32,
    ) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("copy_rates_from_pos");
        Ok(self.rates.clone())
    }

    async fn copy_rates_range(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _date_from: DateTime<Utc>,
        _date_to: DateTime<Utc>,
    ) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("copy_rates_range");
        Ok(self.rates.clone())
    }

    async fn orders_total(&self) -> TerminalResult<i64> {
        self.record_call("orders_total");
        Ok(self.orders_total)
    }

    async fn orders_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("orders_get");
        Ok(Self::filtered(&self.orders, selector))
    }

    async fn positions_total(&self) -> TerminalResult<i64> {
        self.record_call("positions_total");
        Ok(self.positions_total)
    }

    async fn positions_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>> {
        self.record_call("positions_get");
        Ok(Self::filtered(&self.positions, selector))
    }

    async fn order_send(&self, request: &TradeRequest) -> TerminalResult<Option<Record>> {
        self.record_call("order_send");
        self.sent.lock().unwrap().push(request.clone());
        Ok(self.send_retcode.map(|retcode| {
            record(json!({
                "retcode": retcode,
                "volume": request.volume,
                "price": request.price,
                "comment": "Request executed",
            }))
        }))
    }
}
