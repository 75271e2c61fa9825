// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------
//
//! HTTP client for the MetaTrader 5 terminal bridge.
//!
//! - Each terminal call is a POST of a JSON argument object to `/api/<call>`.
//! - Responses are unwrapped from the bridge envelope and returned as raw
//!   records; shaping them for API consumers is the gateway's job.
//!
//! This module provides:
//! - `Mt5BridgeInnerClient`: low-level client that speaks in raw JSON.
//! - `Mt5BridgeClient`: clonable wrapper implementing `Terminal`.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::bridge::models::{Mt5Response, Rows};
use crate::common::enums::Timeframe;
use crate::config::Mt5GatewayConfig;
use crate::terminal::{
    LastError, Record, Selector, Terminal, TerminalError, TerminalResult, TradeRequest,
};

// Low-level MT5 bridge client (inner)
pub struct Mt5BridgeInnerClient {
    base_url: String,
    client: Client,
}

/// Terminal client backed by the MT5 bridge.
#[derive(Clone)]
pub struct Mt5BridgeClient {
    inner: Arc<Mt5BridgeInnerClient>,
}

impl Mt5BridgeInnerClient {
    pub fn new(config: &Mt5GatewayConfig) -> TerminalResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("mt5-rest-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.http_timeout));

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| TerminalError::ConnectionError(format!("invalid proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TerminalError::ConnectionError(e.to_string()))?;

        Ok(Self {
            base_url: config.bridge_base().to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json(&self, path: &str, body: &Value) -> TerminalResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "bridge request");

        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;

        if status != 200 {
            return Err(TerminalError::from_http_status(status, text));
        }

        serde_json::from_str(&text)
            .map_err(|e| TerminalError::JsonDecodeError(format!("Invalid JSON response: {e}")))
    }

    /// Invokes one terminal call and unwraps the bridge envelope.
    pub async fn call<T: DeserializeOwned>(&self, name: &str, args: &Value) -> TerminalResult<T> {
        let value = self.post_json(&format!("/api/{name}"), args).await?;
        let response: Mt5Response<T> = serde_json::from_value(value)?;
        response.into_result().map_err(TerminalError::CallError)
    }

    async fn call_rows(&self, name: &str, args: &Value) -> TerminalResult<Option<Vec<Record>>> {
        let rows: Option<Rows> = self.call(name, args).await?;
        rows.map(Rows::into_records).transpose()
    }
}

impl Mt5BridgeClient {
    pub fn new(config: &Mt5GatewayConfig) -> TerminalResult<Self> {
        let inner = Mt5BridgeInnerClient::new(config)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

#[async_trait]
impl Terminal for Mt5BridgeClient {
    async fn initialize(&self) -> TerminalResult<bool> {
        self.inner.call("initialize", &json!({})).await
    }

    async fn login(&self, login: i64, password: &str, server: &str) -> TerminalResult<bool> {
        let body = json!({
            "login": login,
            "password": password,
            "server": server,
        });
        self.inner.call("login", &body).await
    }

    async fn shutdown(&self) -> TerminalResult<()> {
        let _: Value = self.inner.call("shutdown", &json!({})).await?;
        Ok(())
    }

    async fn last_error(&self) -> TerminalResult<LastError> {
        self.inner.call("last_error", &json!({})).await
    }

    async fn account_info(&self) -> TerminalResult<Option<Record>> {
        self.inner.call("account_info", &json!({})).await
    }

    async fn symbols_get(&self) -> TerminalResult<Option<Vec<Record>>> {
        self.inner.call_rows("symbols_get", &json!({})).await
    }

    async fn symbol_info(&self, symbol: &str) -> TerminalResult<Option<Record>> {
        self.inner
            .call("symbol_info", &json!({ "symbol": symbol }))
            .await
    }

    async fn copy_rates_from(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        count: u32,
    ) -> TerminalResult<Option<Vec<Record>>> {
        let body = json!({
            "symbol": symbol,
            "timeframe": timeframe.to_mt5(),
            "date_from": date_from.timestamp(),
            "count": count,
        });
        self.inner.call_rows("copy_rates_from", &body).await
    }

    async fn copy_rates_from_pos(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_pos: u32,
        count: u32,
    ) -> TerminalResult<Option<Vec<Record>>> {
        let body = json!({
            "symbol": symbol,
            "timeframe": timeframe.to_mt5(),
            "start_pos": start_pos,
            "count": count,
        });
        self.inner.call_rows("copy_rates_from_pos", &body).await
    }

    async fn copy_rates_range(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> TerminalResult<Option<Vec<Record>>> {
        let body = json!({
            "symbol": symbol,
            "timeframe": timeframe.to_mt5(),
            "date_from": date_from.timestamp(),
            "date_to": date_to.timestamp(),
        });
        self.inner.call_rows("copy_rates_range", &body).await
    }

    async fn orders_total(&self) -> TerminalResult<i64> {
        self.inner.call("orders_total", &json!({})).await
    }

    async fn orders_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>> {
        self.inner.call_rows("orders_get", &selector.to_args()).await
    }

    async fn positions_total(&self) -> TerminalResult<i64> {
        self.inner.call("positions_total", &json!({})).await
    }

    async fn positions_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>> {
        self.inner
            .call_rows("positions_get", &selector.to_args())
            .await
    }

    async fn order_send(&self, request: &TradeRequest) -> TerminalResult<Option<Record>> {
        let body = serde_json::to_value(request)?;
        self.inner.call("order_send", &body).await
    }
}
