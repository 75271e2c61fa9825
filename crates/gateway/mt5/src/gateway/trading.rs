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

//! Order and position queries, market orders and position closing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{last_error, market_data::table, Mt5Gateway};
use crate::common::{
    consts::{DEFAULT_DEVIATION, TRADE_RETCODE_DONE},
    credential::Mt5Credential,
    enums::OrderSide,
    parse::{extract_integer_field, extract_number_field, extract_string_field, ParseError},
};
use crate::error::{GatewayError, GatewayResult};
use crate::terminal::{Record, Selector, Terminal, TerminalError, TradeRequest};

/// A market order as submitted by API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub symbol: String,
    pub lot: f64,
    #[serde(default)]
    pub sl: Option<f64>,
    #[serde(default)]
    pub tp: Option<f64>,
    #[serde(default = "default_deviation")]
    pub deviation: u32,
    #[serde(default)]
    pub magic: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "type")]
    pub side: OrderSide,
}

fn default_deviation() -> u32 {
    DEFAULT_DEVIATION
}

/// Which open positions to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseTarget {
    Symbol(String),
    Ticket(u64),
}

impl CloseTarget {
    /// Picks the symbol when given, otherwise the ticket. Empty symbols and a
    /// zero ticket count as absent.
    pub fn from_parts(symbol: Option<String>, ticket: Option<u64>) -> Option<Self> {
        match (symbol.filter(|s| !s.is_empty()), ticket.filter(|t| *t != 0)) {
            (Some(symbol), _) => Some(CloseTarget::Symbol(symbol)),
            (None, Some(ticket)) => Some(CloseTarget::Ticket(ticket)),
            (None, None) => None,
        }
    }

    fn selector(&self) -> Selector {
        match self {
            CloseTarget::Symbol(symbol) => Selector::Symbol(symbol.clone()),
            CloseTarget::Ticket(ticket) => Selector::Ticket(*ticket),
        }
    }
}

impl Mt5Gateway {
    pub async fn orders_total(&self, credential: &Mt5Credential) -> GatewayResult<i64> {
        self.with_session(credential, |terminal| async move {
            Ok(terminal.orders_total().await?)
        })
        .await
    }

    pub async fn orders(
        &self,
        credential: &Mt5Credential,
        selector: &Selector,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            Ok(table(terminal.orders_get(selector).await?))
        })
        .await
    }

    pub async fn positions_total(&self, credential: &Mt5Credential) -> GatewayResult<i64> {
        self.with_session(credential, |terminal| async move {
            Ok(terminal.positions_total().await?)
        })
        .await
    }

    pub async fn positions(
        &self,
        credential: &Mt5Credential,
        selector: &Selector,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            Ok(table(terminal.positions_get(selector).await?))
        })
        .await
    }

    /// Submits a market deal priced at the ask for buys and the bid for sells.
    pub async fn order_send(
        &self,
        credential: &Mt5Credential,
        order: &MarketOrder,
    ) -> GatewayResult<Record> {
        self.with_session(credential, |terminal| async move {
            let info = terminal
                .symbol_info(&order.symbol)
                .await?
                .ok_or_else(|| {
                    GatewayError::not_found(format!("Failed to select {}", order.symbol))
                })?;
            let price = quote_for(&info, order.side).map_err(|e| decode_error(&order.symbol, e))?;

            let request = TradeRequest {
                symbol: order.symbol.clone(),
                volume: order.lot,
                order_type: order.side.to_mt5(),
                price,
                sl: order.sl,
                tp: order.tp,
                deviation: order.deviation,
                magic: order.magic,
                comment: order.comment.clone(),
                ..TradeRequest::default()
            };

            let Some(result) = terminal.order_send(&request).await? else {
                return Err(GatewayError::OrderNotSent(last_error(terminal.as_ref()).await));
            };

            let retcode = extract_integer_field(&result, "retcode")
                .map_err(|e| decode_error(&order.symbol, e))?;
            if retcode != TRADE_RETCODE_DONE {
                tracing::warn!(symbol = %order.symbol, retcode, "order rejected");
                return Err(GatewayError::OrderRejected { retcode });
            }

            tracing::info!(
                symbol = %order.symbol,
                side = %order.side,
                volume = order.lot,
                price,
                "market order done"
            );
            Ok(result)
        })
        .await
    }

    /// Closes the open positions matching `target` with offsetting deals.
    ///
    /// Every submitted result is returned, done or not. Positions that cannot
    /// be decoded, or whose symbol or quote the terminal cannot resolve, are
    /// skipped.
    pub async fn order_close(
        &self,
        credential: &Mt5Credential,
        target: &CloseTarget,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            let positions = terminal
                .positions_get(&target.selector())
                .await?
                .unwrap_or_default();

            if positions.is_empty() {
                return Err(GatewayError::not_found(
                    "No positions found for the given symbol or ticket",
                ));
            }

            let mut results = Vec::with_capacity(positions.len());
            for record in &positions {
                let position = match OpenPosition::from_record(record) {
                    Ok(position) => position,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping undecodable position");
                        continue;
                    }
                };
                if let Some(result) = close_position(terminal.as_ref(), &position).await? {
                    results.push(result);
                }
            }
            Ok(results)
        })
        .await
    }
}

/// The fields of an open position needed to offset it.
#[derive(Debug, Clone, PartialEq)]
struct OpenPosition {
    ticket: u64,
    symbol: String,
    side: OrderSide,
    volume: f64,
    magic: Option<i64>,
    comment: Option<String>,
}

impl OpenPosition {
    fn from_record(record: &Record) -> Result<Self, ParseError> {
        let ticket = record
            .get("ticket")
            .and_then(Value::as_u64)
            .ok_or_else(|| ParseError::MissingField("ticket".to_string()))?;
        let symbol = extract_string_field(record, "symbol")?;
        let opened = extract_integer_field(record, "type")?;
        let side = OrderSide::from_mt5(opened).ok_or_else(|| {
            ParseError::InvalidValue(format!("position {ticket}: unknown type {opened}"))
        })?;
        let volume = extract_number_field(record, "volume")?;

        Ok(Self {
            ticket,
            symbol,
            side,
            volume,
            magic: record.get("magic").and_then(Value::as_i64),
            comment: record
                .get("comment")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

async fn close_position(
    terminal: &dyn Terminal,
    position: &OpenPosition,
) -> GatewayResult<Option<Record>> {
    let ticket = position.ticket;
    let symbol = &position.symbol;

    let Some(info) = terminal.symbol_info(symbol).await? else {
        tracing::debug!(%symbol, ticket, "symbol not resolved, position skipped");
        return Ok(None);
    };

    let side = position.side.opposite();
    let price = match quote_for(&info, side) {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!(%symbol, ticket, error = %e, "no closing quote, position skipped");
            return Ok(None);
        }
    };

    let request = TradeRequest {
        symbol: symbol.clone(),
        volume: position.volume,
        order_type: side.to_mt5(),
        position: Some(ticket),
        price,
        deviation: DEFAULT_DEVIATION,
        magic: position.magic,
        comment: position.comment.clone(),
        ..TradeRequest::default()
    };

    let result = terminal.order_send(&request).await?;
    if result.is_none() {
        tracing::warn!(%symbol, ticket, "close order not sent");
    }
    Ok(result)
}

/// Price a deal on `side` executes at: ask for buys, bid for sells.
fn quote_for(info: &Record, side: OrderSide) -> Result<f64, ParseError> {
    match side {
        OrderSide::Buy => extract_number_field(info, "ask"),
        OrderSide::Sell => extract_number_field(info, "bid"),
    }
}

fn decode_error(context: &str, err: ParseError) -> GatewayError {
    GatewayError::Terminal(TerminalError::JsonDecodeError(format!("{context}: {err}")))
}
