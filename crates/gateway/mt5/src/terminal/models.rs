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

//! Models exchanged with the MT5 terminal.
//!
//! Most terminal payloads are handled as raw JSON records to keep the
//! terminal's field names and shapes intact. Only the request side of
//! trading is typed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use serde_with::skip_serializing_none;

use crate::common::consts::{DEFAULT_DEVIATION, TRADE_ACTION_DEAL};

/// One terminal record (account, symbol, bar, order, position, trade result).
pub type Record = Map<String, Value>;

/// Error code and description reported by the terminal's `last_error()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LastErrorRepr")]
pub struct LastError {
    pub code: i64,
    pub message: String,
}

impl LastError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Placeholder used when the terminal cannot report its own error.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::new(-1, reason)
    }
}

impl fmt::Display for LastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, '{}')", self.code, self.message)
    }
}

// The terminal reports `(code, description)`; bridges relay it as a pair or an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum LastErrorRepr {
    Pair(i64, String),
    Object { code: i64, message: String },
}

impl From<LastErrorRepr> for LastError {
    fn from(repr: LastErrorRepr) -> Self {
        match repr {
            LastErrorRepr::Pair(code, message) | LastErrorRepr::Object { code, message } => {
                Self { code, message }
            }
        }
    }
}

/// Filter for order and position queries.
///
/// When several filters are supplied the symbol wins, then the group, then
/// the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Symbol(String),
    Group(String),
    Ticket(u64),
}

impl Selector {
    pub fn from_filters(
        symbol: Option<String>,
        group: Option<String>,
        ticket: Option<u64>,
    ) -> Self {
        match (symbol, group, ticket) {
            (Some(symbol), _, _) => Self::Symbol(symbol),
            (None, Some(group), _) => Self::Group(group),
            (None, None, Some(ticket)) => Self::Ticket(ticket),
            (None, None, None) => Self::All,
        }
    }

    /// Keyword arguments for the terminal's `*_get` calls.
    pub fn to_args(&self) -> Value {
        match self {
            Self::All => json!({}),
            Self::Symbol(symbol) => json!({ "symbol": symbol }),
            Self::Group(group) => json!({ "group": group }),
            Self::Ticket(ticket) => json!({ "ticket": ticket }),
        }
    }
}

/// Request passed to the terminal's `order_send`.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: i64,
    pub symbol: String,
    pub volume: f64,
    #[serde(rename = "type")]
    pub order_type: i64,
    pub price: f64,
    pub sl: Option<f64>,
    pub tp: Option<f64>,
    pub deviation: u32,
    pub magic: Option<i64>,
    pub comment: Option<String>,
    pub position: Option<u64>,
}

impl Default for TradeRequest {
    fn default() -> Self {
        Self {
            action: TRADE_ACTION_DEAL,
            symbol: String::new(),
            volume: 0.0,
            order_type: 0,
            price: 0.0,
            sl: None,
            tp: None,
            deviation: DEFAULT_DEVIATION,
            magic: None,
            comment: None,
            position: None,
        }
    }
}
