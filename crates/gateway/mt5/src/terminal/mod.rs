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

//! The MT5 terminal client as seen by the gateway.
//!
//! The terminal holds a single process-wide session: `initialize` opens it,
//! `login` authenticates it, and `shutdown` releases it. Callers must not
//! interleave sessions; the gateway serializes access.

pub mod error;
pub mod models;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::{TerminalError, TerminalResult};
pub use models::{LastError, Record, Selector, TradeRequest};

use crate::common::enums::Timeframe;

/// Native calls of the MT5 terminal client used by the gateway.
///
/// `None` results mirror the terminal returning nothing for a call, which it
/// does on failure or when nothing matches.
#[async_trait]
pub trait Terminal: Send + Sync {
    async fn initialize(&self) -> TerminalResult<bool>;

    async fn login(&self, login: i64, password: &str, server: &str) -> TerminalResult<bool>;

    async fn shutdown(&self) -> TerminalResult<()>;

    async fn last_error(&self) -> TerminalResult<LastError>;

    async fn account_info(&self) -> TerminalResult<Option<Record>>;

    async fn symbols_get(&self) -> TerminalResult<Option<Vec<Record>>>;

    async fn symbol_info(&self, symbol: &str) -> TerminalResult<Option<Record>>;

    async fn copy_rates_from(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        count: u32,
    ) -> TerminalResult<Option<Vec<Record>>>;

    async fn copy_rates_from_pos(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_pos: u32,
        count: u32,
    ) -> TerminalResult<Option<Vec<Record>>>;

    async fn copy_rates_range(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> TerminalResult<Option<Vec<Record>>>;

    async fn orders_total(&self) -> TerminalResult<i64>;

    async fn orders_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>>;

    async fn positions_total(&self) -> TerminalResult<i64>;

    async fn positions_get(&self, selector: &Selector) -> TerminalResult<Option<Vec<Record>>>;

    async fn order_send(&self, request: &TradeRequest) -> TerminalResult<Option<Record>>;
}
