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

//! Account, symbol and rate queries.

use chrono::{DateTime, Utc};

use super::Mt5Gateway;
use crate::common::{credential::Mt5Credential, enums::Timeframe, parse::tabulate};
use crate::error::{GatewayError, GatewayResult};
use crate::terminal::Record;

impl Mt5Gateway {
    pub async fn account_info(&self, credential: &Mt5Credential) -> GatewayResult<Record> {
        self.with_session(credential, |terminal| async move {
            terminal
                .account_info()
                .await?
                .ok_or_else(|| GatewayError::not_found("account info not available"))
        })
        .await
    }

    pub async fn symbols(&self, credential: &Mt5Credential) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            Ok(table(terminal.symbols_get().await?))
        })
        .await
    }

    pub async fn symbol_info(
        &self,
        credential: &Mt5Credential,
        symbol: &str,
    ) -> GatewayResult<Record> {
        self.with_session(credential, |terminal| async move {
            terminal
                .symbol_info(symbol)
                .await?
                .ok_or_else(|| GatewayError::not_found(format!("symbol {symbol} not found")))
        })
        .await
    }

    pub async fn copy_rates_from(
        &self,
        credential: &Mt5Credential,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        count: u32,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            let rates = terminal
                .copy_rates_from(symbol, timeframe, date_from, count)
                .await?;
            Ok(table(rates))
        })
        .await
    }

    pub async fn copy_rates_from_pos(
        &self,
        credential: &Mt5Credential,
        symbol: &str,
        timeframe: Timeframe,
        start_pos: u32,
        count: u32,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            let rates = terminal
                .copy_rates_from_pos(symbol, timeframe, start_pos, count)
                .await?;
            Ok(table(rates))
        })
        .await
    }

    pub async fn copy_rates_range(
        &self,
        credential: &Mt5Credential,
        symbol: &str,
        timeframe: Timeframe,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> GatewayResult<Vec<Record>> {
        self.with_session(credential, |terminal| async move {
            let rates = terminal
                .copy_rates_range(symbol, timeframe, date_from, date_to)
                .await?;
            Ok(table(rates))
        })
        .await
    }
}

// Null and empty collections both come back as an empty table.
pub(super) fn table(records: Option<Vec<Record>>) -> Vec<Record> {
    records.map(tabulate).unwrap_or_default()
}
