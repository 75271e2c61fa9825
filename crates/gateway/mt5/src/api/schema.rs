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

//! Request schemas for the REST API.
//!
//! Credentials travel in the JSON body; scalar parameters travel in the query
//! string, except for `/trade` and `/close_position` whose bodies nest the
//! credentials under `login`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{credential::Mt5Credential, enums::Timeframe, parse::parse_utc_date};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{CloseTarget, MarketOrder};
use crate::terminal::Selector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolQuery {
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesFromQuery {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub date_from: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesFromPosQuery {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub start_pos: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesRangeQuery {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub date_from: String,
    pub date_to: String,
}

/// Optional symbol / group pattern / ticket filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    pub symbol: Option<String>,
    pub group: Option<String>,
    pub ticket: Option<u64>,
}

impl FilterQuery {
    pub fn selector(self) -> Selector {
        Selector::from_filters(self.symbol, self.group, self.ticket)
    }

    /// Like `selector` but refuses an empty filter.
    pub fn required_selector(self) -> GatewayResult<Selector> {
        match self.selector() {
            Selector::All => Err(GatewayError::validation(
                "symbol or group or ticket must be specified",
            )),
            selector => Ok(selector),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeBody {
    pub login: Mt5Credential,
    pub order: MarketOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosePositionBody {
    pub login: Mt5Credential,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub ticket: Option<u64>,
}

impl ClosePositionBody {
    pub fn target(&self) -> GatewayResult<CloseTarget> {
        CloseTarget::from_parts(self.symbol.clone(), self.ticket)
            .ok_or_else(|| GatewayError::validation("Either 'symbol' or 'ticket' must be provided"))
    }
}

pub fn parse_date(value: &str) -> GatewayResult<DateTime<Utc>> {
    parse_utc_date(value).map_err(|e| GatewayError::validation(e.to_string()))
}
