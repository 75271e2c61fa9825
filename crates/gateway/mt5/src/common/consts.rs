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

//! Constants shared across the MT5 gateway.
//!
//! Numeric values mirror the terminal client's own constants so they can be
//! forwarded to the bridge unchanged.

pub const MT5_GATEWAY_NAME: &str = "MetaTrader 5 REST API";
pub const MT5_GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default price deviation (points) for market deals.
pub const DEFAULT_DEVIATION: u32 = 20;

pub const ORDER_TYPE_BUY: i64 = 0;
pub const ORDER_TYPE_SELL: i64 = 1;

pub const TRADE_ACTION_DEAL: i64 = 1;

pub const TRADE_RETCODE_DONE: i64 = 10009;

pub const TIMEFRAME_M1: i64 = 1;
pub const TIMEFRAME_M2: i64 = 2;
pub const TIMEFRAME_M3: i64 = 3;
pub const TIMEFRAME_M4: i64 = 4;
pub const TIMEFRAME_M5: i64 = 5;
pub const TIMEFRAME_M6: i64 = 6;
pub const TIMEFRAME_M10: i64 = 10;
pub const TIMEFRAME_M12: i64 = 12;
pub const TIMEFRAME_M15: i64 = 15;
pub const TIMEFRAME_M20: i64 = 20;
pub const TIMEFRAME_M30: i64 = 30;
// Hourly and longer frames carry the period flag in the high bits.
pub const TIMEFRAME_H1: i64 = 1 | 0x4000;
pub const TIMEFRAME_H2: i64 = 2 | 0x4000;
pub const TIMEFRAME_H3: i64 = 3 | 0x4000;
pub const TIMEFRAME_H4: i64 = 4 | 0x4000;
pub const TIMEFRAME_H6: i64 = 6 | 0x4000;
pub const TIMEFRAME_H8: i64 = 8 | 0x4000;
pub const TIMEFRAME_H12: i64 = 12 | 0x4000;
pub const TIMEFRAME_D1: i64 = 24 | 0x4000;
pub const TIMEFRAME_W1: i64 = 168 | 0x4000;
pub const TIMEFRAME_MN1: i64 = 1 | 0xC000;
