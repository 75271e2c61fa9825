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

//! Enumerations for the MetaTrader 5 gateway.
//!
//! Request strings map onto terminal constants by exact, case-sensitive match.
//! Unknown codes are rejected rather than forwarded.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::consts::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumParseError {
    #[error("unknown timeframe '{0}'")]
    Timeframe(String),
    #[error("unknown order type '{0}', expected BUY or SELL")]
    OrderSide(String),
}

/// Bar period accepted by the rates endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    M1,
    M2,
    M3,
    M4,
    M5,
    M6,
    M10,
    M12,
    M15,
    M20,
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    D1,
    W1,
    MN1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 21] = [
        Self::M1,
        Self::M2,
        Self::M3,
        Self::M4,
        Self::M5,
        Self::M6,
        Self::M10,
        Self::M12,
        Self::M15,
        Self::M20,
        Self::M30,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H6,
        Self::H8,
        Self::H12,
        Self::D1,
        Self::W1,
        Self::MN1,
    ];

    /// Terminal constant for this period.
    pub fn to_mt5(self) -> i64 {
        match self {
            Self::M1 => TIMEFRAME_M1,
            Self::M2 => TIMEFRAME_M2,
            Self::M3 => TIMEFRAME_M3,
            Self::M4 => TIMEFRAME_M4,
            Self::M5 => TIMEFRAME_M5,
            Self::M6 => TIMEFRAME_M6,
            Self::M10 => TIMEFRAME_M10,
            Self::M12 => TIMEFRAME_M12,
            Self::M15 => TIMEFRAME_M15,
            Self::M20 => TIMEFRAME_M20,
            Self::M30 => TIMEFRAME_M30,
            Self::H1 => TIMEFRAME_H1,
            Self::H2 => TIMEFRAME_H2,
            Self::H3 => TIMEFRAME_H3,
            Self::H4 => TIMEFRAME_H4,
            Self::H6 => TIMEFRAME_H6,
            Self::H8 => TIMEFRAME_H8,
            Self::H12 => TIMEFRAME_H12,
            Self::D1 => TIMEFRAME_D1,
            Self::W1 => TIMEFRAME_W1,
            Self::MN1 => TIMEFRAME_MN1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::M3 => "M3",
            Self::M4 => "M4",
            Self::M5 => "M5",
            Self::M6 => "M6",
            Self::M10 => "M10",
            Self::M12 => "M12",
            Self::M15 => "M15",
            Self::M20 => "M20",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H6 => "H6",
            Self::H8 => "H8",
            Self::H12 => "H12",
            Self::D1 => "D1",
            Self::W1 => "W1",
            Self::MN1 => "MN1",
        }
    }
}

impl FromStr for Timeframe {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| EnumParseError::Timeframe(s.to_string()))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(value: Timeframe) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a market order or open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn to_mt5(self) -> i64 {
        match self {
            Self::Buy => ORDER_TYPE_BUY,
            Self::Sell => ORDER_TYPE_SELL,
        }
    }

    /// Side of a position as reported by the terminal's `type` field.
    pub fn from_mt5(value: i64) -> Option<Self> {
        match value {
            ORDER_TYPE_BUY => Some(Self::Buy),
            ORDER_TYPE_SELL => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(EnumParseError::OrderSide(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderSide {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderSide> for String {
    fn from(value: OrderSide) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
