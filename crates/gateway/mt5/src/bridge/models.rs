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

//! Data models for MetaTrader 5 bridge responses.
//!
//! The bridge returns responses in the format:
//! - Success: `{"result": <data>}`
//! - Error: `{"error": "error message"}`
//!
//! Record collections arrive either as an array of objects or in columnar
//! form, `{"columns": [...], "rows": [[...], ...]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::terminal::{Record, TerminalError, TerminalResult};

/// Standard bridge response wrapper.
// `Error` is listed first: a missing `result` would otherwise read as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mt5Response<T> {
    Error { error: String },
    Success { result: T },
}

impl<T> Mt5Response<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Mt5Response::Success { result } => Ok(result),
            Mt5Response::Error { error } => Err(error),
        }
    }
}

/// A collection of terminal records in either wire form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    Records(Vec<Record>),
    Columnar {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

impl Rows {
    /// Rows whose width differs from `columns` are rejected.
    pub fn into_records(self) -> TerminalResult<Vec<Record>> {
        match self {
            Rows::Records(records) => Ok(records),
            Rows::Columnar { columns, rows } => rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| {
                    if row.len() != columns.len() {
                        return Err(TerminalError::JsonDecodeError(format!(
                            "row {index} has {} values for {} columns",
                            row.len(),
                            columns.len()
                        )));
                    }
                    Ok(columns.iter().cloned().zip(row).collect::<Record>())
                })
                .collect(),
        }
    }
}
