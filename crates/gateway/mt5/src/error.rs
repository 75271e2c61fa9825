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

//! Error types for the MT5 gateway.

use std::fmt;

use thiserror::Error;

use crate::terminal::{LastError, TerminalError};

/// Broad category of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connectivity,
    Authentication,
    Validation,
    NotFound,
    Rejected,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("initialize() failed, error code = {0}")]
    InitializeFailed(LastError),

    #[error("failed to connect to trade account, error code = {0}")]
    LoginFailed(LastError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("order_send() failed, retcode={retcode}")]
    OrderRejected { retcode: i64 },

    #[error("order_send() failed, error code = {0}")]
    OrderNotSent(LastError),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        GatewayError::NotFound(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InitializeFailed(_) | GatewayError::Terminal(_) => {
                ErrorKind::Connectivity
            }
            GatewayError::LoginFailed(_) => ErrorKind::Authentication,
            GatewayError::Validation(_) => ErrorKind::Validation,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::OrderRejected { .. } | GatewayError::OrderNotSent(_) => {
                ErrorKind::Rejected
            }
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
