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

//! Error types for calls into the MT5 terminal.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("HTTP error: {0} - {1}")]
    HttpError(u16, String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Invalid request: {0}")]
    InvalidRequestError(String),

    #[error("Resource not found: {0}")]
    NotFoundError(String),

    #[error("JSON decode error: {0}")]
    JsonDecodeError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// The bridge answered with `{"error": ...}`.
    #[error("Terminal error: {0}")]
    CallError(String),
}

impl TerminalError {
    /// Maps bridge HTTP status codes to error variants.
    pub fn from_http_status(status: u16, message: String) -> Self {
        match status {
            400 => TerminalError::InvalidRequestError(message),
            401 | 403 => TerminalError::AuthenticationError(message),
            404 => TerminalError::NotFoundError(message),
            429 => TerminalError::RateLimitError(message),
            500..=599 => TerminalError::ServerError(message),
            _ => TerminalError::HttpError(status, message),
        }
    }
}

impl From<reqwest::Error> for TerminalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TerminalError::TimeoutError(err.to_string())
        } else if err.is_connect() {
            TerminalError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            TerminalError::JsonDecodeError(err.to_string())
        } else {
            TerminalError::RequestError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TerminalError {
    fn from(err: serde_json::Error) -> Self {
        TerminalError::JsonDecodeError(err.to_string())
    }
}

pub type TerminalResult<T> = Result<T, TerminalError>;
