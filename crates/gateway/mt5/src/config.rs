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

//! Configuration for the MT5 REST gateway.
//!
//! `Mt5GatewayConfig` describes where the gateway listens and how it reaches
//! the terminal bridge. Trade account credentials are not configuration: they
//! arrive with each request as `Mt5Credential` (common/credential.rs).

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bridge URL '{0}': {1}")]
    InvalidBridgeUrl(String, url::ParseError),
    #[error("Unsupported bridge URL scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("HTTP timeout must be positive")]
    ZeroTimeout,
}

/// Main configuration for the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mt5GatewayConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The base URL of the MT5 terminal bridge.
    pub bridge_url: String,
    /// HTTP timeout for bridge calls, in seconds.
    pub http_timeout: u64,
    /// Optional proxy URL for bridge calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

impl Default for Mt5GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            bridge_url: "http://localhost:5000".to_string(),
            http_timeout: 30,
            proxy: None,
        }
    }
}

impl Mt5GatewayConfig {
    pub fn with_bridge_url(bridge_url: String) -> Self {
        Self {
            bridge_url,
            ..Self::default()
        }
    }

    /// Checks the bridge URL and timeout, returning the parsed URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.bridge_url)
            .map_err(|e| ConfigError::InvalidBridgeUrl(self.bridge_url.clone(), e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.http_timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(url)
    }

    /// Bridge base URL without a trailing slash.
    pub fn bridge_base(&self) -> &str {
        self.bridge_url.trim_end_matches('/')
    }
}
