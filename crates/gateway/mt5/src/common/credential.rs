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

//! Credentials for a MetaTrader 5 trade account.
//!
//! Credentials arrive with every request and are forwarded to the terminal's
//! login call. They are never stored beyond the request that carried them.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// MT5 trade account credentials.
///
/// On the wire the account number is the `id` field:
/// `{"id": 123, "password": "...", "server": "Broker-Demo"}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct Mt5Credential {
    #[serde(rename = "id")]
    pub login: i64,
    pub password: String,
    pub server: String,
}

impl Mt5Credential {
    pub fn builder() -> Mt5CredentialBuilder {
        Mt5CredentialBuilder::default()
    }
}

impl fmt::Debug for Mt5Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mt5Credential")
            .field("login", &self.login)
            .field("password", &"***")
            .field("server", &self.server)
            .finish()
    }
}
