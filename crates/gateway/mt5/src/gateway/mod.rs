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

//! Session-scoped gateway over the MT5 terminal.
//!
//! Every operation runs one full terminal session: initialize, login, a single
//! call, shutdown. The terminal has one global session slot, so sessions are
//! serialized through a mutex and run strictly one at a time.

mod market_data;
mod trading;

use std::{future::Future, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

pub use trading::{CloseTarget, MarketOrder};

use crate::common::credential::Mt5Credential;
use crate::error::{GatewayError, GatewayResult};
use crate::terminal::{LastError, Terminal};

pub struct Mt5Gateway {
    terminal: Arc<dyn Terminal>,
    session: Arc<Mutex<()>>,
}

impl Mt5Gateway {
    pub fn new(terminal: Arc<dyn Terminal>) -> Self {
        Self {
            terminal,
            session: Arc::new(Mutex::new(())),
        }
    }

    /// Runs `op` inside an authenticated terminal session.
    ///
    /// Once `initialize` succeeds the session is shut down on every exit path,
    /// including a rejected login, a failed `op` and a dropped future.
    pub(crate) async fn with_session<T, F, Fut>(
        &self,
        credential: &Mt5Credential,
        op: F,
    ) -> GatewayResult<T>
    where
        F: FnOnce(Arc<dyn Terminal>) -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let slot = Arc::clone(&self.session).lock_owned().await;
        let mut session = Session::new(Arc::clone(&self.terminal), slot, credential.login);

        let initialized = match session.terminal.initialize().await {
            Ok(initialized) => initialized,
            Err(e) => {
                session.open = false;
                return Err(e.into());
            }
        };
        if !initialized {
            session.open = false;
            let last = last_error(session.terminal.as_ref()).await;
            tracing::warn!(error = %last, "terminal initialize failed");
            return Err(GatewayError::InitializeFailed(last));
        }
        tracing::debug!(login = credential.login, "terminal session opened");

        let result = Self::authenticated(Arc::clone(&session.terminal), credential, op).await;
        session.close().await;

        result
    }

    async fn authenticated<T, F, Fut>(
        terminal: Arc<dyn Terminal>,
        credential: &Mt5Credential,
        op: F,
    ) -> GatewayResult<T>
    where
        F: FnOnce(Arc<dyn Terminal>) -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let authorized = terminal
            .login(credential.login, &credential.password, &credential.server)
            .await?;

        if !authorized {
            let last = last_error(terminal.as_ref()).await;
            tracing::warn!(
                login = credential.login,
                server = %credential.server,
                error = %last,
                "trade account login rejected"
            );
            return Err(GatewayError::LoginFailed(last));
        }

        op(terminal).await
    }
}

/// Holds the session slot while the terminal may be initialized.
///
/// A session dropped while still open is shut down on a spawned task, which
/// keeps the slot until the shutdown call returns.
struct Session {
    terminal: Arc<dyn Terminal>,
    slot: Option<OwnedMutexGuard<()>>,
    login: i64,
    open: bool,
}

impl Session {
    fn new(terminal: Arc<dyn Terminal>, slot: OwnedMutexGuard<()>, login: i64) -> Self {
        Self {
            terminal,
            slot: Some(slot),
            login,
            open: true,
        }
    }

    async fn close(mut self) {
        shutdown(self.terminal.as_ref(), self.login).await;
        self.open = false;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let Some(slot) = self.slot.take() else {
            return;
        };
        if !self.open {
            return;
        }

        let terminal = Arc::clone(&self.terminal);
        let login = self.login;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(login, "terminal session abandoned, shutting down");
                handle.spawn(async move {
                    shutdown(terminal.as_ref(), login).await;
                    drop(slot);
                });
            }
            Err(_) => tracing::error!(login, "terminal session abandoned outside a runtime"),
        }
    }
}

async fn shutdown(terminal: &dyn Terminal, login: i64) {
    match terminal.shutdown().await {
        Ok(()) => tracing::debug!(login, "terminal session shut down"),
        Err(e) => tracing::warn!(login, error = %e, "terminal shutdown failed"),
    }
}

/// Reads the terminal's last error, falling back to the transport failure.
pub(crate) async fn last_error(terminal: &dyn Terminal) -> LastError {
    match terminal.last_error().await {
        Ok(last) => last,
        Err(e) => LastError::unknown(e.to_string()),
    }
}
