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

//! HTTP server exposing the MT5 terminal through the REST gateway.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use mt5_rest_gateway::{api, Mt5BridgeClient, Mt5Gateway, Mt5GatewayConfig, MT5_GATEWAY_NAME};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mt5-http", version, about = "MetaTrader 5 REST gateway")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "MT5_GATEWAY_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Base URL of the MT5 terminal bridge.
    #[arg(long, env = "MT5_BRIDGE_URL", default_value = "http://localhost:5000")]
    bridge_url: String,

    /// Bridge HTTP timeout in seconds.
    #[arg(long, env = "MT5_HTTP_TIMEOUT", default_value_t = 30)]
    http_timeout: u64,

    /// Optional proxy for bridge calls.
    #[arg(long, env = "MT5_HTTP_PROXY")]
    proxy: Option<String>,
}

impl From<Args> for Mt5GatewayConfig {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: args.bind,
            bridge_url: args.bridge_url,
            http_timeout: args.http_timeout,
            proxy: args.proxy,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Mt5GatewayConfig::from(Args::parse());
    config.validate()?;

    let terminal = Mt5BridgeClient::new(&config).context("failed to build bridge client")?;
    let gateway = Arc::new(Mt5Gateway::new(Arc::new(terminal)));
    let app = api::router(gateway);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        bridge = %config.bridge_base(),
        "{MT5_GATEWAY_NAME} listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
