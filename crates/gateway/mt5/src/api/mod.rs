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

//! REST API over the MT5 gateway.

pub mod extract;
pub mod handlers;
pub mod response;
pub mod schema;

use std::sync::Arc;

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

pub use response::{ApiError, ApiResult, DataResponse, FailureResponse};

use crate::gateway::Mt5Gateway;

/// Builds the API router over `gateway`.
pub fn router(gateway: Arc<Mt5Gateway>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/account_info", post(handlers::account_info))
        .route("/symbols_get", post(handlers::symbols_get))
        .route("/symbol_info", post(handlers::symbol_info))
        .route("/copy_rates_from", post(handlers::copy_rates_from))
        .route("/copy_rates_from_pos", post(handlers::copy_rates_from_pos))
        .route("/copy_rates_range", post(handlers::copy_rates_range))
        .route("/orders_total", post(handlers::orders_total))
        .route("/orders_get", post(handlers::orders_get))
        .route("/trade", post(handlers::trade))
        .route("/close_position", post(handlers::close_position))
        .route("/positions_total", post(handlers::positions_total))
        .route("/positions_get", post(handlers::positions_get))
        .layer(middleware::from_fn(request_span))
        .with_state(gateway)
}

async fn request_span(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        route = %route,
        login = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;
        tracing::info!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await
}
