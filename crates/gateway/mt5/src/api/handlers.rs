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

//! Route handlers. Each one validates its input, runs one gateway operation
//! and wraps the outcome in the response envelope.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::response::{ApiResult, DataResponse, OrdersTotalResponse, PositionsTotalResponse};
use crate::api::schema::{
    parse_date, ClosePositionBody, FilterQuery, RatesFromPosQuery, RatesFromQuery,
    RatesRangeQuery, SymbolQuery, TradeBody,
};
use crate::common::{consts::{MT5_GATEWAY_NAME, MT5_GATEWAY_VERSION}, credential::Mt5Credential};
use crate::gateway::Mt5Gateway;
use crate::terminal::Record;

type Gateway = State<Arc<Mt5Gateway>>;
type Records = Json<DataResponse<Vec<Record>>>;

fn record_login(credential: &Mt5Credential) {
    tracing::Span::current().record("login", credential.login);
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": format!("Welcome to {MT5_GATEWAY_NAME}") }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": MT5_GATEWAY_VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn account_info(
    State(gateway): Gateway,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Json<DataResponse<Record>>> {
    record_login(&login);
    let account = gateway.account_info(&login).await?;
    Ok(DataResponse::ok(account))
}

pub async fn symbols_get(
    State(gateway): Gateway,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let symbols = gateway.symbols(&login).await?;
    Ok(DataResponse::ok(symbols))
}

pub async fn symbol_info(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<SymbolQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Json<DataResponse<Record>>> {
    record_login(&login);
    let info = gateway.symbol_info(&login, &query.symbol).await?;
    Ok(DataResponse::ok(info))
}

pub async fn copy_rates_from(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<RatesFromQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let date_from = parse_date(&query.date_from)?;
    let rates = gateway
        .copy_rates_from(&login, &query.symbol, query.timeframe, date_from, query.count)
        .await?;
    Ok(DataResponse::ok(rates))
}

pub async fn copy_rates_from_pos(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<RatesFromPosQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let rates = gateway
        .copy_rates_from_pos(
            &login,
            &query.symbol,
            query.timeframe,
            query.start_pos,
            query.count,
        )
        .await?;
    Ok(DataResponse::ok(rates))
}

pub async fn copy_rates_range(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<RatesRangeQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let date_from = parse_date(&query.date_from)?;
    let date_to = parse_date(&query.date_to)?;
    let rates = gateway
        .copy_rates_range(&login, &query.symbol, query.timeframe, date_from, date_to)
        .await?;
    Ok(DataResponse::ok(rates))
}

pub async fn orders_total(
    State(gateway): Gateway,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Json<OrdersTotalResponse>> {
    record_login(&login);
    let total_orders = gateway.orders_total(&login).await?;
    Ok(Json(OrdersTotalResponse {
        success: true,
        total_orders,
    }))
}

pub async fn orders_get(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<FilterQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let selector = query.required_selector()?;
    let orders = gateway.orders(&login, &selector).await?;
    Ok(DataResponse::ok(orders))
}

pub async fn positions_total(
    State(gateway): Gateway,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Json<PositionsTotalResponse>> {
    record_login(&login);
    let total_positions = gateway.positions_total(&login).await?;
    Ok(Json(PositionsTotalResponse {
        success: true,
        total_positions,
    }))
}

pub async fn positions_get(
    State(gateway): Gateway,
    ApiQuery(query): ApiQuery<FilterQuery>,
    ApiJson(login): ApiJson<Mt5Credential>,
) -> ApiResult<Records> {
    record_login(&login);
    let positions = gateway.positions(&login, &query.selector()).await?;
    Ok(DataResponse::ok(positions))
}

pub async fn trade(
    State(gateway): Gateway,
    ApiJson(body): ApiJson<TradeBody>,
) -> ApiResult<Json<DataResponse<Record>>> {
    record_login(&body.login);
    let result = gateway.order_send(&body.login, &body.order).await?;
    Ok(DataResponse::ok(result))
}

pub async fn close_position(
    State(gateway): Gateway,
    ApiJson(body): ApiJson<ClosePositionBody>,
) -> ApiResult<Records> {
    record_login(&body.login);
    let target = body.target()?;
    let results = gateway.order_close(&body.login, &target).await?;
    Ok(DataResponse::ok(results))
}
