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

//! Provides an ergonomic wrapper around the **Bitget v2 futures REST API** –
//! <https://www.bitget.com/api-doc/contract/intro>.
//!
//! The core type exported by this module is [`BitgetHttpClient`]. Every operation
//! builds its path, signs it when the endpoint is private, issues exactly one HTTP
//! call and returns the parsed JSON body.
//!
//! Private endpoint operations return the raw response document: exchange side
//! failures (bad signature, insufficient margin, …) are not translated and come back
//! as the exchange's own `{code, msg}` body. Only transport failures and bodies that
//! are not JSON are reported as [`BitgetHttpError`].
//!
//! # Quick links to official docs
//! | Domain                | Bitget reference                                                   |
//! |-----------------------|--------------------------------------------------------------------|
//! | Signature             | <https://www.bitget.com/api-doc/common/signature>                  |
//! | Market data           | <https://www.bitget.com/api-doc/contract/market/Get-Ticker>        |
//! | Positions             | <https://www.bitget.com/api-doc/contract/position/get-all-position>|
//! | Orders                | <https://www.bitget.com/api-doc/contract/trade/Place-Order>        |

use std::{collections::HashMap, fmt::Debug, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{
    error::BitgetHttpError,
    parse::parse_index_price,
    query::{
        ClosePositionsParamsBuilder, GetOrdersHistoryParams, GetPositionsParamsBuilder,
        GetTickerParamsBuilder, PlaceOrderParams, PlaceOrderParamsBuilder, PlacePlanOrderParams,
        PlacePlanOrderParamsBuilder, SetLeverageParamsBuilder, to_query_string,
    },
};
use crate::{
    common::{
        consts::{
            BITGET_SUCCESS_CODE, BITGET_USER_AGENT, CONTENT_TYPE_JSON, HEADER_ACCESS_KEY,
            HEADER_ACCESS_PASSPHRASE, HEADER_ACCESS_SIGN, HEADER_ACCESS_TIMESTAMP,
            HEADER_CONTENT_TYPE, HEADER_LOCALE,
        },
        credential::Credential,
        enums::{BitgetMarginMode, BitgetOrderType, BitgetProductType, BitgetSide},
        parse::futures_symbol,
    },
    config::BitgetHttpClientConfig,
};

const PATH_ALL_POSITIONS: &str = "/api/v2/mix/position/all-position";
const PATH_TICKER: &str = "/api/v2/mix/market/ticker";
const PATH_ORDERS_HISTORY: &str = "/api/v2/mix/order/orders-history";
const PATH_PLACE_PLAN_ORDER: &str = "/api/v2/mix/order/place-plan-order";
const PATH_PLACE_ORDER: &str = "/api/v2/mix/order/place-order";
const PATH_SET_LEVERAGE: &str = "/api/v2/mix/account/set-leverage";
const PATH_CLOSE_POSITIONS: &str = "/api/v2/mix/order/close-positions";

/// Provides a HTTP client for connecting to the [Bitget](https://www.bitget.com) futures REST API.
///
/// Cloning is cheap: the underlying connection pool and credential are shared.
#[derive(Clone)]
pub struct BitgetHttpClient {
    base_url: String,
    client: reqwest::Client,
    credential: Option<Arc<Credential>>,
    product_type: BitgetProductType,
    margin_coin: String,
    locale: String,
}

impl Debug for BitgetHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.credential.as_ref().map(|_| "<redacted>");
        f.debug_struct(stringify!(BitgetHttpClient))
            .field("base_url", &self.base_url)
            .field("credential", &credential)
            .field("product_type", &self.product_type)
            .field("margin_coin", &self.margin_coin)
            .finish_non_exhaustive()
    }
}

impl BitgetHttpClient {
    /// Creates a new [`BitgetHttpClient`] from an explicit configuration.
    ///
    /// A configuration without credentials produces a client which can only call
    /// public endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &BitgetHttpClientConfig) -> Result<Self, BitgetHttpError> {
        let mut builder = reqwest::Client::builder().user_agent(BITGET_USER_AGENT);
        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            base_url: config.http_url(),
            client: builder.build()?,
            credential: config.credential().map(Arc::new),
            product_type: config.product_type,
            margin_coin: config.margin_coin.clone(),
            locale: config.locale.clone(),
        })
    }

    /// Creates a new [`BitgetHttpClient`] with credentials sourced from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential environment variable is missing or the
    /// client cannot be built.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = BitgetHttpClientConfig::from_env()?;
        Ok(Self::new(&config)?)
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` if the client can sign requests.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credential.is_some()
    }

    /// Returns the product type used by position and order endpoints.
    #[must_use]
    pub fn product_type(&self) -> BitgetProductType {
        self.product_type
    }

    /// Returns the configured margin coin.
    #[must_use]
    pub fn margin_coin(&self) -> &str {
        &self.margin_coin
    }

    /// Returns the Bitget futures symbol for a base coin or symbol, e.g. `btc` -> `BTCUSDT`.
    #[must_use]
    pub fn futures_symbol(&self, symbol: &str) -> String {
        futures_symbol(symbol, &self.margin_coin)
    }

    /// Builds the authentication headers for a request, stamped with the current time.
    ///
    /// Two calls with identical inputs differ only in `ACCESS-TIMESTAMP` and hence
    /// in `ACCESS-SIGN`.
    ///
    /// # Errors
    ///
    /// Returns [`BitgetHttpError::MissingCredentials`] if the client has no credentials.
    pub fn get_headers(
        &self,
        method: &Method,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> Result<HashMap<String, String>, BitgetHttpError> {
        let timestamp = Utc::now().timestamp_millis().to_string();
        self.get_headers_at(&timestamp, method, request_path, query_string, body)
    }

    /// Builds the authentication headers for a request with a fixed `timestamp`
    /// (milliseconds since epoch). Output is deterministic for fixed inputs.
    ///
    /// # Errors
    ///
    /// Returns [`BitgetHttpError::MissingCredentials`] if the client has no credentials.
    pub fn get_headers_at(
        &self,
        timestamp: &str,
        method: &Method,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> Result<HashMap<String, String>, BitgetHttpError> {
        let credential = match self.credential.as_ref() {
            Some(c) => c,
            None => return Err(BitgetHttpError::MissingCredentials),
        };

        let signature = credential.sign(
            timestamp,
            method.as_str(),
            request_path,
            query_string,
            body,
        );

        Ok(HashMap::from([
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
            (HEADER_ACCESS_KEY.to_string(), credential.api_key.to_string()),
            (HEADER_ACCESS_SIGN.to_string(), signature),
            (
                HEADER_ACCESS_PASSPHRASE.to_string(),
                credential.api_passphrase.clone(),
            ),
            (HEADER_ACCESS_TIMESTAMP.to_string(), timestamp.to_string()),
            (HEADER_LOCALE.to_string(), self.locale.clone()),
        ]))
    }

    /// Sends one HTTP request to Bitget and returns the JSON body.
    ///
    /// The query string must already be canonical: it is appended to the URL verbatim
    /// and is the exact string that gets signed. The body is sent as the same bytes
    /// that were signed.
    async fn send_request(
        &self,
        method: Method,
        request_path: &str,
        query_string: &str,
        body: Option<String>,
        authenticate: bool,
    ) -> Result<Value, BitgetHttpError> {
        let url = if query_string.is_empty() {
            format!("{}{request_path}", self.base_url)
        } else {
            format!("{}{request_path}?{query_string}", self.base_url)
        };

        // Signed requests already carry `Content-Type` among the auth headers
        let headers = if authenticate {
            self.get_headers(
                &method,
                request_path,
                query_string,
                body.as_deref().unwrap_or_default(),
            )?
        } else {
            HashMap::from([(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string())])
        };

        tracing::debug!("{method} {request_path}");

        let mut request = self.client.request(method, url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        tracing::trace!("Response {status}: {}", String::from_utf8_lossy(&bytes));

        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                tracing::error!("Failed to deserialize response from {request_path}: {e}");
                return Err(BitgetHttpError::JsonError(e.to_string()));
            }
            Err(_) => {
                return Err(BitgetHttpError::UnexpectedStatus {
                    status,
                    body: String::from_utf8_lossy(&bytes).to_string(),
                });
            }
        };

        log_exchange_reply(request_path, status, &value);
        Ok(value)
    }

    async fn post_json<S: Serialize>(
        &self,
        request_path: &str,
        params: &S,
    ) -> Result<Value, BitgetHttpError> {
        let body = serde_json::to_string(params)?;
        self.send_request(Method::POST, request_path, "", Some(body), true)
            .await
    }

    /// Requests all open positions for the configured product type and margin coin.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/position/get-all-position>
    pub async fn get_positions(&self) -> Result<Value, BitgetHttpError> {
        let params = GetPositionsParamsBuilder::default()
            .product_type(self.product_type)
            .margin_coin(self.margin_coin.clone())
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        let query = to_query_string(&params)?;
        self.send_request(Method::GET, PATH_ALL_POSITIONS, &query, None, true)
            .await
    }

    /// Requests the current index price for `symbol` (a base coin such as `btc`).
    ///
    /// This is a public endpoint and is not signed.
    ///
    /// # Errors
    ///
    /// Returns [`BitgetHttpError::NotFound`] if the exchange returns no ticker with an
    /// index price for the symbol, or another error if the request fails.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/market/Get-Ticker>
    pub async fn get_crypto_price(&self, symbol: &str) -> Result<Decimal, BitgetHttpError> {
        let params = GetTickerParamsBuilder::default()
            .product_type(self.product_type)
            .symbol(self.futures_symbol(symbol))
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        let query = to_query_string(&params)?;
        let response = self
            .send_request(Method::GET, PATH_TICKER, &query, None, false)
            .await?;

        parse_index_price(symbol, &response)
    }

    /// Requests the order history for the configured product type.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/trade/Get-Orders-History>
    pub async fn get_historical_orders(&self) -> Result<Value, BitgetHttpError> {
        let params = GetOrdersHistoryParams {
            product_type: self.product_type,
            ..Default::default()
        };
        self.get_historical_orders_with(&params).await
    }

    /// Requests the order history with explicit filters (symbol, time range, paging).
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    pub async fn get_historical_orders_with(
        &self,
        params: &GetOrdersHistoryParams,
    ) -> Result<Value, BitgetHttpError> {
        let query = to_query_string(params)?;
        self.send_request(Method::GET, PATH_ORDERS_HISTORY, &query, None, true)
            .await
    }

    /// Places a conditional (plan) order which opens a position once the mark price
    /// reaches `trigger_price`.
    ///
    /// `margin_mode` defaults to isolated and `order_type` to limit. A fresh client
    /// order ID is generated for every call.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/plan/Place-Plan-Order>
    #[allow(clippy::too_many_arguments)]
    pub async fn place_plan_order(
        &self,
        symbol: &str,
        size: &str,
        price: &str,
        trigger_price: &str,
        side: BitgetSide,
        margin_mode: Option<BitgetMarginMode>,
        order_type: Option<BitgetOrderType>,
    ) -> Result<Value, BitgetHttpError> {
        let params = PlacePlanOrderParamsBuilder::default()
            .symbol(self.futures_symbol(symbol))
            .product_type(self.product_type)
            .margin_mode(margin_mode.unwrap_or_default())
            .margin_coin(self.margin_coin.clone())
            .size(size)
            .price(price)
            .trigger_price(trigger_price)
            .side(side)
            .order_type(order_type.unwrap_or_default())
            .client_oid(generate_client_oid())
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        self.place_plan_order_with(&params).await
    }

    /// Places a plan order from fully specified parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    pub async fn place_plan_order_with(
        &self,
        params: &PlacePlanOrderParams,
    ) -> Result<Value, BitgetHttpError> {
        self.post_json(PATH_PLACE_PLAN_ORDER, params).await
    }

    /// Places an order which opens a position for `symbol`.
    ///
    /// `margin_mode` defaults to isolated and `order_type` to market; `price` is
    /// only sent for limit orders.
    ///
    /// # Errors
    ///
    /// Returns [`BitgetHttpError::ValidationError`] for a limit order without a
    /// price, or an error if credentials are missing or the request fails.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/trade/Place-Order>
    pub async fn place_order(
        &self,
        symbol: &str,
        size: &str,
        side: BitgetSide,
        margin_mode: Option<BitgetMarginMode>,
        order_type: Option<BitgetOrderType>,
        price: Option<&str>,
    ) -> Result<Value, BitgetHttpError> {
        let order_type = order_type.unwrap_or(BitgetOrderType::Market);
        let mut builder = PlaceOrderParamsBuilder::default();
        builder
            .symbol(self.futures_symbol(symbol))
            .product_type(self.product_type)
            .margin_mode(margin_mode.unwrap_or_default())
            .margin_coin(self.margin_coin.clone())
            .size(size)
            .side(side)
            .order_type(order_type)
            .client_oid(generate_client_oid());

        match (order_type, price) {
            (BitgetOrderType::Limit, None) => {
                return Err(BitgetHttpError::ValidationError(
                    "limit orders require a price".to_string(),
                ));
            }
            (BitgetOrderType::Limit, Some(price)) => {
                builder.price(price);
            }
            (BitgetOrderType::Market, _) => {}
        }

        let params = builder
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        self.place_order_with(&params).await
    }

    /// Places an order from fully specified parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    pub async fn place_order_with(&self, params: &PlaceOrderParams) -> Result<Value, BitgetHttpError> {
        self.post_json(PATH_PLACE_ORDER, params).await
    }

    /// Sets the leverage for `symbol` under the configured product type.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/account/Change-Leverage>
    pub async fn set_leverage(&self, symbol: &str, leverage: &str) -> Result<Value, BitgetHttpError> {
        let params = SetLeverageParamsBuilder::default()
            .symbol(self.futures_symbol(symbol))
            .product_type(self.product_type)
            .margin_coin(self.margin_coin.clone())
            .leverage(leverage)
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        self.post_json(PATH_SET_LEVERAGE, &params).await
    }

    /// Closes all positions for `symbol` at market.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails or the
    /// response is not JSON.
    ///
    /// # References
    ///
    /// <https://www.bitget.com/api-doc/contract/trade/Flash-Close-Position>
    pub async fn close_order(&self, symbol: &str) -> Result<Value, BitgetHttpError> {
        let params = ClosePositionsParamsBuilder::default()
            .symbol(self.futures_symbol(symbol))
            .product_type(self.product_type)
            .build()
            .map_err(|e| BitgetHttpError::ValidationError(e.to_string()))?;
        self.post_json(PATH_CLOSE_POSITIONS, &params).await
    }
}

/// Generates a client order ID (32 hex characters).
///
/// Random rather than time based, so orders placed within the same millisecond
/// never collide.
#[must_use]
pub fn generate_client_oid() -> String {
    Uuid::new_v4().simple().to_string()
}

fn log_exchange_reply(request_path: &str, status: StatusCode, value: &Value) {
    let code = value.get("code").and_then(Value::as_str);
    if status.is_success() && code.is_none_or(|c| c == BITGET_SUCCESS_CODE) {
        return;
    }

    let msg = value.get("msg").and_then(Value::as_str).unwrap_or_default();
    tracing::warn!(
        "Bitget {request_path} replied HTTP {status} code={} msg={msg}",
        code.unwrap_or("<none>")
    );
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
