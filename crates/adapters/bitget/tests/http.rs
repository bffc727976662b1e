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

//! Integration tests for the Bitget HTTP client using a mock Axum server.

use std::{collections::HashMap, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use nautilus_bitget::{
    BitgetHttpClient, BitgetHttpClientConfig, BitgetHttpError, BitgetOrderType, BitgetSide,
    Credential,
    http::parse::parse_order_history_rows,
};
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tokio::sync::Mutex;

const API_KEY: &str = "test_key";
const API_SECRET: &str = "test_secret";
const API_PASSPHRASE: &str = "test_passphrase";

#[derive(Clone, Debug)]
struct RecordedRequest {
    method: Method,
    path: String,
    query: String,
    headers: HeaderMap,
    body: String,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Default)]
struct TestServerState {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl TestServerState {
    async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    async fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

fn manifest_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn load_test_data(filename: &str) -> Value {
    let path = manifest_path().join("test_data").join(filename);
    let content = std::fs::read_to_string(path).expect("failed to read test data");
    serde_json::from_str(&content).expect("failed to parse test data")
}

fn has_valid_signature(request: &RecordedRequest) -> bool {
    let (Some(timestamp), Some(signature)) = (
        request.header("ACCESS-TIMESTAMP"),
        request.header("ACCESS-SIGN"),
    ) else {
        return false;
    };

    if request.header("ACCESS-KEY") != Some(API_KEY)
        || request.header("ACCESS-PASSPHRASE") != Some(API_PASSPHRASE)
    {
        return false;
    }

    let credential = Credential::new(
        API_KEY.to_string(),
        API_SECRET.to_string(),
        API_PASSPHRASE.to_string(),
    );
    let expected = credential.sign(
        timestamp,
        request.method.as_str(),
        &request.path,
        &request.query,
        &request.body,
    );
    expected == signature
}

async fn record(
    state: &TestServerState,
    method: Method,
    uri: &Uri,
    headers: HeaderMap,
    body: String,
) -> RecordedRequest {
    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    };
    state.requests.lock().await.push(request.clone());
    request
}

async fn private_reply(
    state: Arc<TestServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
    fixture: &'static str,
) -> Response {
    let request = record(&state, method, &uri, headers, body).await;

    if !has_valid_signature(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "code": "40009",
                "msg": "sign signature error",
                "requestTime": 1700000000000_i64,
                "data": null,
            })),
        )
            .into_response();
    }

    Json(load_test_data(fixture)).into_response()
}

fn private_get(fixture: &'static str) -> axum::routing::MethodRouter<Arc<TestServerState>> {
    get(
        move |State(state): State<Arc<TestServerState>>,
              method: Method,
              uri: Uri,
              headers: HeaderMap,
              body: String| private_reply(state, method, uri, headers, body, fixture),
    )
}

fn private_post(fixture: &'static str) -> axum::routing::MethodRouter<Arc<TestServerState>> {
    post(
        move |State(state): State<Arc<TestServerState>>,
              method: Method,
              uri: Uri,
              headers: HeaderMap,
              body: String| private_reply(state, method, uri, headers, body, fixture),
    )
}

async fn ticker(
    State(state): State<Arc<TestServerState>>,
    Query(params): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    record(&state, method, &uri, headers, body).await;

    match params.get("symbol").map(String::as_str) {
        Some("BTCUSDT") => Json(load_test_data("http_get_ticker.json")).into_response(),
        Some("MAINTUSDT") => (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response(),
        _ => Json(load_test_data("http_get_ticker_empty.json")).into_response(),
    }
}

fn create_router(state: Arc<TestServerState>) -> Router {
    Router::new()
        .route(
            "/api/v2/mix/position/all-position",
            private_get("http_get_positions.json"),
        )
        .route(
            "/api/v2/mix/order/orders-history",
            private_get("http_get_orders_history.json"),
        )
        .route("/api/v2/mix/market/ticker", get(ticker))
        .route(
            "/api/v2/mix/order/place-plan-order",
            private_post("http_place_order.json"),
        )
        .route(
            "/api/v2/mix/order/place-order",
            private_post("http_place_order.json"),
        )
        .route(
            "/api/v2/mix/account/set-leverage",
            private_post("http_set_leverage.json"),
        )
        .route(
            "/api/v2/mix/order/close-positions",
            private_post("http_close_positions.json"),
        )
        .with_state(state)
}

async fn start_test_server(state: Arc<TestServerState>) -> SocketAddr {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test server");
    let addr = listener.local_addr().expect("missing local addr");

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("test server failed");
    });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    addr
}

fn create_client(addr: SocketAddr, api_secret: &str) -> BitgetHttpClient {
    let config = BitgetHttpClientConfig::with_credentials(
        API_KEY.to_string(),
        api_secret.to_string(),
        API_PASSPHRASE.to_string(),
    )
    .with_base_url(format!("http://{addr}"));
    BitgetHttpClient::new(&config).expect("failed to create http client")
}

async fn setup() -> (Arc<TestServerState>, BitgetHttpClient) {
    let state = Arc::new(TestServerState::default());
    let addr = start_test_server(state.clone()).await;
    (state, create_client(addr, API_SECRET))
}

#[rstest]
#[tokio::test]
async fn test_get_positions_signs_canonical_query() {
    let (state, client) = setup().await;

    let response = client.get_positions().await.unwrap();

    assert_eq!(response["code"], "00000");
    assert_eq!(response["data"][0]["symbol"], "BTCUSDT");

    let request = state.last_request().await;
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.query, "marginCoin=USDT&productType=USDT-FUTURES");
    assert_eq!(request.header("locale"), Some("en-US"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert!(has_valid_signature(&request));
}

#[rstest]
#[tokio::test]
async fn test_bad_signature_returns_exchange_error_body() {
    let state = Arc::new(TestServerState::default());
    let addr = start_test_server(state.clone()).await;
    let client = create_client(addr, "wrong_secret");

    let response = client.get_positions().await.unwrap();

    assert_eq!(response["code"], "40009");
    assert_eq!(response["msg"], "sign signature error");
    assert_eq!(state.requests().await.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_get_crypto_price_is_unsigned() {
    let (state, client) = setup().await;

    let price = client.get_crypto_price("btc").await.unwrap();

    assert_eq!(price, dec!(64981.7));
    let request = state.last_request().await;
    assert_eq!(request.query, "productType=USDT-FUTURES&symbol=BTCUSDT");
    assert!(request.header("ACCESS-SIGN").is_none());
    assert!(request.header("ACCESS-KEY").is_none());
}

#[rstest]
#[tokio::test]
async fn test_get_crypto_price_unknown_symbol_is_not_found() {
    let (_state, client) = setup().await;

    let err = client.get_crypto_price("xyz").await.unwrap_err();

    assert!(matches!(err, BitgetHttpError::NotFound(_)));
    assert_eq!(err.status_code().as_u16(), 404);
}

#[rstest]
#[tokio::test]
async fn test_non_json_error_body_is_unexpected_status() {
    let (_state, client) = setup().await;

    let err = client.get_crypto_price("maint").await.unwrap_err();

    match err {
        BitgetHttpError::UnexpectedStatus { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_private_call_without_credentials_sends_nothing() {
    let state = Arc::new(TestServerState::default());
    let addr = start_test_server(state.clone()).await;
    let config = BitgetHttpClientConfig::new().with_base_url(format!("http://{addr}"));
    let client = BitgetHttpClient::new(&config).unwrap();

    let err = client.close_order("btc").await.unwrap_err();

    assert!(matches!(err, BitgetHttpError::MissingCredentials));
    assert!(state.requests().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_get_historical_orders_into_rows() {
    let (state, client) = setup().await;

    let response = client.get_historical_orders().await.unwrap();
    let rows = parse_order_history_rows(&response);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].avg_exit_price.as_deref(), Some("66110.2"));
    assert_eq!(state.last_request().await.query, "productType=USDT-FUTURES");
}

#[rstest]
#[tokio::test]
async fn test_place_plan_order_body() {
    let (state, client) = setup().await;

    let response = client
        .place_plan_order("btc", "0.01", "24000", "24100", BitgetSide::Buy, None, None)
        .await
        .unwrap();

    assert_eq!(response["code"], "00000");

    let request = state.last_request().await;
    assert_eq!(request.method, Method::POST);
    assert!(request.query.is_empty());
    assert!(has_valid_signature(&request));

    let body = request.json_body();
    assert_eq!(body["symbol"], "BTCUSDT");
    assert_eq!(body["productType"], "USDT-FUTURES");
    assert_eq!(body["marginMode"], "isolated");
    assert_eq!(body["marginCoin"], "USDT");
    assert_eq!(body["planType"], "normal_plan");
    assert_eq!(body["triggerType"], "mark_price");
    assert_eq!(body["triggerPrice"], "24100");
    assert_eq!(body["price"], "24000");
    assert_eq!(body["size"], "0.01");
    assert_eq!(body["side"], "buy");
    assert_eq!(body["tradeSide"], "open");
    assert_eq!(body["orderType"], "limit");
    assert_eq!(body["reduceOnly"], "NO");
    assert_eq!(body["clientOid"].as_str().unwrap().len(), 32);
}

#[rstest]
#[tokio::test]
async fn test_consecutive_orders_use_distinct_client_oids() {
    let (state, client) = setup().await;

    for _ in 0..2 {
        client
            .place_plan_order("btc", "0.01", "24000", "24100", BitgetSide::Sell, None, None)
            .await
            .unwrap();
    }

    let requests = state.requests().await;
    assert_eq!(requests.len(), 2);
    assert_ne!(
        requests[0].json_body()["clientOid"],
        requests[1].json_body()["clientOid"]
    );
}

#[rstest]
#[tokio::test]
async fn test_place_market_order_body() {
    let (state, client) = setup().await;

    client
        .place_order("eth", "0.5", BitgetSide::Sell, None, None, None)
        .await
        .unwrap();

    let request = state.last_request().await;
    assert_eq!(request.path, "/api/v2/mix/order/place-order");
    let body = request.json_body();
    assert_eq!(body["symbol"], "ETHUSDT");
    assert_eq!(body["orderType"], "market");
    assert_eq!(body["tradeSide"], "open");
    assert_eq!(body["side"], "sell");
    assert!(body.get("price").is_none());
}

#[rstest]
#[tokio::test]
async fn test_place_limit_order_without_price_sends_nothing() {
    let (state, client) = setup().await;

    let err = client
        .place_order(
            "eth",
            "0.5",
            BitgetSide::Buy,
            None,
            Some(BitgetOrderType::Limit),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BitgetHttpError::ValidationError(_)));
    assert!(state.requests().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_set_leverage_sends_json_body() {
    let (state, client) = setup().await;

    let response = client.set_leverage("BTCUSDT", "10").await.unwrap();

    assert_eq!(response["data"]["longLeverage"], "10");
    let request = state.last_request().await;
    assert!(request.query.is_empty());
    assert_eq!(
        request.body,
        r#"{"symbol":"BTCUSDT","productType":"USDT-FUTURES","marginCoin":"USDT","leverage":"10"}"#
    );
    assert!(has_valid_signature(&request));
}

#[rstest]
#[tokio::test]
async fn test_close_order_body() {
    let (state, client) = setup().await;

    let response = client.close_order("btc").await.unwrap();

    assert_eq!(response["code"], "00000");
    let request = state.last_request().await;
    assert_eq!(request.path, "/api/v2/mix/order/close-positions");
    assert_eq!(
        request.body,
        r#"{"symbol":"BTCUSDT","productType":"USDT-FUTURES"}"#
    );
    assert!(has_valid_signature(&request));
}

#[rstest]
#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = create_client(addr, API_SECRET);
    let err = client.get_positions().await.unwrap_err();

    assert!(matches!(err, BitgetHttpError::NetworkError(_)));
}
