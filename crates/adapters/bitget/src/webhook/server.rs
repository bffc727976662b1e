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

//! HTTP server dispatching webhook signals to a [`SignalExecutor`].

use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde_json::Value;

use super::{
    error::WebhookError,
    messages::{WebhookPayload, WebhookStrategy, WebhookSuccess},
};
use crate::{
    common::{
        consts::BITGET_SUCCESS_CODE,
        enums::{BitgetOrderType, BitgetSide},
    },
    config::BitgetWebhookConfig,
    http::client::BitgetHttpClient,
};

/// Executes the exchange side of a trading signal.
///
/// Implementations return the exchange's raw reply. An `Err` means the exchange
/// could not be reached or answered with something other than JSON.
#[async_trait::async_trait]
pub trait SignalExecutor: Send + Sync {
    /// Opens (or adds to) a position in `symbol` of size `amount` at market.
    async fn open_position(
        &self,
        symbol: &str,
        amount: &str,
        side: BitgetSide,
    ) -> anyhow::Result<Value>;

    /// Closes all positions in `symbol`.
    async fn close_position(&self, symbol: &str) -> anyhow::Result<Value>;
}

#[async_trait::async_trait]
impl SignalExecutor for BitgetHttpClient {
    async fn open_position(
        &self,
        symbol: &str,
        amount: &str,
        side: BitgetSide,
    ) -> anyhow::Result<Value> {
        let response = self
            .place_order(
                symbol,
                amount,
                side,
                None,
                Some(BitgetOrderType::Market),
                None,
            )
            .await
            .with_context(|| format!("Failed to open {side} position for {symbol}"))?;
        Ok(response)
    }

    async fn close_position(&self, symbol: &str) -> anyhow::Result<Value> {
        let response = self
            .close_order(symbol)
            .await
            .with_context(|| format!("Failed to close position for {symbol}"))?;
        Ok(response)
    }
}

#[derive(Clone)]
struct WebhookState {
    executor: Arc<dyn SignalExecutor>,
    expose_error_detail: bool,
}

/// Builds the webhook router: `POST /webhook` and `GET /health`.
pub fn webhook_router(executor: Arc<dyn SignalExecutor>, config: &BitgetWebhookConfig) -> Router {
    let state = WebhookState {
        executor,
        expose_error_detail: config.expose_error_detail,
    };

    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `config.socket_addr()` and serves the webhook until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(
    config: BitgetWebhookConfig,
    executor: Arc<dyn SignalExecutor>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind webhook server to {addr}"))?;
    tracing::info!("Webhook server listening on {addr}");

    axum::serve(listener, webhook_router(executor, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
    tracing::info!("Shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_webhook(
    State(state): State<WebhookState>,
    body: Bytes,
) -> Result<Json<WebhookSuccess>, WebhookError> {
    dispatch(state.executor.as_ref(), &body, state.expose_error_detail)
        .await
        .map(Json)
}

/// Parses a signal and forwards it to `executor`.
///
/// The request is run to completion: the exchange call is awaited before the
/// response is produced. The exchange reply itself does not change the outcome,
/// a non-success code is only logged.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidStrategy`] for an unknown strategy (nothing is
/// sent to the exchange), and [`WebhookError::Internal`] for an unreadable payload
/// or a failed exchange call.
pub async fn dispatch(
    executor: &dyn SignalExecutor,
    body: &[u8],
    expose_error_detail: bool,
) -> Result<WebhookSuccess, WebhookError> {
    let payload: WebhookPayload = serde_json::from_slice(body)
        .context("Invalid webhook payload")
        .map_err(|e| WebhookError::internal(&e, expose_error_detail))?;
    let amount = payload.amount();

    tracing::info!(
        "Received signal strategy={} symbol={} amount={amount}",
        payload.strategy,
        payload.symbol,
    );

    let strategy = match WebhookStrategy::from_str(&payload.strategy) {
        Ok(strategy) => strategy,
        Err(_) => {
            tracing::warn!("Rejected signal with invalid strategy '{}'", payload.strategy);
            return Err(WebhookError::InvalidStrategy(payload.strategy));
        }
    };

    let result = match strategy.open_side() {
        Some(side) => executor.open_position(&payload.symbol, &amount, side).await,
        None => executor.close_position(&payload.symbol).await,
    };
    let response = result.map_err(|e| WebhookError::internal(&e, expose_error_detail))?;

    let code = response.get("code").and_then(Value::as_str);
    if code == Some(BITGET_SUCCESS_CODE) {
        tracing::info!("Signal {strategy} for {} accepted", payload.symbol);
    } else {
        let code = code.unwrap_or("<none>");
        let msg = response
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default();
        tracing::warn!(
            "Signal {strategy} for {} not accepted by exchange: code={code} msg={msg}",
            payload.symbol,
        );
    }

    Ok(WebhookSuccess::new(&payload, amount))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
