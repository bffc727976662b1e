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

//! Functions translating raw Bitget HTTP responses into typed values and display tables.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use super::{
    error::BitgetHttpError,
    models::{BitgetHistoricalOrder, BitgetResponse, BitgetTicker},
};
use crate::common::parse::millis_to_datetime;

const TRADE_SIDE_OPEN: &str = "open";
const TRADE_SIDE_CLOSE: &str = "close";

/// Extracts the index price of the first ticker in a ticker response.
///
/// # Errors
///
/// Returns [`BitgetHttpError::NotFound`] if `data` is missing, null or empty, or if
/// its first element has no `indexPrice`. Returns [`BitgetHttpError::JsonError`] if
/// the index price is not a decimal.
pub fn parse_index_price(symbol: &str, response: &Value) -> Result<Decimal, BitgetHttpError> {
    let not_found = || BitgetHttpError::NotFound(format!("Symbol {symbol} not found"));

    let Ok(envelope) = serde_json::from_value::<BitgetResponse<Vec<BitgetTicker>>>(response.clone())
    else {
        return Err(not_found());
    };

    if !envelope.is_success() {
        tracing::warn!(
            "Ticker request for {symbol} failed: code={} msg={}",
            envelope.code,
            envelope.msg
        );
    }

    let index_price = envelope
        .data
        .and_then(|tickers| tickers.into_iter().next())
        .and_then(|ticker| ticker.index_price)
        .ok_or_else(not_found)?;

    Decimal::from_str(index_price.trim()).map_err(|e| {
        BitgetHttpError::JsonError(format!("invalid indexPrice '{index_price}': {e}"))
    })
}

/// One row of the historical orders table.
///
/// Entry fields are populated for opening orders and exit fields for closing
/// orders; everything else is absent rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderHistoryRow {
    pub futures: Option<String>,
    pub open_time: Option<DateTime<Utc>>,
    pub avg_entry_price: Option<String>,
    pub avg_exit_price: Option<String>,
    pub closed_quantity: Option<String>,
    pub closed_value: Option<String>,
    pub position_pnl: f64,
    pub closed_time: Option<DateTime<Utc>>,
}

impl From<BitgetHistoricalOrder> for OrderHistoryRow {
    fn from(order: BitgetHistoricalOrder) -> Self {
        let trade_side = order.trade_side.as_deref();
        let is_open = trade_side == Some(TRADE_SIDE_OPEN);
        let is_close = trade_side == Some(TRADE_SIDE_CLOSE);

        let position_pnl = order
            .total_profits
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|pnl| pnl.is_finite())
            .unwrap_or(0.0);

        Self {
            futures: order.symbol,
            open_time: parse_millis(order.c_time.as_deref()),
            avg_entry_price: order.price_avg.clone().filter(|_| is_open),
            avg_exit_price: order.price_avg.filter(|_| is_close),
            closed_quantity: order.size.filter(|_| is_close),
            closed_value: order.quote_volume.filter(|_| is_close),
            position_pnl,
            closed_time: parse_millis(order.u_time.as_deref()),
        }
    }
}

fn parse_millis(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(millis_to_datetime)
}

/// Converts an orders history response into table rows.
///
/// Accepts the full response envelope (`data.entrustedList`), a `data` array or a
/// bare array of orders. Entries which are not order objects are skipped.
#[must_use]
pub fn parse_order_history_rows(response: &Value) -> Vec<OrderHistoryRow> {
    let Some(orders) = order_list(response) else {
        tracing::warn!("Orders history response contains no order list");
        return Vec::new();
    };

    orders
        .iter()
        .filter_map(|order| {
            match serde_json::from_value::<BitgetHistoricalOrder>(order.clone()) {
                Ok(order) => Some(OrderHistoryRow::from(order)),
                Err(e) => {
                    tracing::warn!("Skipping invalid historical order: {e}");
                    None
                }
            }
        })
        .collect()
}

fn order_list(response: &Value) -> Option<&Vec<Value>> {
    if let Some(orders) = response.as_array() {
        return Some(orders);
    }

    let data = response.get("data")?;
    match data {
        Value::Array(orders) => Some(orders),
        Value::Object(_) => data.get("entrustedList").and_then(Value::as_array),
        _ => None,
    }
}

/// Sums the position PnL over all rows.
#[must_use]
pub fn total_position_pnl(rows: &[OrderHistoryRow]) -> f64 {
    rows.iter().map(|row| row.position_pnl).sum()
}

#[derive(Tabled)]
struct OrderHistoryDisplay {
    #[tabled(rename = "Futures")]
    futures: String,
    #[tabled(rename = "Open time")]
    open_time: String,
    #[tabled(rename = "Avg. entry price")]
    avg_entry_price: String,
    #[tabled(rename = "Avg. exit price")]
    avg_exit_price: String,
    #[tabled(rename = "Closed quantity")]
    closed_quantity: String,
    #[tabled(rename = "Closed value")]
    closed_value: String,
    #[tabled(rename = "Position PnL")]
    position_pnl: String,
    #[tabled(rename = "Closed time")]
    closed_time: String,
}

fn display_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_default()
}

/// Returns a [`String`] representation of historical orders in a human-readable table format.
#[must_use]
pub fn pprint_order_history(rows: &[OrderHistoryRow]) -> String {
    let data: Vec<OrderHistoryDisplay> = rows
        .iter()
        .map(|row| OrderHistoryDisplay {
            futures: row.futures.clone().unwrap_or_default(),
            open_time: display_time(row.open_time),
            avg_entry_price: row.avg_entry_price.clone().unwrap_or_default(),
            avg_exit_price: row.avg_exit_price.clone().unwrap_or_default(),
            closed_quantity: row.closed_quantity.clone().unwrap_or_default(),
            closed_value: row.closed_value.clone().unwrap_or_default(),
            position_pnl: row.position_pnl.to_string(),
            closed_time: display_time(row.closed_time),
        })
        .collect();

    Table::new(data).with(Style::rounded()).to_string()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
