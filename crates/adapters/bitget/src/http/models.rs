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

//! Data transfer objects for deserializing Bitget HTTP API payloads.
//!
//! Bitget payloads are wide and change often, so only the fields this crate
//! consumes are modeled and all of them are optional.

use serde::{Deserialize, Serialize};

use crate::common::{
    consts::BITGET_SUCCESS_CODE,
    parse::{deserialize_empty_string_as_none, deserialize_string_or_number},
};

/// Represents the envelope every Bitget REST response is wrapped in.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetResponse<T> {
    /// The Bitget response code, which is `"00000"` for success.
    pub code: String,
    /// A message string which can be informational or describe an error cause.
    #[serde(default)]
    pub msg: String,
    /// Server time the request was handled at (milliseconds).
    #[serde(default)]
    pub request_time: Option<i64>,
    /// The endpoint payload, `null` on most errors.
    pub data: Option<T>,
}

impl<T> BitgetResponse<T> {
    /// Returns `true` if the response carries the success code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == BITGET_SUCCESS_CODE
    }
}

/// Represents a ticker from the GET /api/v2/mix/market/ticker endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetTicker {
    /// Symbol, e.g. `BTCUSDT`.
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    pub symbol: Option<String>,
    /// Last traded price.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub last_pr: Option<String>,
    /// Index price.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub index_price: Option<String>,
    /// Mark price.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub mark_price: Option<String>,
    /// Current funding rate.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub funding_rate: Option<String>,
    /// Ticker timestamp in milliseconds.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub ts: Option<String>,
}

/// Represents one order from the GET /api/v2/mix/order/orders-history endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetHistoricalOrder {
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub size: Option<String>,
    /// Average fill price.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub price_avg: Option<String>,
    /// Filled value in the quote coin.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub quote_volume: Option<String>,
    /// Realized profit and loss of the order.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub total_profits: Option<String>,
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    pub side: Option<String>,
    /// `open` or `close`, absent for one-way position mode.
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    pub trade_side: Option<String>,
    /// Creation time in milliseconds.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub c_time: Option<String>,
    /// Last update time in milliseconds.
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub u_time: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
