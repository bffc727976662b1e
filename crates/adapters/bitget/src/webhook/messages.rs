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

//! Request and response bodies of the signal webhook.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::common::{
    consts::WEBHOOK_DEFAULT_AMOUNT, enums::BitgetSide, parse::deserialize_string_or_number,
};

/// A trading signal as posted by an alerting service.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// Base coin or full futures symbol, e.g. `btc` or `BTCUSDT`.
    pub symbol: String,
    /// `buy`, `sell` or `close`. Any other present value, of any JSON type, is kept
    /// as text so it can be rejected as an invalid strategy.
    #[serde(deserialize_with = "deserialize_strategy")]
    pub strategy: String,
    /// Order size in base coin, a string or a number.
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<String>,
}

fn deserialize_strategy<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

impl WebhookPayload {
    /// Returns the order size, defaulting to `"1"` when the signal carries none.
    #[must_use]
    pub fn amount(&self) -> String {
        self.amount
            .clone()
            .unwrap_or_else(|| WEBHOOK_DEFAULT_AMOUNT.to_string())
    }
}

/// The actions a signal can request.
///
/// Matching is exact: `BUY` is not a valid strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum WebhookStrategy {
    Buy,
    Sell,
    Close,
}

impl WebhookStrategy {
    /// Returns the order side for strategies which open a position.
    #[must_use]
    pub fn open_side(self) -> Option<BitgetSide> {
        match self {
            Self::Buy => Some(BitgetSide::Buy),
            Self::Sell => Some(BitgetSide::Sell),
            Self::Close => None,
        }
    }
}

/// Body returned once the signal has been forwarded to the exchange.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookSuccess {
    pub status: String,
    pub strategy: String,
    pub symbol: String,
    pub amount: String,
}

impl WebhookSuccess {
    #[must_use]
    pub fn new(payload: &WebhookPayload, amount: String) -> Self {
        Self {
            status: "success".to_string(),
            strategy: payload.strategy.clone(),
            symbol: payload.symbol.clone(),
            amount,
        }
    }
}

/// Body returned when a signal is rejected or fails.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
