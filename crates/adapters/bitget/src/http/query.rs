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

//! Builder types for Bitget REST query parameters and request bodies.
//!
//! Query strings are canonicalized by [`canonical_query_string`]: `key=value` pairs
//! sorted by key and joined with `&`, **without** URL encoding. The same string is
//! both signed and appended to the request URL, otherwise Bitget rejects the signature.

use std::collections::BTreeMap;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::BitgetHttpError;
use crate::common::enums::{
    BitgetMarginMode, BitgetOrderType, BitgetPlanType, BitgetProductType, BitgetReduceOnly,
    BitgetSide, BitgetTradeSide, BitgetTriggerType,
};

/// Joins `params` into the canonical `k1=v1&k2=v2` form, sorted by key.
///
/// Insertion order is irrelevant and values are not URL encoded. A repeated key
/// keeps its last value.
pub fn canonical_query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Serializes a parameter struct into its canonical query string.
///
/// `None` fields are skipped; numbers and booleans are rendered with `to_string`.
///
/// # Errors
///
/// Returns an error if `params` does not serialize into a flat JSON object.
pub fn to_query_string<S: Serialize>(params: &S) -> Result<String, BitgetHttpError> {
    let value = serde_json::to_value(params)?;
    let Value::Object(map) = value else {
        return Err(BitgetHttpError::ValidationError(
            "query parameters must serialize to an object".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(BitgetHttpError::ValidationError(format!(
                    "query parameter '{key}' is not a scalar: {other}"
                )));
            }
        };
        pairs.push((key, value));
    }

    Ok(canonical_query_string(pairs))
}

/// Query parameters for `GET /api/v2/mix/position/all-position`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/position/get-all-position>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GetPositionsParams {
    pub product_type: BitgetProductType,
    pub margin_coin: String,
}

/// Query parameters for `GET /api/v2/mix/market/ticker`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/market/Get-Ticker>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GetTickerParams {
    pub product_type: BitgetProductType,
    pub symbol: String,
}

/// Query parameters for `GET /api/v2/mix/order/orders-history`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/trade/Get-Orders-History>
#[derive(Clone, Debug, Default, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
#[builder(setter(into))]
pub struct GetOrdersHistoryParams {
    pub product_type: BitgetProductType,
    #[builder(setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[builder(setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[builder(setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Pagination cursor, the `endId` of the previous page.
    #[builder(setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_less_than: Option<String>,
    #[builder(setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body parameters for `POST /api/v2/mix/order/place-plan-order`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/plan/Place-Plan-Order>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct PlacePlanOrderParams {
    #[builder(default)]
    pub plan_type: BitgetPlanType,
    pub symbol: String,
    #[builder(default)]
    pub product_type: BitgetProductType,
    #[builder(default)]
    pub margin_mode: BitgetMarginMode,
    pub margin_coin: String,
    pub size: String,
    pub price: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_ratio: Option<String>,
    pub trigger_price: String,
    #[builder(default)]
    pub trigger_type: BitgetTriggerType,
    pub side: BitgetSide,
    #[builder(default = "BitgetTradeSide::Open")]
    pub trade_side: BitgetTradeSide,
    #[builder(default)]
    pub order_type: BitgetOrderType,
    pub client_oid: String,
    #[builder(default)]
    pub reduce_only: BitgetReduceOnly,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_stop_surplus_price: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_surplus_trigger_price: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_surplus_trigger_type: Option<BitgetTriggerType>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_stop_loss_price: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_trigger_price: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_trigger_type: Option<BitgetTriggerType>,
}

/// Body parameters for `POST /api/v2/mix/order/place-order`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/trade/Place-Order>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct PlaceOrderParams {
    pub symbol: String,
    #[builder(default)]
    pub product_type: BitgetProductType,
    #[builder(default)]
    pub margin_mode: BitgetMarginMode,
    pub margin_coin: String,
    pub size: String,
    /// Required for limit orders only.
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub side: BitgetSide,
    #[builder(default = "Some(BitgetTradeSide::Open)", setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_side: Option<BitgetTradeSide>,
    #[builder(default = "BitgetOrderType::Market")]
    pub order_type: BitgetOrderType,
    pub client_oid: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<BitgetReduceOnly>,
}

/// Body parameters for `POST /api/v2/mix/account/set-leverage`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/account/Change-Leverage>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct SetLeverageParams {
    pub symbol: String,
    #[builder(default)]
    pub product_type: BitgetProductType,
    pub margin_coin: String,
    pub leverage: String,
}

/// Body parameters for `POST /api/v2/mix/order/close-positions`.
///
/// # References
/// - <https://www.bitget.com/api-doc/contract/trade/Flash-Close-Position>
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ClosePositionsParams {
    pub symbol: String,
    #[builder(default)]
    pub product_type: BitgetProductType,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
