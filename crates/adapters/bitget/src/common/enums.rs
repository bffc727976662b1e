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

//! Enumerations mapping Bitget futures API string values.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Represents the futures product line an endpoint operates on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum BitgetProductType {
    /// USDT margined perpetual futures.
    #[default]
    #[serde(rename = "USDT-FUTURES")]
    #[strum(serialize = "USDT-FUTURES", ascii_case_insensitive)]
    UsdtFutures,
    /// Coin margined futures.
    #[serde(rename = "COIN-FUTURES")]
    #[strum(serialize = "COIN-FUTURES", ascii_case_insensitive)]
    CoinFutures,
    /// USDC margined futures.
    #[serde(rename = "USDC-FUTURES")]
    #[strum(serialize = "USDC-FUTURES", ascii_case_insensitive)]
    UsdcFutures,
}

/// Represents how margin is allocated to a position.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BitgetMarginMode {
    /// Margin is ring-fenced per position.
    #[default]
    Isolated,
    /// Margin is shared across positions.
    Crossed,
}

/// Represents the side of an order.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BitgetSide {
    Buy,
    Sell,
}

/// Represents whether an order opens or closes a position (hedge mode).
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BitgetTradeSide {
    Open,
    Close,
}

/// Represents the execution type of an order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BitgetOrderType {
    #[default]
    Limit,
    Market,
}

/// Represents the kind of conditional (plan) order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BitgetPlanType {
    /// Triggers once the trigger price is reached.
    #[default]
    NormalPlan,
    /// Trailing stop.
    TrackPlan,
}

/// Represents the price source a plan order triggers on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BitgetTriggerType {
    /// Last fill price.
    FillPrice,
    /// Mark price.
    #[default]
    MarkPrice,
}

/// Represents the reduce-only flag, which Bitget encodes as `YES`/`NO`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BitgetReduceOnly {
    Yes,
    #[default]
    No,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
