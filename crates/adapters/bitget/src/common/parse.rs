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

//! Conversion functions and serde helpers for Bitget payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Returns the Bitget futures symbol for `symbol`, e.g. `btc` -> `BTCUSDT`.
///
/// The symbol is upper-cased and `margin_coin` is appended unless already present,
/// so both base coins and full symbols are accepted.
#[must_use]
pub fn futures_symbol(symbol: &str, margin_coin: &str) -> String {
    let symbol = symbol.trim().to_ascii_uppercase();
    let suffix = margin_coin.to_ascii_uppercase();
    if symbol.ends_with(&suffix) && symbol.len() > suffix.len() {
        symbol
    } else {
        format!("{symbol}{suffix}")
    }
}

/// Converts a millisecond UNIX timestamp into a UTC datetime.
#[must_use]
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Deserializes an empty string into [`None`].
///
/// # Errors
///
/// Returns an error if the JSON value cannot be deserialized into a string.
pub fn deserialize_empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// Deserializes a JSON string or number into an optional [`String`].
///
/// Signal senders are inconsistent about quoting amounts, so `"0.5"` and `0.5`
/// are both accepted. `null` and empty strings become [`None`].
///
/// # Errors
///
/// Returns an error if the value is neither a string, a number nor null.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s).filter(|s| !s.is_empty())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, was {other}"
        ))),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
