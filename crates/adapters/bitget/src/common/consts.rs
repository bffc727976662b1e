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

//! Core constants shared across the Bitget adapter components.

pub const BITGET_HTTP_URL: &str = "https://api.bitget.com";

/// Response code returned by Bitget for a successful request.
pub const BITGET_SUCCESS_CODE: &str = "00000";

pub const BITGET_DEFAULT_MARGIN_COIN: &str = "USDT";
pub const BITGET_DEFAULT_LOCALE: &str = "en-US";

pub const HEADER_ACCESS_KEY: &str = "ACCESS-KEY";
pub const HEADER_ACCESS_SIGN: &str = "ACCESS-SIGN";
pub const HEADER_ACCESS_PASSPHRASE: &str = "ACCESS-PASSPHRASE";
pub const HEADER_ACCESS_TIMESTAMP: &str = "ACCESS-TIMESTAMP";
pub const HEADER_LOCALE: &str = "locale";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const ENV_API_KEY: &str = "BITGET_API_KEY";
pub const ENV_API_SECRET: &str = "BITGET_API_SECRET";
pub const ENV_API_PASSPHRASE: &str = "BITGET_PASSPHRASE";
pub const ENV_BASE_URL: &str = "BITGET_BASE_URL";

pub const WEBHOOK_DEFAULT_HOST: &str = "0.0.0.0";
pub const WEBHOOK_DEFAULT_PORT: u16 = 5002;

/// Order size used by the webhook when a signal carries no `amount`.
pub const WEBHOOK_DEFAULT_AMOUNT: &str = "1";

pub const BITGET_USER_AGENT: &str = concat!("nautilus-bitget/", env!("CARGO_PKG_VERSION"));
