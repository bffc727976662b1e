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

//! Adapter for the [Bitget](https://www.bitget.com) cryptocurrency exchange futures API.
//!
//! The `nautilus-bitget` crate provides a signing HTTP client for the USDT-margined
//! futures endpoints of the **Bitget v2 mix API**, a small webhook server which turns
//! external trading signals into orders, and a tabular view of historical orders.
//!
//! The official Bitget API reference can be found at <https://www.bitget.com/api-doc/contract/intro>.
//!
//! # Binaries
//!
//! - `bitget-http-private`: requests historical orders and prints them as a table.
//! - `bitget-webhook`: runs the signal webhook (`POST /webhook`).

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod http;
pub mod webhook;

// Re-exports
pub use crate::{
    common::{
        credential::Credential,
        enums::{BitgetMarginMode, BitgetOrderType, BitgetProductType, BitgetSide},
    },
    config::{BitgetHttpClientConfig, BitgetWebhookConfig},
    http::{client::BitgetHttpClient, error::BitgetHttpError},
    webhook::server::{SignalExecutor, webhook_router},
};
