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

use std::{net::IpAddr, sync::Arc};

use clap::Parser;
use nautilus_bitget::{
    BitgetHttpClient, BitgetWebhookConfig,
    common::consts::{WEBHOOK_DEFAULT_HOST, WEBHOOK_DEFAULT_PORT},
    webhook::server::serve,
};
use tracing_subscriber::EnvFilter;

/// Runs the Bitget trading signal webhook.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "BITGET_WEBHOOK_HOST", default_value = WEBHOOK_DEFAULT_HOST)]
    host: IpAddr,
    /// Port to listen on.
    #[arg(long, env = "BITGET_WEBHOOK_PORT", default_value_t = WEBHOOK_DEFAULT_PORT)]
    port: u16,
    /// Leave the error cause chain out of failure responses.
    #[arg(long)]
    hide_error_detail: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = BitgetWebhookConfig {
        host: args.host,
        port: args.port,
        expose_error_detail: !args.hide_error_detail,
    };

    let client = BitgetHttpClient::from_env()?;
    tracing::info!("Forwarding signals to {}", client.base_url());

    serve(config, Arc::new(client)).await
}
