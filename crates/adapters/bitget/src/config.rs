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

//! Configuration structures for the Bitget adapter.

use std::net::{IpAddr, SocketAddr};

use crate::common::{
    consts::{
        BITGET_DEFAULT_LOCALE, BITGET_DEFAULT_MARGIN_COIN, BITGET_HTTP_URL, ENV_API_KEY,
        ENV_API_PASSPHRASE, ENV_API_SECRET, ENV_BASE_URL, WEBHOOK_DEFAULT_HOST,
        WEBHOOK_DEFAULT_PORT,
    },
    credential::Credential,
    enums::BitgetProductType,
};

/// Returns the environment variable for the given `key`.
///
/// # Errors
///
/// Returns an error if the environment variable is not set.
pub fn get_env_var(key: &str) -> anyhow::Result<String> {
    match std::env::var(key) {
        Ok(var) => Ok(var),
        Err(_) => anyhow::bail!("environment variable '{key}' must be set"),
    }
}

/// Configuration for the Bitget HTTP client.
#[derive(Clone)]
pub struct BitgetHttpClientConfig {
    /// API key for authenticated endpoints.
    pub api_key: Option<String>,
    /// API secret used to sign requests.
    pub api_secret: Option<String>,
    /// Passphrase chosen when the API key was created.
    pub api_passphrase: Option<String>,
    /// Override for the REST base URL.
    pub base_url: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Product line used by position and order endpoints.
    pub product_type: BitgetProductType,
    /// Margin coin, also the quote suffix of futures symbols.
    pub margin_coin: String,
    /// Value of the `locale` header.
    pub locale: String,
}

impl std::fmt::Debug for BitgetHttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BitgetHttpClientConfig))
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field(
                "api_passphrase",
                &self.api_passphrase.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("product_type", &self.product_type)
            .field("margin_coin", &self.margin_coin)
            .field("locale", &self.locale)
            .finish()
    }
}

impl Default for BitgetHttpClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            api_passphrase: None,
            base_url: None,
            timeout_secs: Some(60),
            product_type: BitgetProductType::UsdtFutures,
            margin_coin: BITGET_DEFAULT_MARGIN_COIN.to_string(),
            locale: BITGET_DEFAULT_LOCALE.to_string(),
        }
    }
}

impl BitgetHttpClientConfig {
    /// Creates a new configuration with default settings and no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with the given credentials.
    #[must_use]
    pub fn with_credentials(api_key: String, api_secret: String, api_passphrase: String) -> Self {
        Self {
            api_key: Some(api_key),
            api_secret: Some(api_secret),
            api_passphrase: Some(api_passphrase),
            ..Self::default()
        }
    }

    /// Creates a configuration with credentials read from the environment.
    ///
    /// Reads `BITGET_API_KEY`, `BITGET_API_SECRET` and `BITGET_PASSPHRASE`, and
    /// optionally `BITGET_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the credential variables is not set.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = get_env_var(ENV_API_KEY)?;
        let api_secret = get_env_var(ENV_API_SECRET)?;
        let api_passphrase = get_env_var(ENV_API_PASSPHRASE)?;

        Ok(Self {
            base_url: std::env::var(ENV_BASE_URL).ok(),
            ..Self::with_credentials(api_key, api_secret, api_passphrase)
        })
    }

    /// Sets the REST base URL override.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Returns `true` when key, secret and passphrase are all populated.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some() && self.api_passphrase.is_some()
    }

    /// Returns the [`Credential`] for signing, if fully configured.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        match (&self.api_key, &self.api_secret, &self.api_passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Some(Credential::new(
                key.clone(),
                secret.clone(),
                passphrase.clone(),
            )),
            _ => None,
        }
    }

    /// Returns the REST base URL without a trailing slash.
    #[must_use]
    pub fn http_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(BITGET_HTTP_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Configuration for the signal webhook server.
#[derive(Clone, Debug)]
pub struct BitgetWebhookConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// When true, failure responses include the error cause chain.
    pub expose_error_detail: bool,
}

impl Default for BitgetWebhookConfig {
    fn default() -> Self {
        Self {
            host: WEBHOOK_DEFAULT_HOST
                .parse()
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: WEBHOOK_DEFAULT_PORT,
            expose_error_detail: true,
        }
    }
}

impl BitgetWebhookConfig {
    /// Returns the socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
