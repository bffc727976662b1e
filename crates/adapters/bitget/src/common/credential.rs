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

//! Bitget API credential storage and request signing helpers.

use std::fmt::Debug;

use aws_lc_rs::hmac;
use base64::prelude::*;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// Bitget API credentials for signing requests.
///
/// Requests are signed with HMAC SHA256 over the prehash string and the tag is
/// base64 encoded. Secrets are zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    #[zeroize(skip)]
    pub api_key: Ustr,
    pub api_passphrase: String,
    api_secret: Box<[u8]>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.api_key)
            .field("api_passphrase", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credential {
    /// Creates a new [`Credential`] instance.
    #[must_use]
    pub fn new(api_key: String, api_secret: String, api_passphrase: String) -> Self {
        Self {
            api_key: api_key.into(),
            api_passphrase,
            api_secret: api_secret.into_bytes().into_boxed_slice(),
        }
    }

    /// Builds the prehash string `timestamp + method + path [+ "?" + query] + body`.
    ///
    /// The `?` separator is only added for a non-empty query string.
    #[must_use]
    pub fn prehash(
        timestamp: &str,
        method: &str,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> String {
        let mut message = String::with_capacity(
            timestamp.len()
                + method.len()
                + request_path.len()
                + query_string.len()
                + body.len()
                + 1,
        );
        message.push_str(timestamp);
        message.push_str(method);
        message.push_str(request_path);
        if !query_string.is_empty() {
            message.push('?');
            message.push_str(query_string);
        }
        message.push_str(body);
        message
    }

    /// Signs a request according to the Bitget authentication scheme.
    ///
    /// `method` must be upper case and `query_string` must be the exact
    /// (canonical) string appended to the request URL.
    #[must_use]
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> String {
        let message = Self::prehash(timestamp, method, request_path, query_string, body);
        self.sign_message(&message)
    }

    /// Returns the base64 encoded HMAC SHA256 tag of `message`.
    #[must_use]
    pub fn sign_message(&self, message: &str) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, &self.api_secret[..]);
        let tag = hmac::sign(&key, message.as_bytes());
        BASE64_STANDARD.encode(tag.as_ref())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const API_KEY: &str = "bg_7f3c1a2b9d8e4f60";
    const API_SECRET: &str = "test_secret";
    const API_PASSPHRASE: &str = "Pa55phr4se";
    const TIMESTAMP: &str = "1700000000000";

    fn credential() -> Credential {
        Credential::new(
            API_KEY.to_string(),
            API_SECRET.to_string(),
            API_PASSPHRASE.to_string(),
        )
    }

    #[rstest]
    fn test_prehash_with_query() {
        let message = Credential::prehash(
            TIMESTAMP,
            "GET",
            "/api/v2/mix/position/all-position",
            "marginCoin=USDT&productType=USDT-FUTURES",
            "",
        );
        assert_eq!(
            message,
            "1700000000000GET/api/v2/mix/position/all-position?marginCoin=USDT&productType=USDT-FUTURES"
        );
    }

    #[rstest]
    fn test_prehash_without_query_omits_separator() {
        let message = Credential::prehash(
            TIMESTAMP,
            "POST",
            "/api/v2/mix/order/close-positions",
            "",
            r#"{"symbol":"BTCUSDT"}"#,
        );
        assert_eq!(
            message,
            r#"1700000000000POST/api/v2/mix/order/close-positions{"symbol":"BTCUSDT"}"#
        );
    }

    #[rstest]
    fn test_signed_get_matches_reference() {
        let signature = credential().sign(
            TIMESTAMP,
            "GET",
            "/api/v2/mix/position/all-position",
            "marginCoin=USDT&productType=USDT-FUTURES",
            "",
        );
        assert_eq!(signature, "P8vrUdWMm/WRBBFJfWGKoF5bV91jORykcp/O+OU/qpw=");
    }

    #[rstest]
    fn test_signed_post_matches_reference() {
        let signature = credential().sign(
            TIMESTAMP,
            "POST",
            "/api/v2/mix/order/close-positions",
            "",
            r#"{"symbol":"BTCUSDT","productType":"USDT-FUTURES"}"#,
        );
        assert_eq!(signature, "xg/QXJikA7ITEeY93V2/JsRZUFgxHIPMuPpqmgFx+tg=");
    }

    #[rstest]
    fn test_sign_is_deterministic_for_fixed_timestamp() {
        let credential = credential();
        let path = "/api/v2/mix/order/orders-history";
        let query = "productType=USDT-FUTURES";

        let first = credential.sign(TIMESTAMP, "GET", path, query, "");
        let second = credential.sign(TIMESTAMP, "GET", path, query, "");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("POST", "/api/v2/mix/order/orders-history", "productType=USDT-FUTURES", "")]
    #[case("GET", "/api/v2/mix/order/orders-pending", "productType=USDT-FUTURES", "")]
    #[case("GET", "/api/v2/mix/order/orders-history", "productType=COIN-FUTURES", "")]
    #[case("GET", "/api/v2/mix/order/orders-history", "productType=USDT-FUTURES", "{}")]
    #[case("GET", "/api/v2/mix/order/orders-history", "", "")]
    fn test_changing_any_component_changes_signature(
        #[case] method: &str,
        #[case] path: &str,
        #[case] query: &str,
        #[case] body: &str,
    ) {
        let credential = credential();
        let baseline = credential.sign(
            TIMESTAMP,
            "GET",
            "/api/v2/mix/order/orders-history",
            "productType=USDT-FUTURES",
            "",
        );
        let changed = credential.sign(TIMESTAMP, method, path, query, body);
        assert_ne!(baseline, changed);
    }

    #[rstest]
    fn test_changing_secret_changes_signature() {
        let other = Credential::new(
            API_KEY.to_string(),
            "another_secret".to_string(),
            API_PASSPHRASE.to_string(),
        );
        let path = "/api/v2/mix/order/orders-history";
        let query = "productType=USDT-FUTURES";

        assert_ne!(
            credential().sign(TIMESTAMP, "GET", path, query, ""),
            other.sign(TIMESTAMP, "GET", path, query, ""),
        );
    }

    #[rstest]
    fn test_changing_timestamp_changes_signature() {
        let credential = credential();
        let path = "/api/v2/mix/order/orders-history";

        assert_ne!(
            credential.sign(TIMESTAMP, "GET", path, "", ""),
            credential.sign("1700000000001", "GET", path, "", ""),
        );
    }

    #[rstest]
    fn test_signature_is_valid_base64() {
        let signature = credential().sign(TIMESTAMP, "GET", "/api/v2/mix/market/ticker", "", "");
        let decoded = BASE64_STANDARD.decode(&signature).unwrap();
        assert_eq!(decoded.len(), 32);
    }

    #[rstest]
    fn test_debug_redacts_secrets() {
        let dbg_out = format!("{:?}", credential());
        assert!(dbg_out.contains(API_KEY));
        assert!(dbg_out.contains("api_secret: \"<redacted>\""));
        assert!(!dbg_out.contains(API_SECRET));
        assert!(!dbg_out.contains(API_PASSPHRASE));
    }
}
