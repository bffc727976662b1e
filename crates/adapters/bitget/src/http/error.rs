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

//! Error structures and enumerations for the Bitget HTTP client.
//!
//! Bitget reports failures through the `code`/`msg` pair of the response
//! envelope, see <https://www.bitget.com/api-doc/common/error-code/restapi>.

use reqwest::StatusCode;
use thiserror::Error;

/// A typed error enumeration for the Bitget HTTP client.
#[derive(Debug, Clone, Error)]
pub enum BitgetHttpError {
    /// Error variant when credentials are missing but the request is authenticated.
    #[error("Missing credentials for authenticated request")]
    MissingCredentials,
    /// The requested entity does not exist on the exchange (e.g. an unknown symbol).
    #[error("{0}")]
    NotFound(String),
    /// Failure during JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// Parameter validation error.
    #[error("Parameter validation error: {0}")]
    ValidationError(String),
    /// Transport level failure (connect, timeout, body read).
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Any unknown HTTP status or unexpected response from Bitget.
    #[error("Unexpected HTTP status code {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl BitgetHttpError {
    /// Returns the HTTP status this error should surface as at an HTTP boundary.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingCredentials => StatusCode::UNAUTHORIZED,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedStatus { status, .. } => *status,
            Self::JsonError(_) | Self::NetworkError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for BitgetHttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

// Allow use of the `?` operator on `serde_json` results inside the HTTP
// client implementation by converting them into our typed error.
impl From<serde_json::Error> for BitgetHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_not_found_maps_to_404() {
        let error = BitgetHttpError::NotFound("Symbol XYZ not found".to_string());
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Symbol XYZ not found");
    }

    #[rstest]
    fn test_network_error_maps_to_bad_gateway() {
        let error = BitgetHttpError::NetworkError("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[rstest]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: BitgetHttpError = json_err.into();
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[rstest]
    fn test_validation_error_maps_to_bad_request() {
        let error = BitgetHttpError::ValidationError("limit orders require a price".to_string());
        assert_eq!(
            error.to_string(),
            "Parameter validation error: limit orders require a price"
        );
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    fn test_unexpected_status_keeps_status() {
        let error = BitgetHttpError::UnexpectedStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "maintenance".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            error.to_string(),
            "Unexpected HTTP status code 503 Service Unavailable: maintenance"
        );
    }
}
