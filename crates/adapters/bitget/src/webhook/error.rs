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

//! Error type of the signal webhook and its HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::messages::WebhookErrorBody;

/// A failure while handling a signal.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signal names a strategy other than `buy`, `sell` or `close`.
    #[error("Invalid strategy")]
    InvalidStrategy(String),
    /// Any other failure: unreadable payload, missing fields or exchange call errors.
    #[error("{message}")]
    Internal {
        message: String,
        traceback: String,
    },
}

impl WebhookError {
    /// Wraps an error into [`WebhookError::Internal`], logging it.
    ///
    /// The traceback is the error's cause chain, left blank unless `expose_detail`.
    #[must_use]
    pub fn internal(error: &anyhow::Error, expose_detail: bool) -> Self {
        tracing::error!("Webhook failed: {error:?}");
        let traceback = if expose_detail {
            format!("{error:?}")
        } else {
            String::new()
        };
        Self::Internal {
            message: error.to_string(),
            traceback,
        }
    }

    /// Returns the HTTP status the error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidStrategy(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the JSON body the error is reported with.
    #[must_use]
    pub fn body(&self) -> WebhookErrorBody {
        match self {
            Self::InvalidStrategy(_) => WebhookErrorBody {
                error: self.to_string(),
                traceback: None,
            },
            Self::Internal { message, traceback } => WebhookErrorBody {
                error: message.clone(),
                traceback: Some(traceback.clone()),
            },
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
