// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Freedompro client library.
//!
//! This module provides the error hierarchy for failures across the
//! library: API communication, response parsing, and coordinator refresh.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the Freedompro cloud API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error occurred while parsing an API response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// No device with the requested uid is known to the coordinator.
    #[error("unknown device: {0}")]
    UnknownDevice(String),
}

/// Errors related to communication with the Freedompro cloud API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The API answered with a non-success status.
    #[error("service error: HTTP {status} - {reason}")]
    Service {
        /// HTTP status code returned by the API.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },
}

/// Errors related to parsing Freedompro API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
