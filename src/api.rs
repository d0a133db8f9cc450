// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Freedompro cloud API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::device::Device;
use crate::error::{ApiError, ParseError, Result};
use crate::state::{StatePatch, StateSnapshot};

// ============================================================================
// ApiConfig - Configuration for the Freedompro API client
// ============================================================================

/// Configuration for the Freedompro API client.
///
/// Holds the API key issued by Freedompro and optional overrides for the
/// base URL and request timeout.
///
/// # Examples
///
/// ```
/// use freedompro::ApiConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = ApiConfig::new("my-api-key");
///
/// // With all options
/// let config = ApiConfig::new("my-api-key")
///     .with_base_url("https://api.example.test/api/freedompro")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Default base URL of the Freedompro cloud API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.freedompro.eu/api/freedompro";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL. A trailing slash is stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`ApiClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<ApiClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url,
            api_key: self.api_key,
            client,
        })
    }
}

// ============================================================================
// ApiClient - Freedompro cloud API client
// ============================================================================

/// Client for the Freedompro cloud API.
///
/// All requests are authenticated with a Bearer token (the API key) and
/// exchange JSON. The client is cheap to clone; clones share the same
/// connection pool.
///
/// # Examples
///
/// ```no_run
/// use freedompro::ApiClient;
///
/// # async fn example() -> freedompro::Result<()> {
/// let client = ApiClient::new("my-api-key")?;
/// let devices = client.get_devices().await?;
/// for device in &devices {
///     println!("{} ({})", device.name, device.kind);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ApiClient {
    /// Creates a new client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ApiConfig::new(api_key).into_client()
    }

    /// Returns the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the account's accessory listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API key is rejected,
    /// the API reports a non-success status, or the body cannot be parsed.
    pub async fn get_devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/accessories", self.base_url);
        self.get_json(&url).await
    }

    /// Fetches the current state of every accessory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API key is rejected,
    /// the API reports a non-success status, or the body cannot be parsed.
    pub async fn get_states(&self) -> Result<Vec<StateSnapshot>> {
        let url = format!("{}/accessories/state", self.base_url);
        self.get_json(&url).await
    }

    /// Sends a partial state change for one accessory.
    ///
    /// Only the fields set on the patch are transmitted; the accessory
    /// keeps its other characteristics unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API key is rejected,
    /// or the API reports a non-success status.
    pub async fn put_state(&self, uid: &str, patch: &StatePatch) -> Result<()> {
        let url = format!(
            "{}/accessories/{}/state",
            self.base_url,
            urlencoding::encode(uid)
        );

        tracing::debug!(url = %url, uid = %uid, "Sending state change");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .json(patch)
            .send()
            .await
            .map_err(ApiError::Http)?;

        Self::check_status(&response)?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url = %url, "Sending API request");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(ApiError::Http)?;

        Self::check_status(&response)?;

        let body = response.text().await.map_err(ApiError::Http)?;

        tracing::debug!(body = %body, "Received API response");

        Ok(serde_json::from_str(&body).map_err(ParseError::Json)?)
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed.into());
        }

        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        Ok(())
    }
}
