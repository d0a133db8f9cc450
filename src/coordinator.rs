// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator that keeps an account's accessory list fresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, watch};
use tokio::time::MissedTickBehavior;

use crate::api::ApiClient;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::state::StatePatch;

/// Coordinator that polls the Freedompro API and maintains a merged
/// accessory cache.
///
/// The accessory listing is fetched lazily on the first refresh and then
/// reused for the coordinator's whole lifetime; every refresh fetches the
/// current states and merges them into the cached listing by uid. Cached
/// accessories that the state poll does not mention keep their previously
/// known state.
///
/// A failed refresh leaves the cache untouched, so consumers keep seeing
/// the last good data until a later refresh succeeds. If the initial
/// listing fails, the cache stays empty and the listing is retried on the
/// next refresh.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use freedompro::{ApiClient, DeviceCoordinator};
///
/// #[tokio::main]
/// async fn main() -> freedompro::Result<()> {
///     let api = ApiClient::new("my-api-key")?;
///     let coordinator = Arc::new(
///         DeviceCoordinator::new(api).with_interval(Duration::from_secs(30)),
///     );
///
///     // Fail fast if the first refresh cannot populate the cache.
///     let devices = coordinator.refresh().await?;
///     println!("{} accessories", devices.len());
///
///     // Watch merged snapshots while the poll loop runs.
///     let mut updates = coordinator.subscribe();
///     let handle = Arc::clone(&coordinator).spawn();
///
///     while updates.changed().await.is_ok() {
///         println!("refreshed: {} accessories", updates.borrow().len());
///     }
///
///     handle.abort();
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DeviceCoordinator {
    api: ApiClient,
    interval: Duration,
    inner: RwLock<Inner>,
    snapshot_tx: watch::Sender<Vec<Device>>,
}

#[derive(Debug, Default)]
struct Inner {
    /// `None` until the accessory listing has been fetched successfully.
    devices: Option<Vec<Device>>,
    last_refresh: Option<DateTime<Utc>>,
}

impl DeviceCoordinator {
    /// Default poll interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a coordinator polling through the given client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            api,
            interval: Self::DEFAULT_INTERVAL,
            inner: RwLock::new(Inner::default()),
            snapshot_tx,
        }
    }

    /// Sets the poll interval used by [`run`](Self::run).
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Performs one refresh cycle and returns the merged accessory list.
    ///
    /// On the first successful call this fetches the accessory listing;
    /// afterwards only states are polled. The returned vector is a copy of
    /// the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing or state call fails. The cache is
    /// left as it was; a listing that has never succeeded is retried on
    /// the next call.
    pub async fn refresh(&self) -> Result<Vec<Device>> {
        // The write lock is held across both API calls so refreshes never
        // overlap, no matter how many tasks share the coordinator.
        let mut inner = self.inner.write().await;

        if inner.devices.is_none() {
            let devices = self.api.get_devices().await?;
            tracing::debug!(count = devices.len(), "Fetched accessory listing");
            inner.devices = Some(devices);
        }

        let snapshots = self.api.get_states().await?;

        if let Some(devices) = inner.devices.as_mut() {
            for device in devices.iter_mut() {
                if let Some(snapshot) = snapshots.iter().find(|s| s.uid == device.uid) {
                    let _ = device.merge_snapshot(snapshot);
                }
            }
        }

        inner.last_refresh = Some(Utc::now());

        let merged = inner.devices.clone().unwrap_or_default();
        let _ = self.snapshot_tx.send_replace(merged.clone());
        Ok(merged)
    }

    /// Returns a copy of the cached accessory list.
    ///
    /// Empty until the first successful [`refresh`](Self::refresh).
    pub async fn devices(&self) -> Vec<Device> {
        self.inner
            .read()
            .await
            .devices
            .clone()
            .unwrap_or_default()
    }

    /// Returns a copy of the cached accessory with the given uid, if any.
    pub async fn device(&self, uid: &str) -> Option<Device> {
        self.inner
            .read()
            .await
            .devices
            .as_ref()
            .and_then(|devices| devices.iter().find(|d| d.uid == uid).cloned())
    }

    /// Returns the time of the last successful refresh.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_refresh
    }

    /// Subscribes to merged accessory snapshots.
    ///
    /// The receiver starts out holding an empty list and is updated after
    /// every successful refresh. Failed refreshes publish nothing, so
    /// subscribers keep the last good snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Device>> {
        self.snapshot_tx.subscribe()
    }

    /// Sends a partial state change for a cached accessory.
    ///
    /// The cloud applies the change asynchronously; the merged cache picks
    /// it up on the next refresh. Call [`refresh`](Self::refresh) to
    /// observe it sooner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDevice`] if the uid is not in the cache,
    /// or an API error if the request fails.
    pub async fn set_state(&self, uid: &str, patch: &StatePatch) -> Result<()> {
        if self.device(uid).await.is_none() {
            return Err(Error::UnknownDevice(uid.to_string()));
        }
        self.api.put_state(uid, patch).await
    }

    /// Runs the poll loop until the future is dropped.
    ///
    /// The first tick fires immediately; afterwards refreshes run on the
    /// configured interval. A slow refresh delays the next tick instead of
    /// piling up missed ones. Refresh failures are logged and the stale
    /// cache is kept.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let _ = ticker.tick().await;
            match self.refresh().await {
                Ok(devices) => {
                    tracing::debug!(count = devices.len(), "Refreshed accessory states");
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Refresh failed, keeping stale data");
                }
            }
        }
    }

    /// Spawns the poll loop on the current tokio runtime.
    ///
    /// Abort the returned handle to stop polling.
    #[must_use]
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }
}
