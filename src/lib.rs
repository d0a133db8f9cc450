// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rust client library for the Freedompro smart-home cloud API.
//!
//! This library provides async access to the accessories registered in a
//! Freedompro account: listing devices, polling their states, sending
//! state changes, and a polling coordinator that keeps a merged device
//! cache fresh for home-automation hosts.
//!
//! # Quick Start
//!
//! ## Direct API access
//!
//! ```no_run
//! use freedompro::{ApiClient, StatePatch};
//!
//! #[tokio::main]
//! async fn main() -> freedompro::Result<()> {
//!     let client = ApiClient::new("my-api-key")?;
//!
//!     // List the account's accessories
//!     let devices = client.get_devices().await?;
//!     for device in &devices {
//!         println!("{} ({})", device.name, device.kind);
//!     }
//!
//!     // Turn the first accessory on
//!     if let Some(device) = devices.first() {
//!         client
//!             .put_state(&device.uid, &StatePatch::new().with_on(true))
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Polling coordinator
//!
//! The coordinator fetches the accessory listing once, then polls states
//! on an interval and merges them into the cached listing by uid. Failed
//! refreshes keep the last good data.
//!
//! ```no_run
//! use std::sync::Arc;
//! use freedompro::{ApiClient, DeviceCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> freedompro::Result<()> {
//!     let api = ApiClient::new("my-api-key")?;
//!     let coordinator = Arc::new(DeviceCoordinator::new(api));
//!
//!     // Populate the cache, failing setup if the listing is unavailable
//!     coordinator.refresh().await?;
//!
//!     let mut updates = coordinator.subscribe();
//!     let _poller = Arc::clone(&coordinator).spawn();
//!
//!     while updates.changed().await.is_ok() {
//!         for device in updates.borrow().iter() {
//!             println!("{}: {:?}", device.name, device.state);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod coordinator;
pub mod device;
pub mod error;
pub mod state;

pub use api::{ApiClient, ApiConfig};
pub use coordinator::DeviceCoordinator;
pub use device::Device;
pub use error::{ApiError, Error, ParseError, Result};
pub use state::{DeviceState, StatePatch, StateSnapshot};
