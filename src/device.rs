// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory records returned by the Freedompro device listing.

use serde::Deserialize;

use crate::state::{DeviceState, StateSnapshot};

/// One accessory as reported by the Freedompro device listing.
///
/// The listing itself carries only identity and capability information;
/// [`state`](Self::state) is `None` until the first state poll has been
/// merged in.
///
/// # Examples
///
/// ```
/// use freedompro::Device;
///
/// let json = r#"{
///     "uid": "3WRRJR6RCZQZSND8VP0YTK3YMV",
///     "name": "Bedroom lamp",
///     "type": "lightbulb",
///     "characteristics": ["on", "brightness"]
/// }"#;
/// let device: Device = serde_json::from_str(json).unwrap();
/// assert_eq!(device.name, "Bedroom lamp");
/// assert!(device.state.is_none());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    /// Unique identifier of the accessory. Unique within one account's
    /// device listing.
    pub uid: String,

    /// User-visible accessory name.
    #[serde(default)]
    pub name: String,

    /// Accessory type, e.g. `lightbulb`, `switch`, `lock`,
    /// `temperatureSensor`, `windowCovering`, `thermostat`, `fan`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Characteristics the accessory supports, e.g. `on`, `brightness`.
    #[serde(default)]
    pub characteristics: Vec<String>,

    /// Last state merged from a state poll, if any.
    #[serde(default)]
    pub state: Option<DeviceState>,
}

impl Device {
    /// Returns `true` if the accessory advertises the given characteristic.
    #[must_use]
    pub fn has_characteristic(&self, name: &str) -> bool {
        self.characteristics.iter().any(|c| c == name)
    }

    /// Merges a polled snapshot into this device.
    ///
    /// The state is only overwritten when the snapshot carries the same
    /// uid and actually contains a state; otherwise the previously known
    /// state is kept. Returns `true` if the state was overwritten.
    pub fn merge_snapshot(&mut self, snapshot: &StateSnapshot) -> bool {
        if snapshot.uid != self.uid {
            return false;
        }
        match &snapshot.state {
            Some(state) => {
                self.state = Some(state.clone());
                true
            }
            None => false,
        }
    }
}
