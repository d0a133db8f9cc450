// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types: reported state, per-poll snapshots, and outbound
//! partial state changes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State reported by the Freedompro API for one accessory.
///
/// All fields are optional because each accessory only reports the
/// characteristics it actually has. Fields this library does not model
/// are preserved in [`extra`](Self::extra), so a state round-trips even
/// when the API grows new characteristics.
///
/// # Examples
///
/// ```
/// use freedompro::state::DeviceState;
///
/// let json = r#"{"on": true, "brightness": 75}"#;
/// let state: DeviceState = serde_json::from_str(json).unwrap();
/// assert_eq!(state.on, Some(true));
/// assert_eq!(state.brightness, Some(75));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceState {
    /// Whether the accessory is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,

    /// Brightness in percent (0-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,

    /// Hue in degrees (0-360).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,

    /// Saturation in percent (0-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<u8>,

    /// Measured temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature: Option<f64>,

    /// Relative humidity in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_relative_humidity: Option<f64>,

    /// Ambient light level in lux.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ambient_light_level: Option<f64>,

    /// Lock state (0 = unlocked, 1 = locked).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<u8>,

    /// Covering position in percent (0 = closed, 100 = open).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u8>,

    /// Fan rotation speed in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_speed: Option<u8>,

    /// Thermostat target temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<f64>,

    /// Thermostat mode (0 = off, 1 = heat, 2 = cool).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating_cooling_state: Option<u8>,

    /// Characteristics not modeled by this library, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the list-states response.
///
/// The API reports states as a flat list keyed by accessory uid. An entry
/// without a `state` field means the accessory did not report anything
/// this cycle; the coordinator keeps the previously known state in that
/// case.
#[derive(Debug, Clone, Deserialize)]
pub struct StateSnapshot {
    /// Unique identifier of the accessory this snapshot belongs to.
    pub uid: String,

    /// Accessory type as reported by the API.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Reported state, if any.
    #[serde(default)]
    pub state: Option<DeviceState>,
}

/// Outbound partial state change for
/// [`ApiClient::put_state`](crate::api::ApiClient::put_state).
///
/// Only the fields that were explicitly set are serialized, so a patch
/// never clobbers characteristics it does not mention.
///
/// # Examples
///
/// ```
/// use freedompro::state::StatePatch;
///
/// let patch = StatePatch::new().with_on(true).with_brightness(50);
/// let body = serde_json::to_string(&patch).unwrap();
/// assert_eq!(body, r#"{"on":true,"brightness":50}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saturation: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lock: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation_speed: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heating_cooling_state: Option<u8>,
}

impl StatePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the on/off state.
    #[must_use]
    pub fn with_on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the brightness in percent (0-100).
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the hue in degrees (0-360).
    #[must_use]
    pub fn with_hue(mut self, hue: u16) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Sets the saturation in percent (0-100).
    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = Some(saturation);
        self
    }

    /// Sets the lock state (0 = unlocked, 1 = locked).
    #[must_use]
    pub fn with_lock(mut self, lock: u8) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Sets the covering position in percent (0 = closed, 100 = open).
    #[must_use]
    pub fn with_position(mut self, position: u8) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the fan rotation speed in percent.
    #[must_use]
    pub fn with_rotation_speed(mut self, speed: u8) -> Self {
        self.rotation_speed = Some(speed);
        self
    }

    /// Sets the thermostat target temperature in degrees Celsius.
    #[must_use]
    pub fn with_target_temperature(mut self, temperature: f64) -> Self {
        self.target_temperature = Some(temperature);
        self
    }

    /// Sets the thermostat mode (0 = off, 1 = heat, 2 = cool).
    #[must_use]
    pub fn with_heating_cooling_state(mut self, state: u8) -> Self {
        self.heating_cooling_state = Some(state);
        self
    }

    /// Returns `true` if no field has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_parses_known_fields() {
        let json = r#"{"on": false, "brightness": 30, "hue": 120, "saturation": 90}"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();

        assert_eq!(state.on, Some(false));
        assert_eq!(state.brightness, Some(30));
        assert_eq!(state.hue, Some(120));
        assert_eq!(state.saturation, Some(90));
        assert!(state.current_temperature.is_none());
        assert!(state.extra.is_empty());
    }

    #[test]
    fn state_keeps_unknown_fields() {
        let json = r#"{"on": true, "colorTemperature": 250}"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();

        assert_eq!(state.on, Some(true));
        assert_eq!(
            state.extra.get("colorTemperature"),
            Some(&serde_json::json!(250))
        );
    }

    #[test]
    fn state_round_trips_unknown_fields() {
        let json = r#"{"on":true,"colorTemperature":250}"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&state).unwrap();

        assert_eq!(out["on"], serde_json::json!(true));
        assert_eq!(out["colorTemperature"], serde_json::json!(250));
    }

    #[test]
    fn state_uses_camel_case_names() {
        let json = r#"{"currentTemperature": 21.5, "currentRelativeHumidity": 40.0}"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();

        assert_eq!(state.current_temperature, Some(21.5));
        assert_eq!(state.current_relative_humidity, Some(40.0));
    }

    #[test]
    fn snapshot_without_state() {
        let json = r#"{"uid": "abc", "type": "switch"}"#;
        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.uid, "abc");
        assert_eq!(snapshot.kind.as_deref(), Some("switch"));
        assert!(snapshot.state.is_none());
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = StatePatch::new();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = StatePatch::new().with_position(100);
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"position":100}"#);
    }

    #[test]
    fn patch_uses_camel_case_names() {
        let patch = StatePatch::new()
            .with_target_temperature(22.0)
            .with_heating_cooling_state(1);
        let body = serde_json::to_value(&patch).unwrap();

        assert_eq!(body["targetTemperature"], serde_json::json!(22.0));
        assert_eq!(body["heatingCoolingState"], serde_json::json!(1));
    }
}
