// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the Freedompro API client using wiremock.

use freedompro::{ApiClient, ApiConfig, ApiError, Error, StatePatch};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiConfig::new("test-key")
        .with_base_url(server.uri())
        .into_client()
        .unwrap()
}

// ============================================================================
// Device Listing Tests
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn get_devices_parses_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "uid": "3WRRJR6RCZQZSND8VP0YTK3YMV",
                    "name": "Bedroom lamp",
                    "type": "lightbulb",
                    "characteristics": ["on", "brightness"]
                },
                {
                    "uid": "ZGNG7EB3A0S2M0MZ14XRVPECYB",
                    "name": "Front door",
                    "type": "lock",
                    "characteristics": ["lock"]
                }
            ])))
            .mount(&server)
            .await;

        let devices = client(&server).get_devices().await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Bedroom lamp");
        assert_eq!(devices[0].kind, "lightbulb");
        assert!(devices[0].has_characteristic("brightness"));
        assert_eq!(devices[1].kind, "lock");
        assert!(devices.iter().all(|d| d.state.is_none()));
    }

    #[tokio::test]
    async fn get_devices_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let devices = client(&server).get_devices().await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn rejected_key_maps_to_authentication_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server).get_devices().await;
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::AuthenticationFailed))
        ));
    }

    #[tokio::test]
    async fn service_error_carries_status_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).get_devices().await;
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::Service { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).get_devices().await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}

// ============================================================================
// State Listing Tests
// ============================================================================

mod states {
    use super::*;

    #[tokio::test]
    async fn get_states_parses_snapshots() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "uid": "3WRRJR6RCZQZSND8VP0YTK3YMV",
                    "type": "lightbulb",
                    "state": {"on": true, "brightness": 80}
                },
                {
                    "uid": "ZGNG7EB3A0S2M0MZ14XRVPECYB",
                    "type": "lock"
                }
            ])))
            .mount(&server)
            .await;

        let snapshots = client(&server).get_states().await.unwrap();

        assert_eq!(snapshots.len(), 2);
        let first = snapshots[0].state.as_ref().unwrap();
        assert_eq!(first.on, Some(true));
        assert_eq!(first.brightness, Some(80));
        assert!(snapshots[1].state.is_none());
    }

    #[tokio::test]
    async fn get_states_surfaces_service_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/accessories/state"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).get_states().await;
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::Service { status: 500, .. }))
        ));
    }
}

// ============================================================================
// State Change Tests
// ============================================================================

mod state_changes {
    use super::*;

    #[tokio::test]
    async fn put_state_sends_partial_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/accessories/3WRRJR6RCZQZSND8VP0YTK3YMV/state"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({"on": true, "brightness": 50})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let patch = StatePatch::new().with_on(true).with_brightness(50);
        client(&server)
            .put_state("3WRRJR6RCZQZSND8VP0YTK3YMV", &patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn put_state_surfaces_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server)
            .put_state("some-uid", &StatePatch::new().with_on(false))
            .await;
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::AuthenticationFailed))
        ));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn handles_connection_refused() {
        // Use a port that's definitely not listening
        let client = ApiConfig::new("test-key")
            .with_base_url("http://127.0.0.1:59999")
            .into_client()
            .unwrap();

        let result = client.get_devices().await;
        assert!(matches!(result, Err(Error::Api(ApiError::Http(_)))));
    }
}
