//! Integration tests for the Cloud DNS transport using wiremock
//!
//! These tests drive a `Project` against mocked endpoints, checking
//! authentication, pagination and handling of error responses.

use gcp_dns::gcp::http::ApiError;
use gcp_dns::{Credentials, Project, Scope, Service};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ZONES_PATH: &str = "/dns/v1/projects/test-project/managedZones";

fn project_for(server: &MockServer, timeout: Option<Duration>) -> Project {
    let credentials = Credentials::from_static_token("test-token", Scope::default());
    let service = Service::new("test-project", credentials, None, timeout)
        .expect("service should build")
        .with_endpoint(&format!("{}/dns/v1", server.uri()))
        .expect("endpoint should parse");
    Project::new(service)
}

fn zone_json(name: &str, dns_name: &str) -> serde_json::Value {
    json!({
        "kind": "dns#managedZone",
        "id": "5011254373958235051",
        "name": name,
        "dnsName": dns_name,
        "description": "",
        "nameServers": [
            "ns-cloud-b1.googledomains.com.",
            "ns-cloud-b2.googledomains.com."
        ],
        "creationTime": "2016-03-01T17:24:30.451Z",
        "visibility": "public"
    })
}

/// Zone listing
mod zone_list_tests {
    use super::*;

    /// Single page of zones is returned with bearer auth
    #[tokio::test]
    async fn test_list_zones_single_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "dns#managedZonesListResponse",
                "managedZones": [
                    zone_json("example-com", "example.com."),
                    zone_json("example-net", "example.net.")
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let zones = project.zones().await.expect("zones should load");

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "example-com");
        assert_eq!(zones[1].dns_name, "example.net.");
    }

    /// Pages are followed until there is no nextPageToken
    #[tokio::test]
    async fn test_list_zones_follows_pagination() {
        let server = MockServer::start().await;

        // Registered first so it wins for the second page request
        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "managedZones": [zone_json("second", "second.example.")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "managedZones": [zone_json("first", "first.example.")],
                "nextPageToken": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let zones = project.zones().await.expect("zones should load");

        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    /// A server that keeps handing back the same page token is cut off
    #[tokio::test]
    async fn test_list_zones_stops_on_repeated_page_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "managedZones": [{"name": "z"}],
                "nextPageToken": "same"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let result = tokio::time::timeout(Duration::from_secs(3), project.zones())
            .await
            .expect("listing should finish");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("page token same twice"));
    }

    /// A project without zones yields an empty list
    #[tokio::test]
    async fn test_list_zones_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"kind": "dns#managedZonesListResponse"})),
            )
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        assert!(project.zones().await.unwrap().is_empty());
    }
}

/// Single zone lookups and error mapping
mod zone_get_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_zone_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/example-com", ZONES_PATH)))
            .and(bearer_token("test-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(zone_json("example-com", "example.com.")),
            )
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let zone = project
            .zone("example-com")
            .await
            .expect("request should succeed")
            .expect("zone should exist");

        assert_eq!(zone.dns_name, "example.com.");
        assert_eq!(zone.name_servers.len(), 2);
        assert!(zone.creation_time.is_some());
    }

    /// 404 means the zone does not exist
    #[tokio::test]
    async fn test_get_zone_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/missing-zone", ZONES_PATH)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 404,
                    "message": "The 'parameters.managedZone' resource named 'missing-zone' does not exist."
                }
            })))
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        assert!(project.zone("missing-zone").await.unwrap().is_none());
    }

    /// 403 surfaces as an ApiError with the envelope message
    #[tokio::test]
    async fn test_get_zone_forbidden_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/locked", ZONES_PATH)))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Forbidden"
                }
            })))
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let err = project.zone("locked").await.unwrap_err();
        let api = err
            .downcast_ref::<ApiError>()
            .expect("should be an API error");

        assert_eq!(api.status.as_u16(), 403);
        assert_eq!(api.message, "Forbidden");
    }

    /// Requests slower than the configured timeout fail
    #[tokio::test]
    async fn test_timeout_is_applied() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let project = project_for(&server, Some(Duration::from_millis(50)));
        let err = project.zones().await.unwrap_err();

        assert!(err.downcast_ref::<ApiError>().is_none());
    }

    /// Unauthenticated requests are rejected by the server
    #[tokio::test]
    async fn test_401_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ZONES_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": 401, "message": "Invalid Credentials"}
            })))
            .mount(&server)
            .await;

        let project = project_for(&server, None);
        let err = project.zones().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ApiError>().map(|e| e.status.as_u16()),
            Some(401)
        );
    }
}
