mod common;

use std::time::{Duration, Instant};

use common::{API_KEY, SERVER, ctx, setup, zone_path};
use pdns_client::{CallContext, Error};
use pdns_client::zones::{
    ChangeSet, ResourceRecordSet, SoaEditApi, Zone, ZoneBasicDataUpdate, ZoneFetchOptions, ZoneKind,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_add_record_sets_sends_one_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(zone_path("example.de.")))
        .and(header("X-API-Key", API_KEY))
        .and(body_json(json!({
            "rrsets": [
                {
                    "name": "foo.example.de.",
                    "type": "A",
                    "ttl": 60,
                    "changetype": "REPLACE",
                    "records": [{"content": "127.0.0.1", "disabled": false}]
                },
                {
                    "name": "bar.example.de.",
                    "type": "A",
                    "ttl": 60,
                    "changetype": "REPLACE",
                    "records": [{"content": "127.0.0.2", "disabled": false}]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .zones()
        .add_record_sets(
            &ctx(),
            SERVER,
            "example.de.",
            vec![
                ResourceRecordSet::new("foo.example.de.", "A", 60, ["127.0.0.1"]),
                ResourceRecordSet::new("bar.example.de.", "A", 60, ["127.0.0.2"]),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_record_set_sends_delete_entry() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(zone_path("example.de.")))
        .and(body_json(json!({
            "rrsets": [{
                "name": "foo.example.de.",
                "type": "A",
                "ttl": 0,
                "changetype": "DELETE",
                "records": []
            }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .zones()
        .remove_record_set(&ctx(), SERVER, "example.de.", "foo.example.de.", "A")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_fetched_record_sets_sends_keys_once() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(zone_path("example.de.")))
        .and(body_json(json!({
            "rrsets": [{
                "name": "foo.example.de.",
                "type": "TXT",
                "ttl": 0,
                "changetype": "DELETE",
                "records": []
            }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = ResourceRecordSet::new("foo.example.de.", "TXT", 300, ["\"a\"", "\"b\""]);
    client
        .zones()
        .remove_record_sets(&ctx(), SERVER, "example.de.", &[fetched.clone(), fetched])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_change_set_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    client
        .zones()
        .apply_change_set(&ctx(), SERVER, "example.de.", &ChangeSet::new())
        .await
        .unwrap();
    client
        .zones()
        .add_record_sets(&ctx(), SERVER, "example.de.", Vec::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_zone_filtered_sends_rrset_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(zone_path("example.de.")))
        .and(query_param("rrset_name", "bar.example.de."))
        .and(query_param("rrset_type", "A"))
        .and(query_param_is_missing("rrsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "example.de.",
            "name": "example.de.",
            "kind": "Native",
            "serial": 2024010101u32,
            "rrsets": [{
                "name": "bar.example.de.",
                "type": "A",
                "ttl": 60,
                "records": [{"content": "127.0.0.2", "disabled": false, "modified_at": 1700000000}],
                "comments": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ZoneFetchOptions::filtered("bar.example.de.", "A").unwrap();
    let zone = client
        .zones()
        .get_zone(&ctx(), SERVER, "example.de.", &options)
        .await
        .unwrap();

    let rrset = zone
        .find_rrset("bar.example.de.", "A")
        .expect("rrset returned");
    assert_eq!(rrset.records[0].content, "127.0.0.2");
    assert!(rrset.records[0].modified_at_utc().is_some());
    assert!(zone.find_rrset("foo.example.de.", "A").is_none());
}

#[tokio::test]
async fn test_get_zone_without_rrsets() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(zone_path("example.de.")))
        .and(query_param("rrsets", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "example.de.",
            "name": "example.de.",
            "kind": "Master"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ZoneFetchOptions::without_rrsets();
    let zone = client
        .zones()
        .get_zone(&ctx(), SERVER, "example.de.", &options)
        .await
        .unwrap();
    assert_eq!(zone.kind, ZoneKind::Master);
    assert!(zone.rrsets.is_empty());
}

#[tokio::test]
async fn test_missing_zone_is_not_found() {
    let (server, client) = setup().await;

    let body = json!({"error": "Not Found"});
    Mock::given(method("GET"))
        .and(path(zone_path("missing.de.")))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let err = client
        .zones()
        .get_zone(&ctx(), SERVER, "missing.de.", &ZoneFetchOptions::all())
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_create_existing_zone_is_conflict() {
    let (server, client) = setup().await;

    let body = json!({"error": "Domain 'example.de.' already exists"});
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/servers/{SERVER}/zones")))
        .respond_with(ResponseTemplate::new(409).set_body_json(body))
        .mount(&server)
        .await;

    let zone = Zone::new("example.de.", ZoneKind::Native)
        .with_nameservers(["ns1.example.net."]);
    let err = client
        .zones()
        .create_zone(&ctx(), SERVER, &zone)
        .await
        .unwrap_err();
    match err {
        Error::Conflict { body, .. } => assert!(body.contains("already exists")),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_zone_returns_server_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/servers/{SERVER}/zones")))
        .and(body_json(json!({
            "name": "example.de.",
            "type": "Zone",
            "kind": "Native",
            "dnssec": false,
            "nsec3narrow": false,
            "api_rectify": false,
            "nameservers": ["ns1.example.net.", "ns2.example.net."]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "example.de.",
            "name": "example.de.",
            "kind": "Native",
            "url": "/api/v1/servers/localhost/zones/example.de.",
            "serial": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let zone = Zone::new("example.de.", ZoneKind::Native)
        .with_nameservers(["ns1.example.net.", "ns2.example.net."]);
    let created = client
        .zones()
        .create_zone(&ctx(), SERVER, &zone)
        .await
        .unwrap();
    assert_eq!(created.id, "example.de.");
    assert_eq!(created.serial, Some(1));
}

#[tokio::test]
async fn test_basic_data_update_sends_only_set_fields() {
    let (server, client) = setup().await;

    let body = json!({"soa_edit_api": "INCREASE", "account": "ops"});
    Mock::given(method("PUT"))
        .and(path(zone_path("example.de.")))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let update = ZoneBasicDataUpdate::new()
        .soa_edit_api(SoaEditApi::Increase)
        .account("ops");
    client
        .zones()
        .modify_basic_zone_data(&ctx(), SERVER, "example.de.", &update)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_basic_data_update_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let update = ZoneBasicDataUpdate::new();
    client
        .zones()
        .modify_basic_zone_data(&ctx(), SERVER, "example.de.", &update)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_export_and_notify() {
    let (server, client) = setup().await;

    let soa = "example.de.\t3600\tIN\tSOA\tns1.example.net. hostmaster.example.de. \
               1 10800 3600 604800 3600\n";
    Mock::given(method("GET"))
        .and(path(format!("{}/export", zone_path("example.de."))))
        .respond_with(ResponseTemplate::new(200).set_body_string(soa))
        .expect(1)
        .mount(&server)
        .await;
    let queued = json!({"result": "Notification queued"});
    Mock::given(method("PUT"))
        .and(path(format!("{}/notify", zone_path("example.de."))))
        .respond_with(ResponseTemplate::new(200).set_body_json(queued))
        .expect(1)
        .mount(&server)
        .await;

    let text = client
        .zones()
        .export_zone(&ctx(), SERVER, "example.de.")
        .await
        .unwrap();
    assert!(text.contains("SOA"));

    let result = client
        .zones()
        .notify_zone(&ctx(), SERVER, "example.de.")
        .await
        .unwrap();
    assert_eq!(result, "Notification queued");
}

#[tokio::test]
async fn test_zone_id_with_slash_is_one_segment() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(zone_path("0%2F25.2.0.192.in-addr.arpa.")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .zones()
        .delete_zone(&ctx(), SERVER, "0/25.2.0.192.in-addr.arpa.")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_key_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .zones()
        .remove_record_set(&ctx(), SERVER, "example.de.", "", "A")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Encoding(_)), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let (server, client) = setup().await;

    let message = "RRset bar.example.de. IN A: Conflicts with pre-existing RRset";
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(422).set_body_string(message))
        .mount(&server)
        .await;

    let err = client
        .zones()
        .add_record_set(
            &ctx(),
            SERVER,
            "example.de.",
            ResourceRecordSet::new("bar.example.de.", "A", 60, ["127.0.0.2"]),
        )
        .await
        .unwrap_err();
    match err {
        Error::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status, 422);
            assert!(body.contains("Conflicts"));
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_export_rejects_invalid_utf8() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/export", zone_path("example.de."))))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe]))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .zones()
        .export_zone(&ctx(), SERVER, "example.de.")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Utf8(_)), "got {err:?}");
}

/// A zone GET the mock server answers only after ten seconds.
async fn mount_slow_zone(server: &wiremock::MockServer) {
    let zone = json!({"id": "example.de.", "name": "example.de.", "kind": "Native"});
    Mock::given(method("GET"))
        .and(path(zone_path("example.de.")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone)
                .set_delay(Duration::from_secs(10)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_deadline_aborts_request_in_flight() {
    let (server, client) = setup().await;
    mount_slow_zone(&server).await;

    let started = Instant::now();
    let ctx = CallContext::with_timeout(Duration::from_millis(300));
    let err = client
        .zones()
        .get_zone(&ctx, SERVER, "example.de.", &ZoneFetchOptions::all())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded), "got {err:?}");
    let elapsed = started.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "returned after {elapsed:?}"
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_aborts_request_in_flight() {
    let (server, client) = setup().await;
    mount_slow_zone(&server).await;

    let token = CancellationToken::new();
    let ctx = CallContext::with_cancellation(token.clone());
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = client
        .zones()
        .get_zone(&ctx, SERVER, "example.de.", &ZoneFetchOptions::all())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Canceled), "got {err:?}");
    let elapsed = started.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "returned after {elapsed:?}"
    );
    canceller.await.unwrap();
}
