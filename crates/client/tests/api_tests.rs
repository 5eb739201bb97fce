//! Integration tests for the netspot control client.
//!
//! These tests use wiremock to simulate the control service and check both
//! the async and the blocking transports against the same routes.

use netspot_control_client::configuration::GetNetspot;
use netspot_control_client::statistics::MessageQuery;
use netspot_control_client::{Client, ClientBuilder, Error};
use std::time::Duration;

use netspot_control_core::{
    AlertStatus, ConfigId, Float, MinerConfig, NetspotConfig, ProcessStatus, Stat, StatConfig,
    StatsConfig, TestAlarmMessage, Tristate, ValidationError, Webhook,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn strict(uri: &str) -> Client {
    ClientBuilder::new(uri)
        .raise_on_unexpected_status(true)
        .build()
        .unwrap()
}

fn default_config() -> serde_json::Value {
    json!({
        "configuration": {"name": "Default configuration", "device": "any", "promiscuous": true, "enabled": true},
        "spot": {"depth": 50, "q": 0.0001, "n_init": 2000, "level": 0.98, "up": true, "down": false, "alert": true, "bounded": true, "max_excess": 200},
        "stats": {"avg_pkt_size": {"enabled": true, "max_excess": 1}, "perf": {"enabled": true, "up": false}, "r_arp": {"enabled": true}, "r_syn": {"enabled": true}, "traffic": {"enabled": true}}
    })
}

#[tokio::test]
async fn get_netspot_parses_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_config()))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri());
    let config = client.get_netspot(42).await.unwrap().unwrap();

    assert_eq!(config.configuration.name, "Default configuration");
    assert_eq!(config.spot.as_value().unwrap().n_init(), 2000);
    let stats = config.stats.as_value().unwrap();
    assert_eq!(
        stats.enabled_stats(),
        vec![Stat::AvgPktSize, Stat::Perf, Stat::RArp, Stat::RSyn, Stat::Traffic]
    );
}

#[tokio::test]
async fn get_netspot_not_found_is_none_under_both_policies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let lenient = Client::new(mock_server.uri());
    assert!(lenient.get_netspot(42).await.unwrap().is_none());

    let strict = strict(&mock_server.uri());
    assert!(strict.get_netspot(42).await.unwrap().is_none());
}

#[tokio::test]
async fn get_netspot_server_error_follows_policy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let lenient = Client::new(mock_server.uri());
    assert!(lenient.get_netspot(42).await.unwrap().is_none());

    let err = strict(&mock_server.uri()).get_netspot(42).await.unwrap_err();
    match err {
        Error::UnexpectedStatus { status, content } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(content, "boom");
        }
        other => panic!("Expected unexpected status, got {other:?}"),
    }
}

#[tokio::test]
async fn detailed_response_keeps_raw_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-request-id", "r-1")
                .set_body_string("boom"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri());
    let response = client.send_detailed(&GetNetspot::new(42)).await.unwrap();
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers["x-request-id"], "r-1");
    assert_eq!(response.content, "boom");
    assert!(response.parsed.is_none());
}

#[tokio::test]
async fn invalid_body_is_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spot": {}})))
        .mount(&mock_server)
        .await;

    let err = Client::new(mock_server.uri())
        .get_netspot(1)
        .await
        .unwrap_err();
    match err {
        Error::Validation(ValidationError::MissingField(field)) => {
            assert_eq!(field, "configuration");
        }
        other => panic!("Expected missing field, got {other:?}"),
    }
}

#[tokio::test]
async fn add_netspot_sends_tristate_body() {
    let mock_server = MockServer::start().await;

    let stats = StatsConfig::default()
        .with(Stat::RSyn, StatConfig::enabled())
        .with(Stat::Perf, Tristate::<StatConfig>::Null);
    let config = NetspotConfig::new(MinerConfig::new("lan").with_device("eth0")).with_stats(stats);

    Mock::given(method("POST"))
        .and(path("/v1/netspot"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "configuration": {"name": "lan", "device": "eth0"},
            "stats": {"perf": null, "r_syn": {"enabled": true}}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri());
    assert_eq!(client.add_netspot(&config).await.unwrap(), Some(()));
}

#[tokio::test]
async fn put_and_delete_report_missing_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/netspot/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/netspot/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = strict(&mock_server.uri());
    let config = NetspotConfig::new(MinerConfig::new("lan"));
    assert_eq!(client.put_netspot(9, &config).await.unwrap(), None);
    assert_eq!(client.delete_netspot(3).await.unwrap(), Some(()));
}

#[tokio::test]
async fn status_all_decodes_tagged_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": {"Ok": 1}, "name": "lan", "status": "running"},
            {"id": {"Err": "not registered"}, "name": "wan", "status": "stopped"}
        ])))
        .mount(&mock_server)
        .await;

    let statuses = Client::new(mock_server.uri())
        .status_all()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].id, ConfigId::Ok(1));
    assert!(statuses[0].is_running());
    assert_eq!(statuses[1].id.err(), Some("not registered"));
    assert_eq!(statuses[1].status, ProcessStatus::Stopped);
}

#[tokio::test]
async fn start_one_detector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/5/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": {"Ok": 5}, "name": "lan", "status": "running"}
        )))
        .mount(&mock_server)
        .await;

    let status = Client::new(mock_server.uri())
        .start(5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.id.ok(), Some(5));
}

#[tokio::test]
async fn alarms_omit_unset_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspots/alarms"))
        .and(query_param("last", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "time": 1000, "name": "n", "series": "s", "stat": "R_SYN",
            "status": "UP_ALERT", "value": 12, "probability": 1,
            "code": 1, "type": "alarm"
        }])))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri());
    let alarms = client
        .alarms(MessageQuery::new().with_last(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].status, AlertStatus::UpAlert);
    let alarm = serde_json::to_value(&alarms[0]).unwrap();
    assert_eq!(alarm["value"], json!(12));
    assert_eq!(alarm["probability"], json!(1));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("last=1"));
}

#[tokio::test]
async fn unknown_enum_in_response_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspots/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "time": 1000, "name": "n", "series": "s", "stat": "NOT_A_STAT",
            "status": "UP_ALERT", "value": 12.5, "probability": 0.9,
            "code": 1, "type": "alarm"
        }])))
        .mount(&mock_server)
        .await;

    let err = Client::new(mock_server.uri())
        .alarms(MessageQuery::new())
        .await
        .unwrap_err();
    match err {
        Error::Validation(e) => {
            assert_eq!(e, ValidationError::unknown_variant("stat", "NOT_A_STAT"));
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn data_with_time_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspots/data"))
        .and(query_param("time", "1700000000000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "time": 1_700_000_000_500_000_000_i64, "name": "lan", "series": "any-1",
            "type": "data", "R_SYN": 0.5, "TRAFFIC_UP": 120.5
        }])))
        .mount(&mock_server)
        .await;

    let data = Client::new(mock_server.uri())
        .data(MessageQuery::new().with_time(1_700_000_000_000_000_000))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(data[0].r_syn.as_value().map(Float::as_f64), Some(0.5));
    assert_eq!(data[0].traffic_up.as_value().map(Float::as_f64), Some(120.5));
}

#[tokio::test]
async fn webhooks_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": {"name": "ops", "address": "http://hooks.local/in", "type": "alarms"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/netspots/webhook"))
        .and(body_json(json!({"name": "ops", "address": "http://hooks.local/in"})))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/netspots/webhook/8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = strict(&mock_server.uri());
    let hooks = client.list_webhooks().await.unwrap().unwrap();
    assert_eq!(hooks[&1].name, "ops");

    let hook = Webhook::new("ops", "http://hooks.local/in");
    assert_eq!(client.add_webhook(&hook).await.unwrap(), Some(()));
    assert!(client.get_webhook(8).await.unwrap().is_none());
}

#[tokio::test]
async fn test_alarm_accepts_any_success_status() {
    let message = TestAlarmMessage {
        stat: Stat::Traffic.into(),
        ..TestAlarmMessage::default()
    };

    for code in [200_u16, 203, 204, 206] {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/netspots/test/alarm"))
            .and(body_json(json!({"stat": "TRAFFIC"})))
            .respond_with(ResponseTemplate::new(code))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = strict(&mock_server.uri());
        let sent = client.send_test_alarm(&message).await;
        assert_eq!(sent.unwrap(), Some(()), "status {code}");
    }
}

#[tokio::test]
async fn test_alarm_redirect_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/netspots/test/alarm"))
        .respond_with(ResponseTemplate::new(300))
        .mount(&mock_server)
        .await;

    let err = strict(&mock_server.uri())
        .send_test_alarm(&TestAlarmMessage::default())
        .await
        .unwrap_err();
    assert!(err.is_unexpected_status());
    assert_eq!(err.status(), Some(StatusCode::MULTIPLE_CHOICES));
}

#[tokio::test]
async fn test_alarm_sends_integer_valued_numbers_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/netspots/test/alarm"))
        .and(body_json(json!({"value": 1000, "probability": 0.5})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let message = TestAlarmMessage {
        value: Float::from(1000_i32).into(),
        probability: Float::try_from(0.5).unwrap().into(),
        ..TestAlarmMessage::default()
    };
    let client = Client::new(mock_server.uri());
    assert_eq!(client.send_test_alarm(&message).await.unwrap(), Some(()));

    let body = &mock_server.received_requests().await.unwrap()[0].body;
    assert_eq!(
        std::str::from_utf8(body).unwrap(),
        r#"{"value":1000,"probability":0.5}"#
    );
}

#[test]
fn non_finite_test_alarm_value_cannot_be_built() {
    let err = Float::try_from(f64::NAN).unwrap_err();
    assert!(matches!(err, ValidationError::Invalid(_)));
    assert!(Float::try_from(f64::NEG_INFINITY).is_err());
}

#[tokio::test]
async fn interfaces_with_auth_headers_and_cookies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/network/interfaces"))
        .and(header("authorization", "Bearer secret"))
        .and(header("x-agent", "tests"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["lo", "eth0"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ClientBuilder::new(mock_server.uri())
        .token("secret")
        .header("X-Agent", "tests")
        .build()
        .unwrap()
        .with_cookies([("session", "abc")]);
    let interfaces = client.interfaces().await.unwrap().unwrap();
    assert_eq!(interfaces, vec!["lo".to_string(), "eth0".to_string()]);
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = Client::new(uri).get_netspot(1).await.unwrap_err();
    assert!(err.is_transport_error());
    assert!(err.status().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_response_times_out_on_both_transports() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(default_config())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).with_timeout(Duration::from_millis(200));
    assert_eq!(client.timeout(), Duration::from_millis(200));

    let err = client.send(&GetNetspot::new(42)).await.unwrap_err();
    assert!(err.is_transport_error() && err.is_timeout(), "{err:?}");
    assert!(err.status().is_none());

    let err = client.get_netspot(42).await.unwrap_err();
    assert!(err.is_transport_error() && err.is_timeout(), "{err:?}");

    let err = tokio::task::spawn_blocking(move || {
        client.send_blocking(&GetNetspot::new(42)).unwrap_err()
    })
    .await
    .unwrap();
    assert!(err.is_transport_error() && err.is_timeout(), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_path_matches_async_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/netspot/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_config()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/netspot/43"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/netspot/44"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let expected = Client::new(uri.clone()).get_netspot(42).await.unwrap();

    let (found, missing, unavailable) = tokio::task::spawn_blocking(move || {
        let client = strict(&uri);
        (
            client.send_blocking(&GetNetspot::new(42)),
            client.send_blocking(&GetNetspot::new(43)),
            client.send_blocking(&GetNetspot::new(44)),
        )
    })
    .await
    .unwrap();

    assert_eq!(found.unwrap(), expected);
    assert!(missing.unwrap().is_none());
    assert_eq!(
        unavailable.unwrap_err().status(),
        Some(StatusCode::SERVICE_UNAVAILABLE)
    );
}
