//! Tests for Client
//!
//! These tests verify:
//! - Connection lifecycle (connect/disconnect/is_connected)
//! - Precondition checks before any byte is sent
//! - Reply classification against a stub controller
//! - Transport failures and per-call receive timeouts
//! - Shared access through SharedClient

#[path = "../common/mod.rs"]
mod common;

use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use common::{connected_client, spawn_stub, test_config, Reply};
use lasermark::{Client, ConnectionConfig, MarkerError, SharedClient};

// =============================================================================
// Connection Lifecycle Tests
// =============================================================================

#[test]
fn test_new_client_is_disconnected() {
    let client = Client::default();
    assert!(!client.is_connected());
    assert!(client.peer_addr().is_none());
    assert_eq!(client.config().port, 50002);
}

#[test]
fn test_connect_and_disconnect() {
    let stub = spawn_stub(vec![]);
    let mut client = connected_client(&stub);

    assert!(client.is_connected());
    assert_eq!(client.peer_addr().unwrap().port(), stub.port);

    client.disconnect();
    assert!(!client.is_connected());
    assert!(stub.received().is_empty());
}

#[test]
fn test_connect_while_connected_fails() {
    let stub = spawn_stub(vec![]);
    let mut client = connected_client(&stub);

    let err = client.connect("127.0.0.1").unwrap_err();

    assert!(matches!(err, MarkerError::AlreadyConnected));
    assert!(client.is_connected());
    client.disconnect();
    stub.received();
}

#[test]
fn test_disconnect_is_idempotent() {
    let mut client = Client::default();
    client.disconnect();
    client.disconnect();
    assert!(!client.is_connected());
}

#[test]
fn test_connect_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut client = Client::new(test_config(port));

    let err = client.connect("127.0.0.1").unwrap_err();

    assert!(matches!(err, MarkerError::ConnectFailed { .. }));
    assert!(!client.is_connected());
}

#[test]
fn test_connect_invalid_address() {
    let mut client = Client::default();

    let err = client.connect("marker.local").unwrap_err();

    assert!(matches!(err, MarkerError::InvalidAddress(ref a) if a == "marker.local"));
}

#[test]
fn test_connect_rejects_invalid_config() {
    let config = ConnectionConfig::builder().receive_timeout_ms(0).build();
    let mut client = Client::new(config);

    let err = client.connect("127.0.0.1").unwrap_err();

    assert!(matches!(err, MarkerError::Config(_)));
}

#[test]
fn test_reconnect_after_disconnect() {
    let first = spawn_stub(vec![Reply::Text("RX,OK")]);
    let mut client = connected_client(&first);
    assert!(client.run("RX,Ready\r").success());
    client.disconnect();
    first.received();

    let second = spawn_stub(vec![Reply::Text("RX,OK")]);
    let mut client = Client::new(test_config(second.port));
    client.connect("127.0.0.1").unwrap();
    assert!(client.run("RX,Ready\r").success());
    client.disconnect();
    second.received();
}

// =============================================================================
// Precondition Tests
// =============================================================================

#[test]
fn test_run_without_connection() {
    let mut client = Client::default();

    let response = client.run("RX,Ready\r");

    assert!(!response.success());
    assert_eq!(response.message(), "");
    assert!(matches!(response.failure(), Some(MarkerError::NotConnected)));
}

#[test]
fn test_run_rejects_missing_prefix_before_sending() {
    let stub = spawn_stub(vec![]);
    let mut client = connected_client(&stub);

    let response = client.run("Ready\r");

    assert!(!response.success());
    assert!(response.message().contains("prefix"));
    assert!(matches!(response.failure(), Some(MarkerError::InvalidCommand(_))));
    assert!(client.is_connected());

    client.disconnect();
    assert!(stub.received().is_empty());
}

#[test]
fn test_run_rejects_missing_terminator_before_sending() {
    let stub = spawn_stub(vec![]);
    let mut client = connected_client(&stub);

    let response = client.run("RX,Ready");

    assert!(!response.success());
    assert!(response.message().contains("terminator"));
    assert!(matches!(response.failure(), Some(MarkerError::InvalidCommand(_))));

    client.disconnect();
    assert!(stub.received().is_empty());
}

#[test]
fn test_run_rejects_zero_timeout_override() {
    let stub = spawn_stub(vec![]);
    let mut client = connected_client(&stub);

    let response = client.run_with_timeout("RX,Ready\r", Duration::ZERO);

    assert!(matches!(response.failure(), Some(MarkerError::Config(_))));
    assert!(client.is_connected());

    client.disconnect();
    assert!(stub.received().is_empty());
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_run_ok_reply() {
    let stub = spawn_stub(vec![Reply::Text("RX,OK")]);
    let mut client = connected_client(&stub);

    let response = client.run("RX,Ready\r");

    assert!(response.success());
    assert_eq!(response.message(), "RX,OK");
    assert!(response.failure().is_none());

    client.disconnect();
    assert_eq!(stub.commands(), vec!["RX,Ready\r".to_string()]);
}

#[test]
fn test_run_device_error_reply() {
    let stub = spawn_stub(vec![Reply::Text("WX,NG,102\r")]);
    let mut client = connected_client(&stub);

    let response = client.run("WX,StartMarking\r");

    assert!(!response.success());
    assert_eq!(response.message(), "WX,NG,102\r");
    assert!(response.failure().is_none());
    assert!(client.is_connected());

    client.disconnect();
    stub.received();
}

#[test]
fn test_run_ok_with_wrong_prefix_is_failure() {
    let stub = spawn_stub(vec![Reply::Text("WX,OK")]);
    let mut client = connected_client(&stub);

    let response = client.run("RX,Ready\r");

    assert!(!response.success());
    assert_eq!(response.message(), "WX,OK");
    assert!(response.failure().is_none());

    client.disconnect();
    stub.received();
}

#[test]
fn test_sequential_commands_on_one_connection() {
    let stub = spawn_stub(vec![
        Reply::Text("RX,OK,1\r"),
        Reply::Text("WX,OK\r"),
        Reply::Text("RX,OK,0\r"),
    ]);
    let mut client = connected_client(&stub);

    assert_eq!(client.run("RX,Ready\r").message(), "RX,OK,1\r");
    assert!(client.run("WX,ErrorClear\r").success());
    assert_eq!(client.run("RX,Error\r").message(), "RX,OK,0\r");

    client.disconnect();
    assert_eq!(
        stub.commands(),
        vec!["RX,Ready\r", "WX,ErrorClear\r", "RX,Error\r"]
    );
}

#[test]
fn test_identical_replies_compare_equal() {
    let stub = spawn_stub(vec![Reply::Text("RX,OK,1"), Reply::Text("RX,OK,1")]);
    let mut client = connected_client(&stub);

    let first = client.run("RX,Ready\r");
    let second = client.run("RX,Ready\r");

    assert_eq!(first, second);
    client.disconnect();
    stub.received();
}

#[test]
fn test_non_ascii_sent_as_question_mark() {
    let stub = spawn_stub(vec![Reply::Text("WX,OK")]);
    let mut client = connected_client(&stub);

    client.run("WX,BLK=1,CharacterString=Ä\r");

    client.disconnect();
    assert_eq!(stub.received(), b"WX,BLK=1,CharacterString=?\r".to_vec());
}

// =============================================================================
// Transport Failure Tests
// =============================================================================

#[test]
fn test_receive_timeout_override_fails_and_disconnects() {
    let stub = spawn_stub(vec![Reply::Silent]);
    let mut client = connected_client(&stub);

    let started = Instant::now();
    let response = client.run_with_timeout("WX,StartMarking\r", Duration::from_millis(200));

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert!(!response.success());
    assert_eq!(response.message(), "");
    assert!(matches!(response.failure(), Some(MarkerError::Io(_))));
    assert!(!client.is_connected());

    let again = client.run("RX,Ready\r");
    assert!(matches!(again.failure(), Some(MarkerError::NotConnected)));

    stub.received();
}

#[test]
fn test_receive_timeout_override_applies_to_one_call_only() {
    // Second reply arrives after the override but well within the 2000ms default
    let stub = spawn_stub(vec![Reply::Text("RX,OK"), Reply::Delayed(700, "RX,OK")]);
    let mut client = connected_client(&stub);

    let short = client.run_with_timeout("RX,Ready\r", Duration::from_millis(300));
    assert!(short.success());

    let default = client.run("RX,Ready\r");
    assert!(default.success(), "{}", default);
    assert_eq!(default.message(), "RX,OK");
    assert!(client.is_connected());

    client.disconnect();
    assert_eq!(stub.commands(), vec!["RX,Ready\r", "RX,Ready\r"]);
}

#[test]
fn test_peer_hangup_yields_empty_failure() {
    let stub = spawn_stub(vec![Reply::Hangup]);
    let mut client = connected_client(&stub);

    let response = client.run("RX,Ready\r");

    assert!(!response.success());
    assert_eq!(response.message(), "");
    assert!(response.failure().is_none());
    assert!(!client.is_connected());

    assert_eq!(stub.commands(), vec!["RX,Ready\r".to_string()]);
}

// =============================================================================
// Shared Access Tests
// =============================================================================

#[test]
fn test_shared_client_serializes_exchanges() {
    let stub = spawn_stub(vec![Reply::Text("RX,OK"); 10]);
    let shared = SharedClient::new(Client::new(test_config(stub.port)));
    shared.connect("127.0.0.1").unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..5)
                    .map(|_| shared.run("RX,Ready\r"))
                    .all(|response| response.success() && response.message() == "RX,OK")
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }

    shared.disconnect();
    assert!(!shared.is_connected());
    assert_eq!(stub.commands().len(), 10);
}

#[test]
fn test_shared_client_with_client_batch() {
    let stub = spawn_stub(vec![Reply::Text("WX,OK"), Reply::Text("WX,OK")]);
    let shared: SharedClient = Client::new(test_config(stub.port)).into();
    shared.connect("127.0.0.1").unwrap();

    let both_ok = shared.with_client(|client| {
        client.run("WX,ProgramNo=1\r").success() && client.run("WX,StartMarking\r").success()
    });

    assert!(both_ok);
    shared.disconnect();
    stub.received();
}
