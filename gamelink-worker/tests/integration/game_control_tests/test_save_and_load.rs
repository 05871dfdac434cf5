use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use bytes::Bytes;
use gamelink_core::{SaveGameResponse, SessionId};

use crate::integration::{create_test_link, init_tracing};
use crate::utils::{EmulatorCall, failure_message, load_game, save_game, start_game};

#[tokio::test]
async fn test_save_returns_encoded_state() {
    init_tracing();
    let mut t = create_test_link();

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.link.dispatch(save_game("2", "s1")).await;

    let saved: SaveGameResponse = t.output.reply_to("2").unwrap().payload().unwrap();
    assert_eq!(saved.state, BASE64_STANDARD.encode(b"mock-state"));
}

#[tokio::test]
async fn test_load_passes_decoded_state_to_emulator() {
    init_tracing();
    let mut t = create_test_link();
    let state = BASE64_STANDARD.encode(b"level-3");

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.link.dispatch(load_game("2", "s1", &state)).await;

    assert!(failure_message(&t.output.reply_to("2").unwrap()).is_none());
    assert!(t.emulator.calls().contains(&EmulatorCall::Load(
        SessionId::from("s1"),
        Bytes::from_static(b"level-3")
    )));
}

#[tokio::test]
async fn test_load_rejects_malformed_state() {
    init_tracing();
    let mut t = create_test_link();

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.link.dispatch(load_game("2", "s1", "%%% not base64")).await;

    let reply = t.output.reply_to("2").unwrap();
    assert!(failure_message(&reply).unwrap().contains("malformed save state"));
    assert!(
        !t.emulator
            .calls()
            .iter()
            .any(|c| matches!(c, EmulatorCall::Load(..)))
    );
}

#[tokio::test]
async fn test_save_failure_is_reported() {
    init_tracing();
    let mut t = create_test_link();
    t.emulator.set_fail_save(true);

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.link.dispatch(save_game("2", "s1")).await;

    let reply = t.output.reply_to("2").unwrap();
    assert!(failure_message(&reply).unwrap().contains("mock save failure"));
}
