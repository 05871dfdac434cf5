use gamelink_core::{Packet, PacketType, SessionId};
use serde_json::json;

use crate::integration::{create_test_link, init_tracing};
use crate::utils::{
    EmulatorCall, change_player, failure_message, save_game, start_game, toggle_multitap,
    webrtc_init,
};

#[tokio::test]
async fn test_commands_before_start_fail() {
    init_tracing();
    let mut t = create_test_link();

    t.link.dispatch(webrtc_init("1", "s1")).await;
    t.link.dispatch(save_game("2", "s1")).await;
    t.link.dispatch(change_player("3", "s1", 0)).await;
    t.link.dispatch(toggle_multitap("4", "s1")).await;

    for id in ["2", "3", "4"] {
        let reply = t.output.reply_to(id).unwrap();
        assert!(failure_message(&reply).unwrap().contains("not in a room"));
    }
    assert!(t.emulator.calls().is_empty());
}

#[tokio::test]
async fn test_toggle_multitap_flips_flag() {
    init_tracing();
    let mut t = create_test_link();
    let s1 = SessionId::from("s1");

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.link.dispatch(toggle_multitap("2", "s1")).await;
    t.link.dispatch(toggle_multitap("3", "s1")).await;

    assert!(t.output.reply_to("2").unwrap().payload::<bool>().unwrap());
    assert!(!t.output.reply_to("3").unwrap().payload::<bool>().unwrap());
    assert!(!t.link.sessions().get(&s1).unwrap().multitap);
    assert!(
        t.emulator
            .calls()
            .ends_with(&[
                EmulatorCall::SetMultitap(s1.clone(), true),
                EmulatorCall::SetMultitap(s1, false),
            ])
    );
}

#[tokio::test]
async fn test_malformed_payload_is_reported() {
    init_tracing();
    let mut t = create_test_link();
    let packet = Packet::request("1", PacketType::CHANGE_PLAYER, &json!({ "id": "s1" })).unwrap();

    t.link.dispatch(packet).await;

    let reply = t.output.reply_to("1").unwrap();
    assert!(failure_message(&reply).is_some());
    assert!(t.link.sessions().is_empty());
}
