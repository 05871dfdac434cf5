use gamelink_core::SessionId;

use crate::integration::{create_test_link, init_tracing};
use crate::utils::{change_player, failure_message, start_game, toggle_multitap};

#[tokio::test]
async fn test_failed_player_change_keeps_index() {
    init_tracing();
    let mut t = create_test_link();
    let s1 = SessionId::from("s1");

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.emulator.set_fail_set_player(true);
    t.link.dispatch(change_player("2", "s1", 1)).await;

    let reply = t.output.reply_to("2").unwrap();
    assert!(failure_message(&reply).unwrap().contains("mock input remap failure"));
    assert_eq!(t.link.sessions().get(&s1).unwrap().player_index, 0);
    assert!(t.link.sessions().get(&s1).unwrap().room_id.is_some());
}

#[tokio::test]
async fn test_failed_multitap_toggle_keeps_flag() {
    init_tracing();
    let mut t = create_test_link();
    let s1 = SessionId::from("s1");

    t.link.dispatch(start_game("1", "s1", Some("r1"))).await;
    t.emulator.set_fail_multitap(true);
    t.link.dispatch(toggle_multitap("2", "s1")).await;

    let reply = t.output.reply_to("2").unwrap();
    assert!(failure_message(&reply).unwrap().contains("mock multitap failure"));
    assert!(!t.link.sessions().get(&s1).unwrap().multitap);

    t.emulator.set_fail_multitap(false);
    t.link.dispatch(toggle_multitap("3", "s1")).await;
    assert!(t.output.reply_to("3").unwrap().payload::<bool>().unwrap());
    assert!(t.link.sessions().get(&s1).unwrap().multitap);
}
