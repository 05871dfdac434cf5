use gamelink_core::{PacketType, SessionId};
use gamelink_worker::NegotiationState;

use crate::integration::{create_test_link, init_tracing};
use crate::utils::{MediaCall, failure_message, ice_candidate, webrtc_answer, webrtc_init};

#[tokio::test]
async fn test_offer_answer_ice_sequence() {
    init_tracing();
    let mut t = create_test_link();
    let s1 = SessionId::from("s1");

    t.link.dispatch(webrtc_init("1", "s1")).await;

    let offer = t.output.reply_to("1").expect("offer reply");
    assert_eq!(offer.t, PacketType::WEBRTC_INIT);
    assert_eq!(offer.payload::<String>().unwrap(), "offer-s1-1");
    assert_eq!(
        t.link.sessions().get(&s1).unwrap().negotiation.state(),
        NegotiationState::Offering
    );

    t.link.dispatch(webrtc_answer("2", "s1", "v=0 answer")).await;

    let ack = t.output.reply_to("2").expect("answer ack");
    assert!(failure_message(&ack).is_none());
    assert_eq!(
        t.link.sessions().get(&s1).unwrap().negotiation.state(),
        NegotiationState::Answered
    );

    for candidate in ["c1", "c2", "c3"] {
        t.link.dispatch(ice_candidate("s1", candidate)).await;
    }

    assert_eq!(t.media.candidates_for(&s1), vec!["c1", "c2", "c3"]);
    assert_eq!(
        t.link.sessions().get(&s1).unwrap().negotiation.state(),
        NegotiationState::IceExchanging
    );

    // Candidates are uncorrelated, nothing goes back for them.
    assert_eq!(t.output.packets().len(), 2);
    assert_eq!(
        t.media.calls()[..2],
        [
            MediaCall::Offer(s1.clone()),
            MediaCall::Answer(s1.clone(), "v=0 answer".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_candidates_before_answer_are_applied() {
    init_tracing();
    let mut t = create_test_link();
    let s1 = SessionId::from("s1");

    t.link.dispatch(webrtc_init("1", "s1")).await;
    t.link.dispatch(ice_candidate("s1", "early")).await;

    assert_eq!(t.media.candidates_for(&s1), vec!["early"]);
    assert_eq!(
        t.link.sessions().get(&s1).unwrap().negotiation.state(),
        NegotiationState::Offering
    );

    t.link.dispatch(webrtc_answer("2", "s1", "v=0 answer")).await;
    assert_eq!(
        t.link.sessions().get(&s1).unwrap().negotiation.state(),
        NegotiationState::Answered
    );
}

#[tokio::test]
async fn test_media_failure_on_offer_is_reported() {
    init_tracing();
    let mut t = create_test_link();
    t.media.set_fail_offer(true);

    t.link.dispatch(webrtc_init("1", "s1")).await;

    let reply = t.output.reply_to("1").expect("failure reply");
    assert!(failure_message(&reply).unwrap().contains("mock offer failure"));
    assert_eq!(
        t.link
            .sessions()
            .get(&SessionId::from("s1"))
            .unwrap()
            .negotiation
            .state(),
        NegotiationState::Idle
    );
}
