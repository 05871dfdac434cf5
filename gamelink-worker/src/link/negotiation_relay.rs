use crate::error::DispatchError;
use crate::link::link::Link;
use crate::link::router::{HandlerResult, Reply};
use crate::transport::PeerKey;
use gamelink_core::{SessionId, SessionRequest, WebrtcAnswerRequest, WebrtcIceCandidateRequest};
use tracing::{debug, info, warn};

impl Link {
    pub(super) async fn webrtc_init(&mut self, request: SessionRequest) -> HandlerResult {
        let id = request.id;

        let session = self.sessions.get_or_create(&id);
        if session.negotiation.is_renegotiation() {
            info!(
                "Session {} asked for a new offer while {}, renegotiating",
                id,
                session.negotiation.state()
            );
        }

        session.media_generation += 1;
        let peer = PeerKey {
            session_id: id.clone(),
            generation: session.media_generation,
        };

        let sdp = match self.media.produce_offer(&peer, self.media_tx.clone()).await {
            Ok(sdp) => sdp,
            Err(e) => {
                // A renegotiation already tore the previous peer down.
                if let Some(t) = self.sessions.get_mut(&id)?.negotiation.reset() {
                    warn!("Session {} negotiation {} after failed offer", id, t);
                }
                return Err(e.into());
            }
        };

        let transition = self.sessions.get_mut(&id)?.negotiation.offer();
        debug!("Session {} negotiation {}", id, transition);
        Ok(Some(Reply::Offer(sdp)))
    }

    pub(super) async fn webrtc_answer(&mut self, request: WebrtcAnswerRequest) -> HandlerResult {
        let WebrtcAnswerRequest { id, sdp } = request;

        self.sessions
            .get(&id)?
            .negotiation
            .expect_answer()
            .map_err(|source| negotiation_error(&id, source))?;

        self.media.apply_answer(&id, sdp).await?;

        let transition = self
            .sessions
            .get_mut(&id)?
            .negotiation
            .answer()
            .map_err(|source| negotiation_error(&id, source))?;
        debug!("Session {} negotiation {}", id, transition);
        Ok(Some(Reply::Ack))
    }

    pub(super) async fn webrtc_ice_candidate(
        &mut self,
        request: WebrtcIceCandidateRequest,
    ) -> HandlerResult {
        let WebrtcIceCandidateRequest { id, candidate } = request;

        self.sessions
            .get(&id)?
            .negotiation
            .expect_candidate()
            .map_err(|source| negotiation_error(&id, source))?;

        self.media.add_ice_candidate(&id, candidate).await?;

        let transition = self
            .sessions
            .get_mut(&id)?
            .negotiation
            .candidate()
            .map_err(|source| negotiation_error(&id, source))?;
        if let Some(t) = transition {
            debug!("Session {} negotiation {}", id, t);
        }
        Ok(None)
    }

    pub(super) async fn terminate_session(&mut self, request: SessionRequest) -> HandlerResult {
        let id = request.id;

        if !self.sessions.contains(&id) {
            debug!("Session {} already terminated", id);
            return Ok(None);
        }

        self.quit_quietly(&id).await;
        self.release_session(&id).await;
        Ok(None)
    }
}

fn negotiation_error(
    session_id: &SessionId,
    source: crate::session::NegotiationError,
) -> DispatchError {
    DispatchError::Negotiation {
        session_id: session_id.clone(),
        source,
    }
}
