use std::fmt;
use thiserror::Error;

/// WebRTC signaling progress of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NegotiationState {
    #[default]
    Idle,
    Offering,
    Answered,
    IceExchanging,
    Established,
    Closed,
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: NegotiationState,
    pub to: NegotiationState,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{message} is not valid while {state}")]
pub struct NegotiationError {
    pub message: &'static str,
    pub state: NegotiationState,
}

/// Per-session signaling state machine.
///
/// Every method either returns the transition it made or rejects the message
/// without touching the state, so a rejected message can be dropped safely.
#[derive(Debug, Default)]
pub struct Negotiation {
    state: NegotiationState,
}

impl Negotiation {
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// True when an offer was already issued, so a new init is a renegotiation.
    pub fn is_renegotiation(&self) -> bool {
        !matches!(self.state, NegotiationState::Idle | NegotiationState::Closed)
    }

    /// A fresh offer was produced. Always accepted: browsers retry.
    pub fn offer(&mut self) -> Transition {
        self.move_to(NegotiationState::Offering)
    }

    /// Checks that a remote answer may be applied, without changing state.
    pub fn expect_answer(&self) -> Result<(), NegotiationError> {
        match self.state {
            NegotiationState::Offering => Ok(()),
            state => Err(NegotiationError {
                message: "answer",
                state,
            }),
        }
    }

    pub fn answer(&mut self) -> Result<Transition, NegotiationError> {
        self.expect_answer()?;
        Ok(self.move_to(NegotiationState::Answered))
    }

    /// Checks that a remote candidate may be forwarded, without changing state.
    pub fn expect_candidate(&self) -> Result<(), NegotiationError> {
        match self.state {
            NegotiationState::Offering
            | NegotiationState::Answered
            | NegotiationState::IceExchanging => Ok(()),
            state => Err(NegotiationError {
                message: "ice candidate",
                state,
            }),
        }
    }

    /// Accepts a remote candidate. Only the first candidate after the answer moves
    /// the state; candidates racing ahead of the answer leave it at `Offering`.
    pub fn candidate(&mut self) -> Result<Option<Transition>, NegotiationError> {
        self.expect_candidate()?;
        if self.state == NegotiationState::Answered {
            return Ok(Some(self.move_to(NegotiationState::IceExchanging)));
        }
        Ok(None)
    }

    /// Media stack reported the connection as up.
    pub fn establish(&mut self) -> Result<Transition, NegotiationError> {
        match self.state {
            NegotiationState::Answered | NegotiationState::IceExchanging => {
                Ok(self.move_to(NegotiationState::Established))
            }
            state => Err(NegotiationError {
                message: "connection established",
                state,
            }),
        }
    }

    /// Back to `Idle` after the media peer was lost without a replacement.
    /// Returns `None` if nothing was negotiated.
    pub fn reset(&mut self) -> Option<Transition> {
        if self.state == NegotiationState::Idle {
            return None;
        }
        Some(self.move_to(NegotiationState::Idle))
    }

    /// Returns `None` if the negotiation was already closed.
    pub fn close(&mut self) -> Option<Transition> {
        if self.state == NegotiationState::Closed {
            return None;
        }
        Some(self.move_to(NegotiationState::Closed))
    }

    fn move_to(&mut self, to: NegotiationState) -> Transition {
        let from = std::mem::replace(&mut self.state, to);
        Transition { from, to }
    }
}
