use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// User-facing failures of playground operations. The variant is the error
/// kind, the `Display` text the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlaygroundError {
    #[error("playground {code} not found")]
    PlaygroundNotFound { code: String },

    #[error("player {username} not found in playground {code}")]
    PlayerNotFound { code: String, username: String },

    #[error("playground {code} is full")]
    PlaygroundFull { code: String },

    #[error("answers for round {round} already submitted")]
    AlreadySubmitted { round: u32 },

    #[error("round {round} has already been scored")]
    RoundClosed { round: u32 },

    #[error("playground {code} has no round in progress")]
    NotPlaying { code: String },

    #[error("playground {code} already has a game in progress")]
    GameInProgress { code: String },

    #[error("invalid round count {value}, expected 3, 5 or 7")]
    InvalidRounds { value: u32 },

    #[error("invalid round timer {value}, expected 30, 45 or 60 seconds")]
    InvalidTimer { value: u32 },

    #[error("username must not be empty")]
    InvalidUsername,

    #[error("could not allocate an unused join code")]
    CodesExhausted,

    #[error("too much concurrent activity on playground {code}")]
    Contention { code: String },

    #[error("storage failure: {message}")]
    Storage { message: String },
}
