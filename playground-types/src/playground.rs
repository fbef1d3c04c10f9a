use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::PlaygroundError;

pub type PlaygroundId = Uuid;

/// One game session, identified by its human-enterable join code.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Playground {
    pub id: PlaygroundId,
    /// Join key, uppercase, immutable after creation.
    pub code: String,
    /// Username of the creating player.
    pub host: String,
    /// Ordered, unique, capacity-bounded participant usernames.
    pub player_names: Vec<String>,
    pub status: PlaygroundStatus,
    pub rounds: RoundCount,
    pub timer: RoundTimer,
    /// 0 while waiting, 1..=rounds while playing or finished.
    pub current_round: u32,
    /// Set at the start of each round; `None` before the game starts.
    pub current_letter: Option<char>,
    pub created_at: String, // ISO 8601 string
}

impl Playground {
    pub fn new(
        id: PlaygroundId,
        code: String,
        host: String,
        rounds: RoundCount,
        timer: RoundTimer,
    ) -> Self {
        Self {
            id,
            code,
            player_names: vec![host.clone()],
            host,
            status: PlaygroundStatus::Waiting,
            rounds,
            timer,
            current_round: 0,
            current_letter: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_member(&self, username: &str) -> bool {
        self.player_names.iter().any(|name| name == username)
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.rounds.total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PlaygroundStatus {
    Waiting,  // Lobby open, host has not started yet
    Playing,  // Rounds in progress
    Finished, // All rounds scored, final standings frozen
}

/// Total round count, restricted to the configurable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundCount {
    Three,
    Five,
    Seven,
}

impl RoundCount {
    pub fn total(&self) -> u32 {
        match self {
            RoundCount::Three => 3,
            RoundCount::Five => 5,
            RoundCount::Seven => 7,
        }
    }
}

impl TryFrom<u32> for RoundCount {
    type Error = PlaygroundError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(RoundCount::Three),
            5 => Ok(RoundCount::Five),
            7 => Ok(RoundCount::Seven),
            _ => Err(PlaygroundError::InvalidRounds { value }),
        }
    }
}

/// Seconds allotted per round, restricted to the configurable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundTimer {
    Thirty,
    FortyFive,
    Sixty,
}

impl RoundTimer {
    pub fn seconds(&self) -> u32 {
        match self {
            RoundTimer::Thirty => 30,
            RoundTimer::FortyFive => 45,
            RoundTimer::Sixty => 60,
        }
    }
}

impl TryFrom<u32> for RoundTimer {
    type Error = PlaygroundError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(RoundTimer::Thirty),
            45 => Ok(RoundTimer::FortyFive),
            60 => Ok(RoundTimer::Sixty),
            _ => Err(PlaygroundError::InvalidTimer { value }),
        }
    }
}
