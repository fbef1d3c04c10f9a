use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::player::{Category, Player};
use crate::playground::{Playground, PlaygroundId};

/// Result of creating a playground: the storage id plus the join code
/// the host shares with other players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedPlayground {
    pub playground_id: PlaygroundId,
    pub code: String,
}

/// Result of joining a playground. Joining twice with the same username
/// is a no-op reported through `already_member`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JoinOutcome {
    pub playground_id: PlaygroundId,
    pub already_member: bool,
}

/// Result of advancing a round. Redundant triggers for an already-scored
/// round resolve to `AlreadyAdvanced`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundAdvance {
    Next { round: u32, letter: char },
    Finished,
    AlreadyAdvanced,
}

impl RoundAdvance {
    pub fn game_ended(&self) -> bool {
        matches!(self, RoundAdvance::Finished)
    }
}

/// Full state streamed to subscribers by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlaygroundSnapshot {
    pub playground: Playground,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub rank: u32,
}

/// One player's row in the per-round results table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerAnswers {
    pub username: String,
    pub fields: BTreeMap<Category, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundResultsRow {
    pub round: u32,
    pub answers: Vec<PlayerAnswers>,
}
