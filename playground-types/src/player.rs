use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::playground::PlaygroundId;

/// The fixed category set, identical across all playgrounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BoysNames,
    GirlsNames,
    Animals,
    Fruits,
    Countries,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::BoysNames,
        Category::GirlsNames,
        Category::Animals,
        Category::Fruits,
        Category::Countries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BoysNames => "boys_names",
            Category::GirlsNames => "girls_names",
            Category::Animals => "animals",
            Category::Fruits => "fruits",
            Category::Countries => "countries",
        }
    }
}

/// Answers one player submitted for one round.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundAnswers {
    pub round: u32,
    pub fields: BTreeMap<Category, String>,
}

/// One participant of a playground. Created on join, deleted on leave.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub username: String,
    pub playground_id: PlaygroundId,
    /// Accumulated points, cleared only by an explicit reset.
    pub score: u32,
    /// At most one entry per round.
    pub answers: Vec<RoundAnswers>,
}

impl Player {
    pub fn new(username: String, playground_id: PlaygroundId) -> Self {
        Self {
            username,
            playground_id,
            score: 0,
            answers: Vec::new(),
        }
    }

    pub fn round_answers(&self, round: u32) -> Option<&RoundAnswers> {
        self.answers.iter().find(|entry| entry.round == round)
    }

    pub fn has_answered(&self, round: u32) -> bool {
        self.round_answers(round).is_some()
    }
}
