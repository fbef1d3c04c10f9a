use playground_types::{Category, Player};
use std::collections::HashMap;

/// Points for a valid answer nobody else matched.
pub const UNIQUE_ANSWER_POINTS: u32 = 10;
/// Points per player when two or more collide on the same valid answer.
pub const SHARED_ANSWER_POINTS: u32 = 5;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Compute per-player score deltas for one completed round.
    ///
    /// Answers are compared after normalization; a group only scores when
    /// its text starts with the round letter. The 10-to-5 reduction applies
    /// per colliding group within a category, so the same player can take
    /// full points in one category and shared points in another.
    pub fn score_round(players: &[Player], round: u32, letter: char) -> HashMap<String, u32> {
        let letter = letter.to_ascii_lowercase();

        // Group players by identical normalized answer within each category.
        let mut groups: HashMap<(Category, String), Vec<&str>> = HashMap::new();
        for player in players {
            let Some(entry) = player.round_answers(round) else {
                continue;
            };
            for (category, raw) in &entry.fields {
                let normalized = normalize_answer(raw);
                if normalized.is_empty() {
                    continue; // whitespace-only counts as no answer
                }
                groups
                    .entry((*category, normalized))
                    .or_default()
                    .push(&player.username);
            }
        }

        let mut deltas: HashMap<String, u32> = players
            .iter()
            .filter(|player| player.round_answers(round).is_some())
            .map(|player| (player.username.clone(), 0))
            .collect();

        for ((_, answer), usernames) in &groups {
            if !answer.starts_with(letter) {
                continue;
            }
            let points = if usernames.len() == 1 {
                UNIQUE_ANSWER_POINTS
            } else {
                SHARED_ANSWER_POINTS
            };
            for username in usernames {
                if let Some(delta) = deltas.get_mut(*username) {
                    *delta += points;
                }
            }
        }

        deltas
    }
}

/// Answers are compared trimmed and lower-cased.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}
