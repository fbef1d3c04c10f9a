use std::collections::BTreeMap;

use playground_types::{
    Category, JoinOutcome, LeaderboardEntry, Player, PlayerAnswers, Playground, PlaygroundError,
    PlaygroundStatus, RoundAdvance, RoundAnswers, RoundResultsRow,
};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringEngine;

/// A playground together with the player records it owns. This is the unit
/// the store persists and the unit every operation mutates atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub playground: Playground,
    pub players: Vec<Player>,
}

impl Session {
    /// Fresh session with the host auto-joined as first player.
    pub fn new(playground: Playground) -> Self {
        let host = Player::new(playground.host.clone(), playground.id);
        Self {
            players: vec![host],
            playground,
        }
    }

    pub fn player(&self, username: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.username == username)
    }

    fn player_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.username == username)
    }

    /// Add a player. Joining twice with the same username is a no-op.
    pub fn join(&mut self, username: &str, max_players: usize) -> Result<JoinOutcome, PlaygroundError> {
        if self.playground.is_member(username) {
            return Ok(JoinOutcome {
                playground_id: self.playground.id,
                already_member: true,
            });
        }
        if self.playground.player_names.len() >= max_players {
            return Err(PlaygroundError::PlaygroundFull {
                code: self.playground.code.clone(),
            });
        }

        self.playground.player_names.push(username.to_string());
        self.players
            .push(Player::new(username.to_string(), self.playground.id));

        Ok(JoinOutcome {
            playground_id: self.playground.id,
            already_member: false,
        })
    }

    /// Remove a player and their record. Returns whether anyone was removed;
    /// the playground itself survives even when the last player leaves.
    pub fn leave(&mut self, username: &str) -> bool {
        let was_member = self.playground.is_member(username);
        self.playground.player_names.retain(|name| name != username);
        self.players.retain(|player| player.username != username);
        was_member
    }

    /// Enter round 1 under `letter`. Allowed from waiting or finished;
    /// starting over a running game is rejected.
    pub fn start(&mut self, letter: char) -> Result<(), PlaygroundError> {
        if self.playground.status == PlaygroundStatus::Playing {
            return Err(PlaygroundError::GameInProgress {
                code: self.playground.code.clone(),
            });
        }

        self.playground.status = PlaygroundStatus::Playing;
        self.playground.current_round = 1;
        self.playground.current_letter = Some(letter);
        Ok(())
    }

    /// Record a player's answers for the current round. At most one entry
    /// per round per player.
    pub fn submit_answers(
        &mut self,
        username: &str,
        fields: BTreeMap<Category, String>,
    ) -> Result<u32, PlaygroundError> {
        if self.playground.status != PlaygroundStatus::Playing {
            return Err(PlaygroundError::NotPlaying {
                code: self.playground.code.clone(),
            });
        }

        let round = self.playground.current_round;
        let code = self.playground.code.clone();
        let player = self
            .player_mut(username)
            .ok_or(PlaygroundError::PlayerNotFound {
                code,
                username: username.to_string(),
            })?;

        if player.has_answered(round) {
            return Err(PlaygroundError::AlreadySubmitted { round });
        }

        player.answers.push(RoundAnswers { round, fields });
        Ok(round)
    }

    /// Score the current round and move on. Scoring runs against the
    /// pre-transition round and letter; only afterwards is the round
    /// incremented or the letter rerolled. On the final round the game
    /// finishes with round and letter frozen.
    pub fn advance(&mut self, next_letter: char) -> Result<RoundAdvance, PlaygroundError> {
        if self.playground.status != PlaygroundStatus::Playing {
            return Err(PlaygroundError::NotPlaying {
                code: self.playground.code.clone(),
            });
        }
        let Some(letter) = self.playground.current_letter else {
            return Err(PlaygroundError::NotPlaying {
                code: self.playground.code.clone(),
            });
        };

        let round = self.playground.current_round;
        let deltas = ScoringEngine::score_round(&self.players, round, letter);
        for player in &mut self.players {
            if let Some(delta) = deltas.get(&player.username) {
                player.score += delta;
            }
        }

        if self.playground.is_final_round() {
            self.playground.status = PlaygroundStatus::Finished;
            Ok(RoundAdvance::Finished)
        } else {
            self.playground.current_round += 1;
            self.playground.current_letter = Some(next_letter);
            Ok(RoundAdvance::Next {
                round: self.playground.current_round,
                letter: next_letter,
            })
        }
    }

    /// Clear every score and answer, then re-enter round 1 under `letter`.
    pub fn reset(&mut self, letter: char) {
        for player in &mut self.players {
            player.score = 0;
            player.answers.clear();
        }
        self.playground.status = PlaygroundStatus::Playing;
        self.playground.current_round = 1;
        self.playground.current_letter = Some(letter);
    }

    /// Standings ordered by descending score, ties broken by username.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut standings: Vec<&Player> = self.players.iter().collect();
        standings.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.username.cmp(&b.username))
        });

        standings
            .iter()
            .enumerate()
            .map(|(index, player)| LeaderboardEntry {
                username: player.username.clone(),
                score: player.score,
                rank: index as u32 + 1,
            })
            .collect()
    }

    /// Per-round answer table for every round reached so far.
    pub fn results(&self) -> Vec<RoundResultsRow> {
        (1..=self.playground.current_round)
            .map(|round| RoundResultsRow {
                round,
                answers: self
                    .players
                    .iter()
                    .filter_map(|player| {
                        player.round_answers(round).map(|entry| PlayerAnswers {
                            username: player.username.clone(),
                            fields: entry.fields.clone(),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    /// Whether the player already has an entry for the current round.
    pub fn has_submitted(&self, username: &str) -> Result<bool, PlaygroundError> {
        let round = self.playground.current_round;
        self.player(username)
            .map(|player| player.has_answered(round))
            .ok_or(PlaygroundError::PlayerNotFound {
                code: self.playground.code.clone(),
                username: username.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_types::{RoundCount, RoundTimer};
    use uuid::Uuid;

    fn test_session() -> Session {
        Session::new(Playground::new(
            Uuid::new_v4(),
            "ABC234".to_string(),
            "alice".to_string(),
            RoundCount::Three,
            RoundTimer::Thirty,
        ))
    }

    fn animal(answer: &str) -> BTreeMap<Category, String> {
        let mut fields = BTreeMap::new();
        fields.insert(Category::Animals, answer.to_string());
        fields
    }

    #[test]
    fn test_host_is_first_player() {
        let session = test_session();
        assert_eq!(session.players.len(), 1);
        assert_eq!(session.players[0].username, "alice");
        assert_eq!(session.players[0].score, 0);
    }

    #[test]
    fn test_join_is_idempotent_and_capacity_bounded() {
        let mut session = test_session();

        let outcome = session.join("bob", 5).unwrap();
        assert!(!outcome.already_member);
        let outcome = session.join("bob", 5).unwrap();
        assert!(outcome.already_member);
        assert_eq!(session.players.len(), 2);

        session.join("carol", 5).unwrap();
        session.join("dave", 5).unwrap();
        session.join("erin", 5).unwrap();
        assert_eq!(
            session.join("frank", 5),
            Err(PlaygroundError::PlaygroundFull {
                code: "ABC234".to_string()
            })
        );
    }

    #[test]
    fn test_leave_removes_membership_and_record() {
        let mut session = test_session();
        session.join("bob", 5).unwrap();

        assert!(session.leave("bob"));
        assert!(session.player("bob").is_none());
        assert!(!session.playground.is_member("bob"));

        // leaving a non-member is a no-op
        assert!(!session.leave("bob"));

        // the playground survives even when empty
        assert!(session.leave("alice"));
        assert!(session.players.is_empty());
    }

    #[test]
    fn test_start_enters_round_one() {
        let mut session = test_session();
        session.start('B').unwrap();

        assert_eq!(session.playground.status, PlaygroundStatus::Playing);
        assert_eq!(session.playground.current_round, 1);
        assert_eq!(session.playground.current_letter, Some('B'));

        assert_eq!(
            session.start('C'),
            Err(PlaygroundError::GameInProgress {
                code: "ABC234".to_string()
            })
        );
    }

    #[test]
    fn test_submit_rejects_duplicates_and_outsiders() {
        let mut session = test_session();
        session.start('B').unwrap();

        assert_eq!(session.submit_answers("alice", animal("bear")), Ok(1));
        assert_eq!(
            session.submit_answers("alice", animal("badger")),
            Err(PlaygroundError::AlreadySubmitted { round: 1 })
        );
        assert!(matches!(
            session.submit_answers("mallory", animal("bear")),
            Err(PlaygroundError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn test_submit_requires_a_running_game() {
        let mut session = test_session();
        assert!(matches!(
            session.submit_answers("alice", animal("bear")),
            Err(PlaygroundError::NotPlaying { .. })
        ));
    }

    #[test]
    fn test_advance_scores_before_moving_on() {
        let mut session = test_session();
        session.join("bob", 5).unwrap();
        session.start('B').unwrap();

        session.submit_answers("alice", animal("bear")).unwrap();
        session.submit_answers("bob", animal("badger")).unwrap();

        // Scoring must use round 1's letter even though the letter changes here.
        let advance = session.advance('Q').unwrap();
        assert_eq!(
            advance,
            RoundAdvance::Next {
                round: 2,
                letter: 'Q'
            }
        );
        assert_eq!(session.player("alice").unwrap().score, 10);
        assert_eq!(session.player("bob").unwrap().score, 10);
        assert_eq!(session.playground.current_letter, Some('Q'));
    }

    #[test]
    fn test_final_advance_freezes_round_and_letter() {
        let mut session = test_session();
        session.start('B').unwrap();
        assert!(matches!(session.advance('C'), Ok(RoundAdvance::Next { .. })));
        assert!(matches!(session.advance('D'), Ok(RoundAdvance::Next { .. })));

        let advance = session.advance('E').unwrap();
        assert_eq!(advance, RoundAdvance::Finished);
        assert!(advance.game_ended());
        assert_eq!(session.playground.status, PlaygroundStatus::Finished);
        assert_eq!(session.playground.current_round, 3);
        assert_eq!(session.playground.current_letter, Some('D'));

        assert!(matches!(
            session.advance('F'),
            Err(PlaygroundError::NotPlaying { .. })
        ));
    }

    #[test]
    fn test_reset_clears_scores_and_answers() {
        let mut session = test_session();
        session.start('B').unwrap();
        session.submit_answers("alice", animal("bear")).unwrap();
        session.advance('C').unwrap();
        assert_eq!(session.player("alice").unwrap().score, 10);

        session.reset('M');
        assert_eq!(session.player("alice").unwrap().score, 0);
        assert!(session.player("alice").unwrap().answers.is_empty());
        assert_eq!(session.playground.status, PlaygroundStatus::Playing);
        assert_eq!(session.playground.current_round, 1);
        assert_eq!(session.playground.current_letter, Some('M'));

        // behaves like a fresh start afterwards
        assert_eq!(session.submit_answers("alice", animal("mole")), Ok(1));
    }

    #[test]
    fn test_leaderboard_orders_by_score_then_name() {
        let mut session = test_session();
        session.join("bob", 5).unwrap();
        session.join("carol", 5).unwrap();
        session.player_mut("bob").unwrap().score = 20;
        session.player_mut("carol").unwrap().score = 20;
        session.player_mut("alice").unwrap().score = 5;

        let standings = session.leaderboard();
        assert_eq!(standings[0].username, "bob");
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].username, "carol");
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[2].username, "alice");
        assert_eq!(standings[2].rank, 3);
    }

    #[test]
    fn test_results_cover_every_round_reached() {
        let mut session = test_session();
        session.join("bob", 5).unwrap();
        session.start('B').unwrap();
        session.submit_answers("alice", animal("bear")).unwrap();
        session.advance('C').unwrap();
        session.submit_answers("bob", animal("cat")).unwrap();

        let results = session.results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].round, 1);
        assert_eq!(results[0].answers.len(), 1);
        assert_eq!(results[0].answers[0].username, "alice");
        assert_eq!(results[1].round, 2);
        assert_eq!(results[1].answers[0].username, "bob");
    }

    #[test]
    fn test_has_submitted_tracks_the_current_round() {
        let mut session = test_session();
        session.start('B').unwrap();

        assert_eq!(session.has_submitted("alice"), Ok(false));
        session.submit_answers("alice", animal("bear")).unwrap();
        assert_eq!(session.has_submitted("alice"), Ok(true));

        session.advance('C').unwrap();
        assert_eq!(session.has_submitted("alice"), Ok(false));

        assert!(matches!(
            session.has_submitted("mallory"),
            Err(PlaygroundError::PlayerNotFound { .. })
        ));
    }
}
