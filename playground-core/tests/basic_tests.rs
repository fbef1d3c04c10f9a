mod common;

use common::*;
use playground_core::{ScoringEngine, Session};
use playground_types::{Category, PlaygroundStatus, RoundAdvance, RoundCount};

#[test]
fn test_session_creation() {
    let session = create_standard_session();
    assert_eq!(session.players.len(), 2);
    assert_eq!(session.playground.status, PlaygroundStatus::Waiting);
    assert_eq!(session.playground.current_round, 0);
    assert_eq!(session.playground.current_letter, None);
}

#[test]
fn test_scoring_engine_uniqueness_rule() {
    let mut session = create_standard_session();
    session.start('B').unwrap();
    session
        .submit_answers("alice", fields(&[(Category::Animals, "bear")]))
        .unwrap();
    session
        .submit_answers("bob", fields(&[(Category::Animals, "bison")]))
        .unwrap();

    let deltas = ScoringEngine::score_round(&session.players, 1, 'B');
    assert_eq!(deltas["alice"], 10);
    assert_eq!(deltas["bob"], 10);
}

#[test]
fn test_full_game_through_the_session_api() {
    let mut session = create_session(&["alice", "bob", "carol"], RoundCount::Three);
    session.start('B').unwrap();

    session
        .submit_answers("alice", fields(&[(Category::Fruits, "banana")]))
        .unwrap();
    session
        .submit_answers("bob", fields(&[(Category::Fruits, "banana")]))
        .unwrap();

    assert!(matches!(
        session.advance('C'),
        Ok(RoundAdvance::Next { round: 2, .. })
    ));
    assert!(matches!(session.advance('D'), Ok(RoundAdvance::Next { .. })));
    assert_eq!(session.advance('E'), Ok(RoundAdvance::Finished));

    assert_eq!(session.playground.status, PlaygroundStatus::Finished);
    let standings = session.leaderboard();
    assert_eq!(standings[0].score, 5);
    assert_eq!(standings[1].score, 5);
    assert_eq!(standings[2].score, 0);
}

#[test]
fn test_sessions_survive_serde() {
    let session = create_standard_session();
    let json = serde_json::to_string(&session).unwrap();
    let back: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(back.playground.code, session.playground.code);
    assert_eq!(back.players.len(), session.players.len());
}
