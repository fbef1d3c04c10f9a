use std::collections::BTreeMap;

use playground_core::Session;
use playground_types::{Category, Playground, RoundCount, RoundTimer};
use uuid::Uuid;

/// Creates a waiting session hosted by the first player, with the rest
/// already joined.
pub fn create_session(players: &[&str], rounds: RoundCount) -> Session {
    let playground = Playground::new(
        Uuid::new_v4(),
        "ABC234".to_string(),
        players[0].to_string(),
        rounds,
        RoundTimer::Thirty,
    );
    let mut session = Session::new(playground);
    for username in &players[1..] {
        session.join(username, 5).unwrap();
    }
    session
}

/// Creates a standard two-player session over three rounds.
pub fn create_standard_session() -> Session {
    create_session(&["alice", "bob"], RoundCount::Three)
}

/// Build an answer map from category/answer pairs.
pub fn fields(entries: &[(Category, &str)]) -> BTreeMap<Category, String> {
    entries
        .iter()
        .map(|(category, answer)| (*category, answer.to_string()))
        .collect()
}
