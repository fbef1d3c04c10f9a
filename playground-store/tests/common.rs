use std::collections::BTreeMap;
use std::sync::Arc;

use playground_core::RoundController;
use playground_store::MemoryStore;
use playground_types::Category;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type TestController = RoundController<MemoryStore, ChaCha8Rng>;

/// Controller over a fresh in-memory store with a seeded random source.
pub fn seeded_controller() -> Arc<TestController> {
    Arc::new(RoundController::with_rng(
        MemoryStore::new(),
        ChaCha8Rng::seed_from_u64(7),
    ))
}

/// Build an answer map from category/answer pairs.
pub fn fields(entries: &[(Category, &str)]) -> BTreeMap<Category, String> {
    entries
        .iter()
        .map(|(category, answer)| (*category, answer.to_string()))
        .collect()
}

/// An answer guaranteed to start with the round letter.
pub fn starting_with(letter: char, suffix: &str) -> String {
    format!("{}{}", letter.to_ascii_lowercase(), suffix)
}

/// Any letter other than the round letter.
pub fn other_letter(letter: char) -> char {
    if letter == 'A' { 'B' } else { 'A' }
}

/// Create a playground hosted by the first player and join the rest.
pub async fn playground_with_players(
    controller: &TestController,
    players: &[&str],
    rounds: u32,
    timer: u32,
) -> String {
    let created = controller
        .create_playground(players[0], rounds, timer)
        .await
        .unwrap();
    for username in &players[1..] {
        controller.join(&created.code, username).await.unwrap();
    }
    created.code
}
