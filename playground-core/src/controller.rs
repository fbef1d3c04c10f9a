use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use playground_types::{
    Category, CreatedPlayground, JoinOutcome, LeaderboardEntry, Playground, PlaygroundError,
    PlaygroundSnapshot, PlaygroundStatus, RoundAdvance, RoundCount, RoundResultsRow, RoundTimer,
};

use crate::codes::{generate_code, normalize_code, random_letter};
use crate::events::{PlaygroundEvent, PlaygroundEventBus, PlaygroundEventHandler};
use crate::session::Session;
use crate::store::{SessionStore, StoreError, Versioned};

/// Tunables for the round controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub max_players: usize,
    pub code_length: usize,
    /// Join-code regeneration attempts before create gives up.
    pub create_retries: u32,
    /// Commit attempts per operation under concurrent modification.
    pub commit_retries: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_players: 5,
            code_length: 6,
            create_retries: 8,
            commit_retries: 8,
        }
    }
}

/// Owns the playground state machine. Every mutating operation is a
/// transactional read-modify-write against one playground: load a
/// versioned session, apply the pure transition, commit against the
/// revision that was read, and retry from fresh state on conflict.
pub struct RoundController<S, R = StdRng> {
    store: S,
    rng: Mutex<R>,
    events: Mutex<PlaygroundEventBus>,
    config: ControllerConfig,
}

impl<S: SessionStore> RoundController<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }
}

impl<S: SessionStore, R: Rng + Send> RoundController<S, R> {
    /// Build a controller around an injected random source; tests pass a
    /// seeded generator for reproducible letters and codes.
    pub fn with_rng(store: S, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
            events: Mutex::new(PlaygroundEventBus::new()),
            config: ControllerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying store, for owners that manage session lifetimes
    /// (e.g. purging abandoned playgrounds).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn add_event_handler(&self, handler: Box<dyn PlaygroundEventHandler>) {
        self.events.lock().await.add_handler(handler);
    }

    /// Create a playground in the waiting state with the host auto-joined.
    /// Join codes are regenerated a bounded number of times when they
    /// collide with an existing session.
    pub async fn create_playground(
        &self,
        host: &str,
        rounds: u32,
        timer: u32,
    ) -> Result<CreatedPlayground, PlaygroundError> {
        let host = validate_username(host)?;
        let rounds = RoundCount::try_from(rounds)?;
        let timer = RoundTimer::try_from(timer)?;

        for _ in 0..self.config.create_retries {
            let code = {
                let mut rng = self.rng.lock().await;
                generate_code(&mut *rng, self.config.code_length)
            };
            let playground = Playground::new(
                Uuid::new_v4(),
                code.clone(),
                host.to_string(),
                rounds,
                timer,
            );
            let playground_id = playground.id;

            match self.store.insert(Session::new(playground)).await {
                Ok(()) => {
                    info!(code = %code, host = %host, "playground created");
                    self.publish(PlaygroundEvent::Created {
                        code: code.clone(),
                        host: host.to_string(),
                    })
                    .await;
                    return Ok(CreatedPlayground {
                        playground_id,
                        code,
                    });
                }
                Err(StoreError::AlreadyExists { .. }) => continue, // collision, reroll
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(PlaygroundError::CodesExhausted)
    }

    /// Join a playground by code. Re-joining under the same username is a
    /// no-op reported through the outcome.
    pub async fn join(&self, code: &str, username: &str) -> Result<JoinOutcome, PlaygroundError> {
        let code = normalize_code(code);
        let username = validate_username(username)?.to_string();

        let max_players = self.config.max_players;
        let outcome = self
            .mutate(&code, |session| session.join(&username, max_players))
            .await?;

        if !outcome.already_member {
            debug!(code = %code, username = %username, "player joined");
            self.publish(PlaygroundEvent::PlayerJoined {
                code,
                username,
            })
            .await;
        }
        Ok(outcome)
    }

    /// Remove a player and their record. Leaving a playground one is not a
    /// member of is a no-op; the playground survives either way.
    pub async fn leave(&self, code: &str, username: &str) -> Result<bool, PlaygroundError> {
        let code = normalize_code(code);
        let removed = self
            .mutate(&code, |session| Ok(session.leave(username)))
            .await?;

        if removed {
            debug!(code = %code, username = %username, "player left");
            self.publish(PlaygroundEvent::PlayerLeft {
                code,
                username: username.to_string(),
            })
            .await;
        }
        Ok(removed)
    }

    /// Start the game: roll a fresh letter and enter round 1.
    pub async fn start_game(&self, code: &str) -> Result<char, PlaygroundError> {
        let code = normalize_code(code);
        let letter = self.roll_letter().await;

        self.mutate(&code, |session| session.start(letter)).await?;

        info!(code = %code, letter = %letter, "game started");
        self.publish(PlaygroundEvent::Started { code, letter }).await;
        Ok(letter)
    }

    /// Record a player's answers for the round currently in progress.
    /// The round observed on first load is pinned: when an advance commits
    /// underneath the submission, the retry sees a different round and the
    /// call fails with `RoundClosed` instead of landing in the wrong round.
    pub async fn submit_answers(
        &self,
        code: &str,
        username: &str,
        fields: BTreeMap<Category, String>,
    ) -> Result<u32, PlaygroundError> {
        let code = normalize_code(code);
        let username = validate_username(username)?.to_string();

        let mut pinned_round: Option<u32> = None;
        let round = self
            .mutate(&code, |session| {
                let current = session.playground.current_round;
                match pinned_round {
                    None => pinned_round = Some(current),
                    Some(seen) if seen != current => {
                        return Err(PlaygroundError::RoundClosed { round: seen });
                    }
                    Some(_) => {}
                }
                session.submit_answers(&username, fields.clone())
            })
            .await?;

        debug!(code = %code, username = %username, round, "answers submitted");
        self.publish(PlaygroundEvent::AnswersSubmitted {
            code,
            username,
            round,
        })
        .await;
        Ok(round)
    }

    /// Score the given round and move the playground forward. `round` is
    /// the round the caller watched expire; every client timer may fire
    /// this redundantly, and any trigger whose round token is stale
    /// resolves to `AlreadyAdvanced` without touching scores.
    pub async fn advance_round(
        &self,
        code: &str,
        round: u32,
    ) -> Result<RoundAdvance, PlaygroundError> {
        let code = normalize_code(code);
        let next_letter = self.roll_letter().await;

        let advance = self
            .mutate(&code, |session| {
                if session.playground.status == PlaygroundStatus::Waiting {
                    return Err(PlaygroundError::NotPlaying { code: code.clone() });
                }
                if session.playground.status == PlaygroundStatus::Finished
                    || session.playground.current_round != round
                {
                    return Ok(RoundAdvance::AlreadyAdvanced);
                }
                session.advance(next_letter)
            })
            .await?;

        match &advance {
            RoundAdvance::Next { round, letter } => {
                info!(code = %code, round, letter = %letter, "round advanced");
                self.publish(PlaygroundEvent::RoundAdvanced {
                    code,
                    round: *round,
                    letter: *letter,
                })
                .await;
            }
            RoundAdvance::Finished => {
                info!(code = %code, "game finished");
                self.publish(PlaygroundEvent::Finished { code }).await;
            }
            RoundAdvance::AlreadyAdvanced => {
                debug!(code = %code, round, "stale advance trigger ignored");
            }
        }
        Ok(advance)
    }

    /// Clear every score and answer, then restart at round 1 under a fresh
    /// letter.
    pub async fn reset_and_restart(&self, code: &str) -> Result<char, PlaygroundError> {
        let code = normalize_code(code);
        let letter = self.roll_letter().await;

        self.mutate(&code, |session| {
            session.reset(letter);
            Ok(())
        })
        .await?;

        info!(code = %code, letter = %letter, "game restarted");
        self.publish(PlaygroundEvent::Restarted { code, letter }).await;
        Ok(letter)
    }

    /// Full state snapshot for subscribers.
    pub async fn playground(&self, code: &str) -> Result<PlaygroundSnapshot, PlaygroundError> {
        let session = self.snapshot(code).await?;
        Ok(PlaygroundSnapshot {
            playground: session.playground,
            players: session.players,
        })
    }

    /// Standings ordered by descending score.
    pub async fn leaderboard(&self, code: &str) -> Result<Vec<LeaderboardEntry>, PlaygroundError> {
        Ok(self.snapshot(code).await?.leaderboard())
    }

    /// Per-round answer table.
    pub async fn results(&self, code: &str) -> Result<Vec<RoundResultsRow>, PlaygroundError> {
        Ok(self.snapshot(code).await?.results())
    }

    /// Whether the player already submitted for the current round.
    pub async fn has_player_submitted(
        &self,
        code: &str,
        username: &str,
    ) -> Result<bool, PlaygroundError> {
        self.snapshot(code).await?.has_submitted(username)
    }

    async fn snapshot(&self, code: &str) -> Result<Session, PlaygroundError> {
        let code = normalize_code(code);
        let Versioned { value, .. } = self.store.load(&code).await.map_err(map_store_error)?;
        Ok(value)
    }

    /// Transactional read-modify-write scoped to one playground: reload and
    /// re-apply on conflict, up to `commit_retries` attempts.
    async fn mutate<T>(
        &self,
        code: &str,
        mut apply: impl FnMut(&mut Session) -> Result<T, PlaygroundError>,
    ) -> Result<T, PlaygroundError> {
        for _ in 0..self.config.commit_retries {
            let Versioned {
                revision,
                value: mut session,
            } = self.store.load(code).await.map_err(map_store_error)?;

            let outcome = apply(&mut session)?;

            match self.store.commit(code, revision, session).await {
                Ok(()) => return Ok(outcome),
                Err(StoreError::Conflict { .. }) => continue,
                Err(error) => return Err(map_store_error(error)),
            }
        }

        Err(PlaygroundError::Contention {
            code: code.to_string(),
        })
    }

    async fn roll_letter(&self) -> char {
        let mut rng = self.rng.lock().await;
        random_letter(&mut *rng)
    }

    async fn publish(&self, event: PlaygroundEvent) {
        self.events.lock().await.publish(event);
    }
}

fn validate_username(username: &str) -> Result<&str, PlaygroundError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(PlaygroundError::InvalidUsername);
    }
    Ok(trimmed)
}

fn map_store_error(error: StoreError) -> PlaygroundError {
    match error {
        StoreError::NotFound { code } => PlaygroundError::PlaygroundNotFound { code },
        StoreError::Backend { message } => PlaygroundError::Storage { message },
        // Collisions and conflicts are handled at their call sites; anything
        // that leaks through is reported as a storage fault.
        other => PlaygroundError::Storage {
            message: other.to_string(),
        },
    }
}
