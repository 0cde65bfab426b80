//! The quiz session controller: lifecycle, scoring and timing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::clock::Clock;
use crate::error::{GameError, Operation};
use crate::round::{next_round, DistractorPolicy, Round};
use crate::words::WordPool;

pub const DEFAULT_SESSION_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Rounds per session, capped by the pool size.
    pub session_length: usize,
    pub distractors: DistractorPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_length: DEFAULT_SESSION_LENGTH,
            distractors: DistractorPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub started: bool,
    pub round_index: usize,
    pub score: usize,
    pub start_time: Option<SystemTime>,
    /// Pool indices already presented in the current lap.
    pub used_indices: BTreeSet<usize>,
    pub current_round: Option<Round>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingChoice,
    Submitted,
    Finished,
}

/// Outcome of a submission. `answer` is the correct translation, reported
/// whether or not the choice was right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: usize,
    pub session_limit: usize,
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn is_perfect(&self) -> bool {
        self.session_limit > 0 && self.score == self.session_limit
    }
}

/// One player's play-through. Each instance owns its state, so independent
/// sessions can coexist; see [`crate::registry`] for sharing across threads.
#[derive(Debug)]
pub struct Session {
    pool: Arc<WordPool>,
    settings: SessionSettings,
    state: SessionState,
    rng: StdRng,
    clock: Clock,
}

impl Session {
    pub fn new(pool: Arc<WordPool>, settings: SessionSettings) -> Self {
        Self {
            pool,
            settings,
            state: SessionState::default(),
            rng: StdRng::from_entropy(),
            clock: Clock::System,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Begin a session. Does nothing if one is already running.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state.started {
            return Ok(());
        }
        if self.pool.is_empty() {
            return Err(GameError::EmptyPool);
        }

        let mut state = SessionState {
            started: true,
            start_time: Some(self.clock.now()),
            ..SessionState::default()
        };
        if self.session_limit() > 0 {
            let round = next_round(
                &self.pool,
                &mut state.used_indices,
                self.settings.distractors,
                &mut self.rng,
            )?;
            state.current_round = Some(round);
        }
        self.state = state;

        tracing::debug!(
            pool_size = self.pool.len(),
            session_limit = self.session_limit(),
            "session started"
        );
        Ok(())
    }

    /// Score `choice` against the current round.
    pub fn submit(&mut self, choice: &str) -> Result<Verdict, GameError> {
        let round = self
            .state
            .current_round
            .as_mut()
            .ok_or_else(|| GameError::invalid(Operation::Submit, "no active round"))?;
        if round.submitted {
            return Err(GameError::invalid(
                Operation::Submit,
                "round already submitted",
            ));
        }

        round.submitted = true;
        round.selected = Some(choice.to_string());
        let correct = round.is_correct(choice);
        let answer = round.word.translation.clone();
        if correct {
            self.state.score += 1;
        }

        tracing::debug!(
            round = self.state.round_index,
            correct,
            score = self.state.score,
            "answer submitted"
        );
        Ok(Verdict { correct, answer })
    }

    /// Move past a submitted round, either to a fresh round or to the end of
    /// the session.
    pub fn advance(&mut self) -> Result<(), GameError> {
        match &self.state.current_round {
            None => return Err(GameError::invalid(Operation::Advance, "no active round")),
            Some(round) if !round.submitted => {
                return Err(GameError::invalid(
                    Operation::Advance,
                    "round not submitted",
                ))
            }
            Some(_) => {}
        }

        let next_index = self.state.round_index + 1;
        let next = if next_index < self.session_limit() {
            Some(next_round(
                &self.pool,
                &mut self.state.used_indices,
                self.settings.distractors,
                &mut self.rng,
            )?)
        } else {
            None
        };

        self.state.round_index = next_index;
        self.state.current_round = next;

        if self.is_finished() {
            tracing::info!(
                score = self.state.score,
                session_limit = self.session_limit(),
                elapsed_secs = self.elapsed().as_secs(),
                "session finished"
            );
        }
        Ok(())
    }

    /// Back to idle, discarding all progress.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }

    pub fn is_finished(&self) -> bool {
        self.state.started && self.state.round_index >= self.session_limit()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.state.started, self.state.start_time) {
            (true, Some(start)) => self.clock.since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn session_limit(&self) -> usize {
        self.settings.session_length.min(self.pool.len())
    }

    pub fn phase(&self) -> Phase {
        if !self.state.started {
            Phase::Idle
        } else if self.is_finished() {
            Phase::Finished
        } else {
            match &self.state.current_round {
                Some(round) if round.submitted => Phase::Submitted,
                _ => Phase::AwaitingChoice,
            }
        }
    }

    /// Completed rounds as a fraction of the session, for progress bars.
    pub fn progress(&self) -> f64 {
        match self.session_limit() {
            0 => 0.0,
            limit => self.state.round_index.min(limit) as f64 / limit as f64,
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.is_finished().then(|| SessionSummary {
            score: self.state.score,
            session_limit: self.session_limit(),
            elapsed: self.elapsed(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.state.current_round.as_ref()
    }

    pub fn score(&self) -> usize {
        self.state.score
    }

    pub fn round_index(&self) -> usize {
        self.state.round_index
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }
}
