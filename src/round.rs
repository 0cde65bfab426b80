//! Round generation: pick the next quiz word and build its answer choices.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GameError;
use crate::words::{WordEntry, WordPool};

/// Upper bound on the number of choices offered per round.
pub const MAX_CHOICES: usize = 4;

/// Where wrong answers are drawn from.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistractorPolicy {
    /// Only words not yet used this lap. The choice count shrinks as the lap
    /// progresses.
    #[default]
    Unused,
    /// Any word other than the correct one. Always offers full rounds when
    /// the pool is large enough.
    AnyOther,
}

/// One prompt: a word and the translations offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub word_index: usize,
    pub word: WordEntry,
    pub choices: Vec<String>,
    pub selected: Option<String>,
    pub submitted: bool,
}

impl Round {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.word.translation
    }

    /// Position of the correct translation within `choices`.
    pub fn correct_position(&self) -> Option<usize> {
        self.choices.iter().position(|c| self.is_correct(c))
    }
}

/// Build the next round and record the chosen word in `used`.
///
/// When every word of the pool has been used, `used` is cleared first and a
/// new lap begins, so a session never stalls on a small pool.
pub fn next_round<R: Rng + ?Sized>(
    pool: &WordPool,
    used: &mut BTreeSet<usize>,
    policy: DistractorPolicy,
    rng: &mut R,
) -> Result<Round, GameError> {
    let size = pool.len();

    let mut available: Vec<usize> = (0..size).filter(|i| !used.contains(i)).collect();
    if available.is_empty() {
        tracing::debug!(pool_size = size, "lap complete, word pool recycled");
        used.clear();
        available = (0..size).collect();
    }

    let word_index = *available.choose(rng).ok_or(GameError::EmptyPool)?;
    let word = pool.get(word_index).ok_or(GameError::EmptyPool)?.clone();
    used.insert(word_index);

    let mut candidates = distractor_candidates(pool, used, word_index, policy);
    if candidates.is_empty() && policy == DistractorPolicy::Unused {
        // Last word of a lap: borrow already-seen words rather than offer a
        // single-choice round.
        candidates = distractor_candidates(pool, used, word_index, DistractorPolicy::AnyOther);
    }

    let k = candidates.len().min(MAX_CHOICES - 1);
    let mut choices: Vec<String> = candidates
        .choose_multiple(rng, k)
        .filter_map(|&i| pool.get(i))
        .map(|e| e.translation.clone())
        .collect();
    choices.push(word.translation.clone());
    choices.shuffle(rng);

    tracing::trace!(word_index, choices = choices.len(), "round generated");

    Ok(Round {
        word_index,
        word,
        choices,
        selected: None,
        submitted: false,
    })
}

fn distractor_candidates(
    pool: &WordPool,
    used: &BTreeSet<usize>,
    correct: usize,
    policy: DistractorPolicy,
) -> Vec<usize> {
    let Some(answer) = pool.get(correct).map(|e| e.translation.as_str()) else {
        return Vec::new();
    };
    pool.entries()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != correct)
        .filter(|&(i, _)| policy == DistractorPolicy::AnyOther || !used.contains(&i))
        // a homonym translation would make two choices correct
        .filter(|&(_, e)| e.translation != answer)
        .map(|(i, _)| i)
        .collect()
}
