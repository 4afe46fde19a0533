//! Word-guess session: target selection, guess evaluation, letter
//! elimination, and hint reveals.
//!
//! ## Rules
//!
//! The session picks one target from the configured word list. Each
//! accepted guess is scored per position; letters the target lacks feed a
//! monotone eliminated set the host greys out on its keyboard. Matching
//! the target wins; exhausting the guess budget loses. Hints reveal the
//! letter at a position no guess has confirmed yet, spending one from the
//! shared budget.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{GameRng, SessionStatus};
use crate::games::{award_xp, spend_hint, HintError};
use crate::progress::{ProgressLedger, ProgressStore};

use super::feedback::{self, GuessFeedback, LetterMark};

/// Experience granted for starting a session.
pub const SESSION_START_XP: u64 = 10;

/// Experience granted for guessing the target.
pub const WIN_XP: u64 = 50;

/// Word list used when the host does not supply one.
pub const DEFAULT_WORD_LIST: [&str; 5] = ["apple", "grape", "peach", "lemon", "melon"];

/// Session parameters.
#[derive(Clone, Debug)]
pub struct WordGuessConfig {
    /// Candidate targets. Entries are lowercased when picked.
    pub word_list: Vec<String>,
    /// Guesses allowed before the session is lost.
    pub max_guesses: usize,
}

impl Default for WordGuessConfig {
    fn default() -> Self {
        Self {
            word_list: DEFAULT_WORD_LIST.iter().map(|w| (*w).to_string()).collect(),
            max_guesses: 6,
        }
    }
}

/// The configured word list was empty, so no target could be drawn.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("word list is empty")]
pub struct EmptyWordList;

/// A guess was refused. The session is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    #[error("guess must be {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("the session is already over")]
    SessionOver,
}

/// Outcome of an accepted guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReport {
    /// Score for the guess just made.
    pub feedback: GuessFeedback,
    /// Session state after the guess.
    pub status: SessionStatus,
    /// Experience granted by this guess (non-zero only on the win).
    pub xp_awarded: u64,
}

/// A hint reveal: the target letter at a position no guess has confirmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintReveal {
    /// Zero-based position in the target word.
    pub position: usize,
    /// The letter at that position.
    pub letter: char,
    /// Hint budget left after this reveal.
    pub hints_remaining: u32,
}

/// Render-ready view of a word-guess session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGuessSnapshot {
    /// Scored guesses, oldest first.
    pub rows: Vec<GuessFeedback>,
    /// Letters in the target word.
    pub word_length: usize,
    /// Guesses left before the session is lost.
    pub guesses_remaining: usize,
    /// Letters proven absent from the target, sorted.
    pub eliminated: Vec<char>,
    /// Session state.
    pub status: SessionStatus,
}

/// A single word-guess session.
#[derive(Clone, Debug)]
pub struct WordGuessGame {
    target: String,
    guesses: Vector<GuessFeedback>,
    eliminated: FxHashSet<char>,
    max_guesses: usize,
    status: SessionStatus,
    rng: GameRng,
}

impl WordGuessGame {
    /// Start a session: draw a target and grant the session-start award.
    pub fn start<S: ProgressStore>(
        config: WordGuessConfig,
        seed: u64,
        ledger: &mut ProgressLedger<S>,
    ) -> Result<Self, EmptyWordList> {
        let mut rng = GameRng::new(seed);
        let target = rng.choose(&config.word_list).ok_or(EmptyWordList)?.to_lowercase();
        debug!(seed, length = target.chars().count(), "word guess session started");

        award_xp(ledger, SESSION_START_XP);

        Ok(Self {
            target,
            guesses: Vector::new(),
            eliminated: FxHashSet::default(),
            max_guesses: config.max_guesses,
            status: SessionStatus::InProgress,
            rng,
        })
    }

    /// Score a guess against the target.
    ///
    /// Rejects without mutation when the session is over or the guess has
    /// the wrong letter count. An accepted guess joins the history, feeds
    /// the eliminated set, and may end the session either way.
    pub fn submit_guess<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
        candidate: &str,
    ) -> Result<GuessReport, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::SessionOver);
        }

        let candidate = candidate.to_lowercase();
        let expected = self.target.chars().count();
        let actual = candidate.chars().count();
        if actual != expected {
            return Err(GuessError::WrongLength { expected, actual });
        }

        let feedback = feedback::score(&candidate, &self.target);
        for (ch, mark) in candidate.chars().zip(feedback.marks.iter()) {
            if *mark == LetterMark::Absent {
                self.eliminated.insert(ch);
            }
        }
        self.guesses.push_back(feedback.clone());

        let mut xp_awarded = 0;
        if candidate == self.target {
            self.status = SessionStatus::Won;
            award_xp(ledger, WIN_XP);
            xp_awarded = WIN_XP;
            debug!(guesses = self.guesses.len(), "word guess won");
        } else if self.guesses.len() >= self.max_guesses {
            self.status = SessionStatus::Lost;
            debug!("word guess lost");
        }

        Ok(GuessReport {
            feedback,
            status: self.status,
            xp_awarded,
        })
    }

    /// Reveal the letter at a random position no guess has confirmed.
    ///
    /// Spends one hint on success. Positions revealed by earlier hints
    /// stay eligible until a guess actually lands the letter there.
    pub fn request_hint<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
    ) -> Result<HintReveal, HintError> {
        if self.status.is_terminal() {
            return Err(HintError::SessionOver);
        }
        if ledger.hints_remaining() == 0 {
            return Err(HintError::NoHintsRemaining);
        }

        let target: Vec<char> = self.target.chars().collect();
        let unconfirmed: Vec<usize> = (0..target.len())
            .filter(|&i| {
                !self
                    .guesses
                    .iter()
                    .any(|g| g.marks.get(i) == Some(&LetterMark::Exact))
            })
            .collect();

        let position = match self.rng.choose(&unconfirmed) {
            Some(&p) => p,
            None => return Err(HintError::NoHintNeeded),
        };

        let hints_remaining = spend_hint(ledger);
        debug!(position, "letter revealed by hint");

        Ok(HintReveal {
            position,
            letter: target[position],
            hints_remaining,
        })
    }

    /// The target word. Hosts show it when the session is lost.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Session state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Guesses made so far.
    #[must_use]
    pub fn guesses_made(&self) -> usize {
        self.guesses.len()
    }

    /// Guesses left before the session is lost.
    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    /// Letters proven absent from the target.
    #[must_use]
    pub fn eliminated_letters(&self) -> &FxHashSet<char> {
        &self.eliminated
    }

    /// Render-ready view of the session.
    #[must_use]
    pub fn snapshot(&self) -> WordGuessSnapshot {
        let mut eliminated: Vec<char> = self.eliminated.iter().copied().collect();
        eliminated.sort_unstable();

        WordGuessSnapshot {
            rows: self.guesses.iter().cloned().collect(),
            word_length: self.target.chars().count(),
            guesses_remaining: self.guesses_remaining(),
            eliminated,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryStore;

    fn ledger() -> ProgressLedger<MemoryStore> {
        ProgressLedger::load(MemoryStore::new()).unwrap()
    }

    fn fixed_target(target: &str) -> WordGuessConfig {
        WordGuessConfig {
            word_list: vec![target.to_string()],
            max_guesses: 6,
        }
    }

    #[test]
    fn test_start_awards_session_xp() {
        let mut ledger = ledger();
        let game = WordGuessGame::start(WordGuessConfig::default(), 42, &mut ledger).unwrap();

        assert_eq!(ledger.xp(), SESSION_START_XP);
        assert_eq!(game.status(), SessionStatus::InProgress);
        assert!(DEFAULT_WORD_LIST.contains(&game.target()));
    }

    #[test]
    fn test_empty_word_list_refused() {
        let mut ledger = ledger();
        let config = WordGuessConfig {
            word_list: vec![],
            max_guesses: 6,
        };

        assert_eq!(
            WordGuessGame::start(config, 42, &mut ledger).unwrap_err(),
            EmptyWordList
        );
        // No session, no award
        assert_eq!(ledger.xp(), 0);
    }

    #[test]
    fn test_wrong_length_rejected_without_mutation() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("apple"), 1, &mut ledger).unwrap();

        let err = game.submit_guess(&mut ledger, "pear").unwrap_err();
        assert_eq!(
            err,
            GuessError::WrongLength {
                expected: 5,
                actual: 4
            }
        );
        assert_eq!(game.guesses_made(), 0);
        assert!(game.eliminated_letters().is_empty());
    }

    #[test]
    fn test_feedback_and_elimination() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("apple"), 1, &mut ledger).unwrap();

        let report = game.submit_guess(&mut ledger, "grape").unwrap();
        use LetterMark::{Absent, Exact, Present};
        assert_eq!(
            report.feedback.marks.as_slice(),
            [Absent, Absent, Present, Present, Exact]
        );
        assert_eq!(report.status, SessionStatus::InProgress);
        assert_eq!(report.xp_awarded, 0);

        // Only the letters the target lacks are eliminated
        let snapshot = game.snapshot();
        assert_eq!(snapshot.eliminated, vec!['g', 'r']);
    }

    #[test]
    fn test_eliminated_never_contains_target_letters() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("apple"), 1, &mut ledger).unwrap();

        for guess in ["grape", "melon", "peach"] {
            game.submit_guess(&mut ledger, guess).unwrap();
        }

        for ch in "apple".chars() {
            assert!(!game.eliminated_letters().contains(&ch));
        }
    }

    #[test]
    fn test_win_awards_xp_and_locks_session() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("lemon"), 1, &mut ledger).unwrap();

        let report = game.submit_guess(&mut ledger, "LEMON").unwrap();
        assert_eq!(report.status, SessionStatus::Won);
        assert_eq!(report.xp_awarded, WIN_XP);
        assert!(report.feedback.is_winning());
        assert_eq!(ledger.xp(), SESSION_START_XP + WIN_XP);

        assert_eq!(
            game.submit_guess(&mut ledger, "melon").unwrap_err(),
            GuessError::SessionOver
        );
    }

    #[test]
    fn test_sixth_miss_loses() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("apple"), 1, &mut ledger).unwrap();

        for i in 0..5 {
            let report = game.submit_guess(&mut ledger, "melon").unwrap();
            assert_eq!(report.status, SessionStatus::InProgress, "guess {i}");
        }

        let report = game.submit_guess(&mut ledger, "melon").unwrap();
        assert_eq!(report.status, SessionStatus::Lost);
        assert_eq!(game.guesses_remaining(), 0);

        assert_eq!(
            game.request_hint(&mut ledger).unwrap_err(),
            HintError::SessionOver
        );
    }

    #[test]
    fn test_hint_reveals_unconfirmed_position() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("peach"), 7, &mut ledger).unwrap();

        // 'p' and 'e' are confirmed by this guess ("pe" prefix matches)
        game.submit_guess(&mut ledger, "pedal").unwrap();

        let reveal = game.request_hint(&mut ledger).unwrap();
        assert!(reveal.position >= 2, "confirmed positions are ineligible");
        let target: Vec<char> = "peach".chars().collect();
        assert_eq!(reveal.letter, target[reveal.position]);
        assert_eq!(reveal.hints_remaining, ledger.hints_remaining());
        assert_eq!(ledger.hints_remaining(), crate::progress::DEFAULT_HINTS - 1);
    }

    #[test]
    fn test_hint_budget_exhausted() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("peach"), 7, &mut ledger).unwrap();

        for _ in 0..crate::progress::DEFAULT_HINTS {
            game.request_hint(&mut ledger).unwrap();
        }

        assert_eq!(
            game.request_hint(&mut ledger).unwrap_err(),
            HintError::NoHintsRemaining
        );
        assert_eq!(ledger.hints_remaining(), 0);
    }

    #[test]
    fn test_hint_refused_when_all_positions_confirmed() {
        let mut ledger = ledger();
        ledger.grant_hints(10).unwrap();
        let mut game = WordGuessGame::start(
            WordGuessConfig {
                word_list: vec!["apple".to_string()],
                max_guesses: 10,
            },
            3,
            &mut ledger,
        )
        .unwrap();

        // Confirm every position without ever winning: "apply" lands
        // positions 0..=3, "maple" lands 2..=4
        game.submit_guess(&mut ledger, "apply").unwrap();
        game.submit_guess(&mut ledger, "maple").unwrap();

        assert_eq!(
            game.request_hint(&mut ledger).unwrap_err(),
            HintError::NoHintNeeded
        );
        assert_eq!(ledger.hints_remaining(), 10 + crate::progress::DEFAULT_HINTS);
    }

    #[test]
    fn test_same_seed_same_target() {
        let mut ledger = ledger();
        let g1 = WordGuessGame::start(WordGuessConfig::default(), 99, &mut ledger).unwrap();
        let g2 = WordGuessGame::start(WordGuessConfig::default(), 99, &mut ledger).unwrap();

        assert_eq!(g1.target(), g2.target());
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut ledger = ledger();
        let mut game = WordGuessGame::start(fixed_target("melon"), 5, &mut ledger).unwrap();
        game.submit_guess(&mut ledger, "lemon").unwrap();

        let snapshot = game.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WordGuessSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
