//! Word-guess engine: pick a hidden word, score guesses position by
//! position, and track which letters the player has ruled out.

pub mod feedback;
pub mod game;

pub use feedback::{GuessFeedback, LetterMark};
pub use game::{
    EmptyWordList, GuessError, GuessReport, HintReveal, WordGuessConfig, WordGuessGame,
    WordGuessSnapshot, DEFAULT_WORD_LIST, SESSION_START_XP, WIN_XP,
};
