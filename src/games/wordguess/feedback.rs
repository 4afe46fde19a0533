//! Positional scoring of a guess against the target word.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Verdict for one guessed letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterMark {
    /// Right letter in the right position.
    Exact,
    /// The target contains this letter, somewhere else.
    Present,
    /// The target does not contain this letter at all.
    Absent,
}

/// A scored guess: the word as entered plus one mark per letter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessFeedback {
    /// The guessed word, lowercased.
    pub word: String,
    /// One mark per letter position.
    pub marks: SmallVec<[LetterMark; 5]>,
}

impl GuessFeedback {
    /// Whether every position scored [`LetterMark::Exact`].
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.marks.iter().all(|m| *m == LetterMark::Exact)
    }
}

/// Score `guess` against `target` position by position.
///
/// A letter that matches its slot is `Exact`; a letter the target contains
/// anywhere else is `Present`; everything else is `Absent`. Duplicate
/// letters are scored independently, so a letter the target holds once can
/// mark `Present` at several positions.
pub(crate) fn score(guess: &str, target: &str) -> GuessFeedback {
    let target_chars: Vec<char> = target.chars().collect();
    let mut marks = SmallVec::new();

    for (i, ch) in guess.chars().enumerate() {
        let mark = if target_chars.get(i) == Some(&ch) {
            LetterMark::Exact
        } else if target_chars.contains(&ch) {
            LetterMark::Present
        } else {
            LetterMark::Absent
        };
        marks.push(mark);
    }

    GuessFeedback {
        word: guess.to_string(),
        marks,
    }
}
