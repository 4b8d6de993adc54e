/*
round.rs

Copyright 2026 The Magic Farm contributors

This file is part of Magic Farm.

Magic Farm is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Magic Farm is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Magic Farm. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate a round: clue rows, question row, and answer options.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::mapping::RoundMapping;
use super::pool;
use super::row::{self, EquationRow};
use crate::character::Character;
use crate::roster::MIN_CHARACTERS_TO_PLAY;

/// Maximum number of attempts for drawing a valid pair of clue rows.
/// After that, [`fallback_clues`] provides the clue rows.
pub const CLUE_ATTEMPTS: usize = 200;

/// Maximum number of attempts for drawing a question row that differs from the clues.
pub const QUESTION_ATTEMPTS: usize = 50;

/// Maximum number of attempts for drawing distractor codes.
pub const DISTRACTOR_ATTEMPTS: usize = 100;

/// Number of answer options, including the correct one.
pub const OPTION_COUNT: usize = 4;

/// How the round was obtained. Only used for logging and statistics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Number of attempts it took to find the clue rows.
    pub clue_attempts: usize,

    /// Whether the predefined clue rows were used.
    pub clue_fallback: bool,

    /// Whether the question search gave up and the question has the code of a clue row.
    pub question_collision: bool,
}

/// Round object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Round {
    /// Characters in play, in pool order. Rows refer to these positions.
    pub pool: Vec<Character>,

    /// Digits of the characters for this round.
    pub mapping: RoundMapping,

    /// The two clue rows, with their codes revealed.
    pub clues: [EquationRow; 2],

    /// The row for which the player must find the code.
    pub question: EquationRow,

    /// Answer options in random order. The correct code appears exactly once.
    pub options: Vec<String>,

    pub stats: RoundStats,
}

/// Generate a new round from the roster's characters.
///
/// Return None if there are less than two characters.
pub fn generate<R: Rng + ?Sized>(characters: &[Character], rng: &mut R) -> Option<Round> {
    if characters.len() < MIN_CHARACTERS_TO_PLAY {
        debug!("Not enough characters for a round: {}", characters.len());
        return None;
    }
    let pool: Vec<Character> = pool::select_pool(characters, rng);
    let mapping: RoundMapping = RoundMapping::assign(&pool, rng);
    Round::with_mapping(pool, mapping, rng)
}

/// Return the predefined clue rows, which always show every character.
///
/// `[0, 1, 0]` and `[2, 2, 1]` for pools of three characters or more, `[0, 1, 0]` and
/// `[1, 0, 1]` for a pool of two characters.
pub fn fallback_clues(mapping: &RoundMapping) -> [EquationRow; 2] {
    if mapping.len() >= 3 {
        [
            EquationRow::from_sequence(&[0, 1, 0], mapping),
            EquationRow::from_sequence(&[2, 2, 1], mapping),
        ]
    } else {
        [
            EquationRow::from_sequence(&[0, 1, 0], mapping),
            EquationRow::from_sequence(&[1, 0, 1], mapping),
        ]
    }
}

/// Draw clue rows until they have different codes and show every character.
///
/// Return the rows and the number of attempts, or None if [`CLUE_ATTEMPTS`] is exceeded.
fn find_clues<R: Rng + ?Sized>(
    mapping: &RoundMapping,
    rng: &mut R,
) -> Option<([EquationRow; 2], usize)> {
    for attempt in 1..=CLUE_ATTEMPTS {
        let row1: EquationRow = EquationRow::random(mapping, rng);
        let row2: EquationRow = EquationRow::random(mapping, rng);

        if row1 == row2 {
            continue;
        }
        if row::covers_pool(&[&row1, &row2], mapping.len()) {
            return Some(([row1, row2], attempt));
        }
    }
    None
}

/// Draw a question row that has a different code than the clue rows.
///
/// When [`QUESTION_ATTEMPTS`] is exceeded, the last row is returned anyway, and the second
/// element of the returned tuple is `true`.
fn find_question<R: Rng + ?Sized>(
    clues: &[EquationRow; 2],
    mapping: &RoundMapping,
    rng: &mut R,
) -> (EquationRow, bool) {
    let mut question: EquationRow = EquationRow::random(mapping, rng);
    let mut attempts: usize = 0;

    while clues.contains(&question) {
        if attempts >= QUESTION_ATTEMPTS {
            debug!("No distinct question row after {attempts} attempts");
            return (question, true);
        }
        question = EquationRow::random(mapping, rng);
        attempts += 1;
    }
    (question, false)
}

/// Return the shuffled answer options: the correct code and up to three distractors.
///
/// Small pools might not provide enough distinct codes before [`DISTRACTOR_ATTEMPTS`] is
/// exceeded. In that case, less than [`OPTION_COUNT`] options are returned.
fn build_options<R: Rng + ?Sized>(
    correct: &str,
    mapping: &RoundMapping,
    rng: &mut R,
) -> Vec<String> {
    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_string());

    let mut attempts: usize = 0;
    while options.len() < OPTION_COUNT && attempts < DISTRACTOR_ATTEMPTS {
        let distractor: EquationRow = EquationRow::random(mapping, rng);
        if !options.iter().any(|o| o == distractor.code()) {
            options.push(distractor.code().to_string());
        }
        attempts += 1;
    }
    if options.len() < OPTION_COUNT {
        debug!("Only {} distinct answer options", options.len());
    }
    options.shuffle(rng);
    options
}

impl Round {
    /// Build a round from a pool and its digits.
    ///
    /// Return None if the pool has less than two characters or if the mapping does not cover
    /// the pool.
    pub fn with_mapping<R: Rng + ?Sized>(
        pool: Vec<Character>,
        mapping: RoundMapping,
        rng: &mut R,
    ) -> Option<Self> {
        if pool.len() < MIN_CHARACTERS_TO_PLAY || mapping.len() != pool.len() {
            return None;
        }
        let mut stats: RoundStats = RoundStats::default();

        let clues: [EquationRow; 2] = match find_clues(&mapping, rng) {
            Some((clues, attempts)) => {
                stats.clue_attempts = attempts;
                clues
            }
            None => {
                // It took too long, use the predefined rows
                debug!("No valid clue rows after {CLUE_ATTEMPTS} attempts: using fallback");
                stats.clue_attempts = CLUE_ATTEMPTS;
                stats.clue_fallback = true;
                fallback_clues(&mapping)
            }
        };

        let (question, collision) = find_question(&clues, &mapping, rng);
        stats.question_collision = collision;
        let options: Vec<String> = build_options(question.code(), &mapping, rng);

        debug!(
            "Round: clues = {} {}  question = {}  options = {:?}",
            clues[0].code(),
            clues[1].code(),
            question.code(),
            options
        );
        Some(Self {
            pool,
            mapping,
            clues,
            question,
            options,
            stats,
        })
    }

    /// Whether the given option is the code of the question row.
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.question.code()
    }

    /// Return the characters of the given row, in sequence order.
    pub fn characters<'a>(&'a self, row: &'a EquationRow) -> impl Iterator<Item = &'a Character> {
        row.sequence().iter().filter_map(|p| self.pool.get(*p))
    }
}
