/*
game.rs

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

//! Manage the status of a matching game in progress.

use log::{debug, info};
use rand::Rng;

use crate::creator::CreationMode;
use crate::generator::round::{self, Round};
use crate::prompts;
use crate::roster::Roster;
use crate::scoring::{AnswerOutcome, Scoreboard};

/// How an answer option is displayed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OptionState {
    /// The round is not answered yet, or the option was not chosen and is wrong.
    Neutral,

    /// The option is the correct code. Revealed once the round is answered.
    Correct,

    /// The player chose this wrong option.
    Wrong,
}

/// What the player gets after answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub outcome: AnswerOutcome,

    /// Phrase read aloud.
    pub phrase: &'static str,
}

/// Manage the status of the game in progress.
#[derive(Debug, Default)]
pub struct Game {
    /// Round in progress.
    round: Option<Round>,

    /// Option chosen by the player. A round accepts only one answer.
    selected: Option<String>,

    /// Whether the last answer unlocked a reward that the player did not claim yet.
    reward_available: bool,

    /// Number of rounds generated since the beginning of the session.
    rounds_played: usize,
}

impl Game {
    /// Create a [`Game`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Phrase that explains the rules.
    pub fn how_to_play(&self) -> &'static str {
        prompts::GAME_HOW_TO_PLAY
    }

    /// Start a new round with the characters of the roster.
    ///
    /// Return false if there are not enough characters to play.
    pub fn new_round<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) -> bool {
        let Some(round) = round::generate(roster.as_slice(), rng) else {
            info!("Cannot start a round with {} characters", roster.len());
            return false;
        };
        self.rounds_played += 1;
        debug!(
            "Round {}: question {} options {:?}",
            self.rounds_played,
            round.question.code(),
            round.options
        );
        self.round = Some(round);
        self.selected = None;
        self.reward_available = false;
        true
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Option chosen by the player in the current round.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Answer the current round with the given option and update the score board.
    ///
    /// Return None, and change nothing, if there is no round, if the round is already
    /// answered, or if the option is not one of the round options.
    pub fn answer(&mut self, option: &str, scoreboard: &mut Scoreboard) -> Option<AnswerFeedback> {
        let round: &Round = self.round.as_ref()?;
        if self.selected.is_some() || !round.options.iter().any(|o| o == option) {
            return None;
        }
        let outcome: AnswerOutcome = scoreboard.record(round.is_correct(option));
        self.selected = Some(option.to_string());
        self.reward_available = outcome.reward_unlocked;

        Some(AnswerFeedback {
            outcome,
            phrase: if outcome.correct {
                prompts::GAME_CORRECT
            } else {
                prompts::GAME_WRONG
            },
        })
    }

    /// Return how the given option must be displayed.
    pub fn option_state(&self, option: &str) -> OptionState {
        let (Some(round), Some(selected)) = (self.round.as_ref(), self.selected.as_deref()) else {
            return OptionState::Neutral;
        };
        if round.is_correct(option) {
            OptionState::Correct
        } else if option == selected {
            OptionState::Wrong
        } else {
            OptionState::Neutral
        }
    }

    pub fn reward_available(&self) -> bool {
        self.reward_available
    }

    /// Claim the reward, and return the mode in which the creator must open.
    pub fn claim_reward(&mut self) -> Option<CreationMode> {
        if !self.reward_available {
            return None;
        }
        self.reward_available = false;
        Some(CreationMode::Reward)
    }
}
