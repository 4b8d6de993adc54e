/*
scoring.rs

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

//! Manage the score of the matching game.
//!
//! A correct answer gives [`BASE_POINTS`] plus [`STREAK_BONUS`] points for each previous
//! consecutive correct answer. A wrong answer resets the streak and gives nothing.
//! Every [`REWARD_INTERVAL`] correct answers, the player can create a new character as a reward.
//!
//! The score also gives the player a farmer title, see [`FarmerTitle`].
//! Scores only live for the session.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Points for a correct answer.
pub const BASE_POINTS: u32 = 10;

/// Additional points per answer in the current streak.
pub const STREAK_BONUS: u32 = 2;

/// Number of correct answers between two rewards.
pub const REWARD_INTERVAL: u32 = 3;

/// Titles, from the lowest to the highest.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromRepr)]
#[repr(u8)]
pub enum FarmerTitle {
    Apprentice,
    ChickenKeeper,
    MasterFisher,
    PumpkinKing,
    MineMaster,
    TownLegend,
}

impl FarmerTitle {
    /// Minimum score for the title.
    pub fn min_score(&self) -> u32 {
        match self {
            FarmerTitle::Apprentice => 0,
            FarmerTitle::ChickenKeeper => 30,
            FarmerTitle::MasterFisher => 80,
            FarmerTitle::PumpkinKing => 150,
            FarmerTitle::MineMaster => 300,
            FarmerTitle::TownLegend => 500,
        }
    }

    /// Return the highest title that the score reaches.
    pub fn from_score(score: u32) -> Self {
        let mut title: FarmerTitle = FarmerTitle::Apprentice;
        let mut i: u8 = 1;
        while let Some(t) = FarmerTitle::from_repr(i) {
            if score < t.min_score() {
                break;
            }
            title = t;
            i += 1;
        }
        title
    }

    /// Badge displayed in front of the title.
    pub fn emoji(&self) -> &'static str {
        match self {
            FarmerTitle::Apprentice => "🌱",
            FarmerTitle::ChickenKeeper => "🐓",
            FarmerTitle::MasterFisher => "🐟",
            FarmerTitle::PumpkinKing => "🎃",
            FarmerTitle::MineMaster => "💎",
            FarmerTitle::TownLegend => "👑",
        }
    }
}

impl fmt::Display for FarmerTitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            FarmerTitle::Apprentice => "Çiftçi Çırağı",
            FarmerTitle::ChickenKeeper => "Tavukçu",
            FarmerTitle::MasterFisher => "Usta Balıkçı",
            FarmerTitle::PumpkinKing => "Kabak Kralı",
            FarmerTitle::MineMaster => "Maden Ustası",
            FarmerTitle::TownLegend => "Kasaba Efsanesi",
        };
        write!(f, "{} {name}", self.emoji())
    }
}

/// Result of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the answer was correct.
    pub correct: bool,

    /// Points added to the score.
    pub awarded: u32,

    /// Whether the answer unlocks a reward (a new character).
    pub reward_unlocked: bool,
}

/// Score, streak, and reward counter.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Scoreboard {
    score: u32,

    /// Number of consecutive correct answers.
    streak: u32,

    /// Number of correct answers since the beginning of the session.
    correct_count: u32,
}

/// Return the points for a correct answer with the given streak.
pub fn points_for(streak: u32) -> u32 {
    BASE_POINTS + STREAK_BONUS * streak
}

/// Whether the given number of correct answers unlocks a reward.
pub fn is_reward_due(correct_count: u32) -> bool {
    correct_count > 0 && correct_count % REWARD_INTERVAL == 0
}

impl Scoreboard {
    /// Create a [`Scoreboard`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer and return what it gives.
    pub fn record(&mut self, correct: bool) -> AnswerOutcome {
        if !correct {
            debug!("Wrong answer: streak {} reset", self.streak);
            self.streak = 0;
            return AnswerOutcome {
                correct,
                awarded: 0,
                reward_unlocked: false,
            };
        }
        let awarded: u32 = points_for(self.streak);
        self.score += awarded;
        self.streak += 1;
        self.correct_count += 1;
        debug!(
            "Correct answer: +{awarded} = {}  streak = {}  correct = {}",
            self.score, self.streak, self.correct_count
        );
        AnswerOutcome {
            correct,
            awarded,
            reward_unlocked: is_reward_due(self.correct_count),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Return the title for the current score.
    pub fn title(&self) -> FarmerTitle {
        FarmerTitle::from_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_correct_answer_gives_ten() {
        let mut board = Scoreboard::new();
        let outcome = board.record(true);
        assert_eq!(outcome.awarded, 10);
        assert_eq!(board.score(), 10);
        assert_eq!(board.streak(), 1);
    }

    #[test]
    fn streak_of_three_gives_sixteen() {
        let mut board = Scoreboard::new();
        for _ in 0..3 {
            board.record(true);
        }
        assert_eq!(board.streak(), 3);
        let before = board.score();
        assert_eq!(board.record(true).awarded, 16);
        assert_eq!(board.score() - before, 16);
    }

    #[test]
    fn wrong_answer_resets_the_streak_only() {
        let mut board = Scoreboard::new();
        board.record(true);
        board.record(true);
        let before = board.score();
        let outcome = board.record(false);
        assert!(!outcome.correct);
        assert_eq!(outcome.awarded, 0);
        assert_eq!(board.score(), before);
        assert_eq!(board.streak(), 0);
        assert_eq!(board.correct_count(), 2);
        assert_eq!(board.record(true).awarded, 10);
    }

    #[test]
    fn reward_every_third_correct_answer() {
        let due: Vec<u32> = (1..=6).filter(|c| is_reward_due(*c)).collect();
        assert_eq!(due, [3, 6]);
        assert!(!is_reward_due(0));

        let mut board = Scoreboard::new();
        let unlocked: Vec<bool> = (0..6).map(|_| board.record(true).reward_unlocked).collect();
        assert_eq!(unlocked, [false, false, true, false, false, true]);
    }

    #[test]
    fn titles_follow_the_score() {
        assert_eq!(FarmerTitle::from_score(0), FarmerTitle::Apprentice);
        assert_eq!(FarmerTitle::from_score(29), FarmerTitle::Apprentice);
        assert_eq!(FarmerTitle::from_score(30), FarmerTitle::ChickenKeeper);
        assert_eq!(FarmerTitle::from_score(80), FarmerTitle::MasterFisher);
        assert_eq!(FarmerTitle::from_score(299), FarmerTitle::PumpkinKing);
        assert_eq!(FarmerTitle::from_score(300), FarmerTitle::MineMaster);
        assert_eq!(FarmerTitle::from_score(10_000), FarmerTitle::TownLegend);
        assert_eq!(FarmerTitle::TownLegend.to_string(), "👑 Kasaba Efsanesi");
    }
}
