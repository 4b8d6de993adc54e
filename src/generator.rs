/*
generator.rs

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

//! Generate random rounds for the number matching game.
//!
//! A round is built in four steps:
//!
//! * The active pool is selected from the roster by [`pool::select_pool`].
//!   It always contains the most recently added character, so that a new character is
//!   immediately in play.
//!
//! * Each character of the pool receives a distinct digit between 1 and 9.
//!   [`mapping::RoundMapping`] stores these digits for the duration of the round.
//!
//! * Two clue rows and one question row are drawn. A row is a sequence of three characters
//!   represented by a [`row::EquationRow`] object, and its code is the concatenation of the
//!   digits of its characters.
//!   The clue rows must have different codes and together must show every character of the pool.
//!   If the random search takes too many attempts, then a predefined pair of clue rows is used.
//!
//! * The answer options are the code of the question row plus up to three distractor codes.
//!
//! The whole process only consumes random numbers from the provided generator. With a seeded
//! generator it is fully reproducible. [`round::generate`] is the entry point.

pub mod mapping;
pub mod pool;
pub mod round;
pub mod row;
