/*
lib.rs

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

//! Game logic for Magic Farm, a farm-themed learning game for young children.
//!
//! The player creates characters (described with words and drawn by an image generation
//! service, or painted by hand on the [`drawing`] canvas), and then plays the number matching
//! game: each character secretly stands for a digit, two clue rows reveal the digits, and the
//! player must pick the code of a third row.
//!
//! The visual layer is not part of this crate. It calls into these modules in response to user
//! events and renders their state:
//!
//! * [`roster`] and [`creator`] manage the characters.
//! * [`generator`] builds the puzzle rounds, [`game`] and [`scoring`] play them.
//! * [`jigsaw`] and [`stories`] are the two other activities of the main menu.
//! * [`services`] wraps the image generation and the speech services.

pub mod character;
pub mod config;
pub mod creator;
pub mod drawing;
pub mod game;
pub mod generator;
pub mod jigsaw;
pub mod prompts;
pub mod roster;
pub mod scoring;
pub mod services;
pub mod stories;
