/*
roster.rs

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

//! In-memory ordered list of the characters that the player created.
//!
//! The order is the creation order: the last character is the most recently added one, which
//! the puzzle generator always puts in play.
//! The list only lives for the session.

use chrono::Utc;
use log::debug;

use crate::character::{Character, ImageRef};

/// Minimum number of characters for playing the matching game.
pub const MIN_CHARACTERS_TO_PLAY: usize = 2;

/// Allocate unique character identifiers.
///
/// Identifiers are derived from the current time in milliseconds. When two characters are
/// created during the same millisecond, the second one gets the next value.
#[derive(Debug, Default)]
struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    fn next(&mut self) -> String {
        let now: i64 = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}

/// Ordered list of characters.
#[derive(Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
    ids: IdAllocator,
}

impl Roster {
    /// Create an empty [`Roster`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a character with a new identifier, append it to the list, and return it.
    pub fn add(&mut self, name: &str, description: &str, image: ImageRef) -> &Character {
        let id: String = self.ids.next();
        debug!("Adding character {name} ({id})");
        self.characters
            .push(Character::new(&id, name, description, image));
        &self.characters[self.characters.len() - 1]
    }

    /// Remove the character with the given identifier and return it.
    pub fn remove(&mut self, id: &str) -> Option<Character> {
        let index: usize = self.characters.iter().position(|c| c.id == id)?;
        debug!("Removing character {}", self.characters[index]);
        Some(self.characters.remove(index))
    }

    /// Return the character with the given identifier.
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Return the most recently added character.
    pub fn newest(&self) -> Option<&Character> {
        self.characters.last()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Return the characters in creation order.
    pub fn as_slice(&self) -> &[Character] {
        &self.characters
    }

    /// Whether there are enough characters for playing the matching game.
    pub fn can_play(&self) -> bool {
        self.characters.len() >= MIN_CHARACTERS_TO_PLAY
    }
}
