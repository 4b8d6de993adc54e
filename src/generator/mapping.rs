/*
mapping.rs

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

//! Digits assigned to the characters of the active pool for one round.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::character::Character;

/// Mapping between the characters of the pool and their digits.
///
/// The digits are between 1 and 9 and are all distinct. The mapping is indexed by the position
/// of the character in the pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoundMapping {
    /// Character identifier and digit, in pool order.
    assignments: Vec<(String, u8)>,
}

impl RoundMapping {
    /// Assign random distinct digits to the characters of the pool.
    ///
    /// Only the first nine characters get a digit.
    pub fn assign<R: Rng + ?Sized>(pool: &[Character], rng: &mut R) -> Self {
        let mut digits: Vec<u8> = (1..=9).collect();
        digits.shuffle(rng);
        Self::build(pool, &digits)
    }

    /// Build the mapping from a list of digits, in pool order.
    ///
    /// Return None if a digit given to a character is outside 1..=9 or is used twice.
    pub fn from_digits(pool: &[Character], digits: &[u8]) -> Option<Self> {
        let used: &[u8] = &digits[..digits.len().min(pool.len())];
        for (i, d) in used.iter().enumerate() {
            if !(1..=9).contains(d) || used[..i].contains(d) {
                return None;
            }
        }
        Some(Self::build(pool, digits))
    }

    fn build(pool: &[Character], digits: &[u8]) -> Self {
        Self {
            assignments: pool
                .iter()
                .zip(digits)
                .map(|(c, d)| (c.id.clone(), *d))
                .collect(),
        }
    }

    /// Return the digit of the character at the given pool position.
    pub fn digit(&self, position: usize) -> Option<u8> {
        self.assignments.get(position).map(|(_, d)| *d)
    }

    /// Return the digit of the character with the given identifier.
    pub fn digit_of(&self, id: &str) -> Option<u8> {
        self.assignments
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, d)| *d)
    }

    /// Number of characters in the mapping.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Return the code for a sequence of pool positions: the concatenation of the digits.
    pub fn code(&self, sequence: &[usize]) -> String {
        sequence
            .iter()
            .filter_map(|p| self.digit(*p))
            .map(|d| char::from(b'0' + d))
            .collect()
    }
}
