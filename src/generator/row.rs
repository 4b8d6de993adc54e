/*
row.rs

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

//! Equation row: a sequence of characters and its code.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mapping::RoundMapping;

/// Number of characters in a row.
pub const ROW_LENGTH: usize = 3;

/// Row object.
///
/// The sequence stores positions in the active pool. A character may appear several times.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EquationRow {
    sequence: Vec<usize>,
    code: String,
}

/// Two rows are equal when they have the same code, whatever the characters.
impl PartialEq for EquationRow {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl EquationRow {
    /// Create the row for the given sequence of pool positions.
    pub fn from_sequence(sequence: &[usize], mapping: &RoundMapping) -> Self {
        Self {
            sequence: sequence.to_vec(),
            code: mapping.code(sequence),
        }
    }

    /// Draw [`ROW_LENGTH`] characters independently from the pool (with replacement).
    pub fn random<R: Rng + ?Sized>(mapping: &RoundMapping, rng: &mut R) -> Self {
        let sequence: Vec<usize> = (0..ROW_LENGTH)
            .map(|_| rng.random_range(0..mapping.len()))
            .collect();
        Self::from_sequence(&sequence, mapping)
    }

    /// Pool positions of the characters in the row.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Code of the row.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Whether the rows together show every character of a pool of the given size.
pub fn covers_pool(rows: &[&EquationRow], pool_size: usize) -> bool {
    let mut seen: Vec<bool> = vec![false; pool_size];
    for position in rows.iter().flat_map(|r| r.sequence()) {
        if let Some(s) = seen.get_mut(*position) {
            *s = true;
        }
    }
    seen.iter().all(|s| *s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, ImageRef};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mapping(digits: &[u8]) -> RoundMapping {
        let pool: Vec<Character> = (0..digits.len())
            .map(|i| {
                Character::new(
                    &i.to_string(),
                    "",
                    "",
                    ImageRef::Placeholder(String::new()),
                )
            })
            .collect();
        RoundMapping::from_digits(&pool, digits).expect("valid digits")
    }

    #[test]
    fn equality_only_depends_on_the_code() {
        let r1 = EquationRow::from_sequence(&[0, 1, 0], &mapping(&[5, 3]));
        let r2 = EquationRow::from_sequence(&[1, 0, 1], &mapping(&[3, 5]));
        assert_ne!(r1.sequence(), r2.sequence());
        assert_eq!(r1, r2);
    }

    #[test]
    fn random_rows_stay_in_the_pool() {
        let m = mapping(&[3, 8]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let r = EquationRow::random(&m, &mut rng);
            assert_eq!(r.sequence().len(), ROW_LENGTH);
            assert!(r.sequence().iter().all(|p| *p < 2));
            assert!(r.code().chars().all(|c| c == '3' || c == '8'));
        }
    }

    #[test]
    fn coverage() {
        let m = mapping(&[4, 7, 2]);
        let r1 = EquationRow::from_sequence(&[0, 1, 0], &m);
        let r2 = EquationRow::from_sequence(&[2, 2, 1], &m);
        let r3 = EquationRow::from_sequence(&[1, 1, 1], &m);
        assert!(covers_pool(&[&r1, &r2], 3));
        assert!(!covers_pool(&[&r1, &r3], 3));
    }
}
