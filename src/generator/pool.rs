/*
pool.rs

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

//! Select the characters that take part in a round.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::character::Character;

/// Maximum number of characters in a round.
pub const MAX_POOL_SIZE: usize = 3;

/// Return the active pool for a new round.
///
/// The pool contains the most recently added character (the last one in `characters`) and up
/// to [`MAX_POOL_SIZE`] - 1 other characters chosen at random. The pool order is random.
/// An empty slice gives an empty pool.
pub fn select_pool<R: Rng + ?Sized>(characters: &[Character], rng: &mut R) -> Vec<Character> {
    let Some(newest) = characters.last() else {
        return Vec::new();
    };
    let pool_size: usize = characters.len().min(MAX_POOL_SIZE);

    let others: Vec<&Character> = characters.iter().filter(|c| c.id != newest.id).collect();
    let mut pool: Vec<Character> = Vec::with_capacity(pool_size);
    pool.push(newest.clone());
    pool.extend(
        others
            .choose_multiple(rng, pool_size - 1)
            .map(|c| (*c).clone()),
    );
    pool.shuffle(rng);

    debug!(
        "Active pool: {:?}",
        pool.iter().map(|c| c.name.as_str()).collect::<Vec<&str>>()
    );
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ImageRef;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn characters(n: usize) -> Vec<Character> {
        (0..n)
            .map(|i| {
                Character::new(
                    &i.to_string(),
                    &format!("c{i}"),
                    "",
                    ImageRef::Placeholder(String::new()),
                )
            })
            .collect()
    }

    #[test]
    fn newest_character_is_always_in_the_pool() {
        let chars = characters(7);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let pool = select_pool(&chars, &mut rng);
            assert_eq!(pool.len(), MAX_POOL_SIZE);
            assert!(pool.iter().any(|c| c.id == "6"));

            let mut ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), MAX_POOL_SIZE, "no character twice in the pool");
        }
    }

    #[test]
    fn small_rosters_are_used_entirely() {
        let chars = characters(2);
        let mut rng = StdRng::seed_from_u64(2);
        let pool = select_pool(&chars, &mut rng);
        assert_eq!(pool.len(), 2);
        assert!(select_pool(&[], &mut rng).is_empty());
    }

    #[test]
    fn pool_order_is_randomized() {
        let chars = characters(3);
        let mut rng = StdRng::seed_from_u64(3);
        let mut newest_first: usize = 0;
        for _ in 0..300 {
            if select_pool(&chars, &mut rng)[0].id == "2" {
                newest_first += 1;
            }
        }
        // About one third of the pools start with the newest character
        assert!(newest_first > 50 && newest_first < 200, "{newest_first}");
    }
}
