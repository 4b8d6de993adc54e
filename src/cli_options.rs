/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the matching game.
//! In command-line mode, Magic Farm generates rounds for a pool of characters and prints them,
//! so that developers can check the clues, the question, and the answer options.
//!
//! # Examples
//!
//! Generate two rounds for three characters. The correct option is in brackets:
//!
//! ```text
//! $ magicfarm -c 2 --pool Boncuk,Şeker,Bulut
//! Round 1
//!   Bulut = 3  Şeker = 8  Boncuk = 1
//!   Şeker Bulut Bulut = 833
//!   Boncuk Şeker Boncuk = 181
//!   Bulut Boncuk Şeker = ?
//!   options: 381 [318] 183 813
//! ...
//! ```
//!
//! Print statistics about 1000 rounds for two characters, reproducibly:
//!
//! ```text
//! $ magicfarm -c 1000 --seed 42 --pool Boncuk,Şeker --summary
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use magicfarm::character::ImageRef;
use magicfarm::config::{COPYRIGHT_NOTICE, Settings};
use magicfarm::generator::round::{self, Round};
use magicfarm::generator::row::EquationRow;
use magicfarm::roster::Roster;
use magicfarm::services::image::placeholder_url;
use magicfarm::stories::STORIES;

/// Generate Magic Farm rounds for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE, arg_required_else_help = true)]
struct Args {
    /// Names of the characters, the last one being the newest
    #[arg(short, long, value_delimiter = ',', group = "generate")]
    pool: Vec<String>,

    /// Number of rounds to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Seed of the random generator
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// Print the rounds in JSON
    #[arg(short, long, default_value_t = false, requires = "generate")]
    json: bool,

    /// Print some statistics after generating the rounds
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// List the stories
    #[arg(long, default_value_t = false)]
    stories: bool,

    /// Print the settings read from the given file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // Settings
    //
    if let Some(path) = &args.config {
        let settings: Settings = match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Cannot read the settings from {}: {e}", path.display());
                return 1;
            }
        };
        match serde_json::to_string_pretty(&settings) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Cannot print the settings: {e}");
                return 1;
            }
        }
        println!(
            "API key: {}",
            if Settings::api_key().is_some() {
                "set"
            } else {
                "not set"
            }
        );
    }

    //
    // List the stories
    //
    if args.stories {
        for story in &STORIES {
            println!("{:>2}  {}  {}", story.id, story.cover_color, story.title);
        }
    }

    if args.pool.is_empty() {
        return 0;
    }

    //
    // Build the roster from the names
    //
    let mut roster: Roster = Roster::new();
    for name in &args.pool {
        let name: &str = name.trim();
        roster.add(name, "", ImageRef::Placeholder(placeholder_url(name)));
    }
    if !roster.can_play() {
        eprintln!("At least two characters are needed to play.");
        return 1;
    }

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut rounds: Vec<Round> = Vec::with_capacity(args.count);
    for i in 0..args.count {
        debug!("Round {}", i + 1);
        match round::generate(roster.as_slice(), &mut rng) {
            Some(r) => rounds.push(r),
            None => {
                eprintln!("Cannot generate round {}", i + 1);
                return 1;
            }
        }
    }

    //
    // Print the rounds
    //
    if args.json {
        match serde_json::to_string_pretty(&rounds) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Cannot print the rounds: {e}");
                return 1;
            }
        }
    } else {
        for (i, r) in rounds.iter().enumerate() {
            print_round(i + 1, r);
        }
    }

    // Print some stats
    if args.summary {
        print_summary(&rounds);
    }
    0
}

/// Return the names of the characters in the row.
fn row_names(round: &Round, row: &EquationRow) -> String {
    round
        .characters(row)
        .map(|c| c.name.as_str())
        .collect::<Vec<&str>>()
        .join(" ")
}

fn print_round(number: usize, round: &Round) {
    println!("Round {number}");
    let digits: Vec<String> = round
        .pool
        .iter()
        .map(|c| match round.mapping.digit_of(&c.id) {
            Some(d) => format!("{} = {d}", c.name),
            None => format!("{} = ?", c.name),
        })
        .collect();
    println!("  {}", digits.join("  "));
    for clue in &round.clues {
        println!("  {} = {}", row_names(round, clue), clue.code());
    }
    println!("  {} = ?", row_names(round, &round.question));
    let options: Vec<String> = round
        .options
        .iter()
        .map(|o| {
            if round.is_correct(o) {
                format!("[{o}]")
            } else {
                o.clone()
            }
        })
        .collect();
    println!("  options: {}", options.join(" "));
}

fn print_summary(rounds: &[Round]) {
    let count: usize = rounds.len().max(1);
    let fallbacks: usize = rounds.iter().filter(|r| r.stats.clue_fallback).count();
    let collisions: usize = rounds.iter().filter(|r| r.stats.question_collision).count();
    let attempts: usize = rounds.iter().map(|r| r.stats.clue_attempts).sum();
    let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
    for r in rounds {
        *histogram.entry(r.options.len()).or_insert(0) += 1;
    }

    println!(
        "
            rounds = {}
average clue tries = {}
    clue fallbacks = {}
question collisions = {}",
        rounds.len(),
        attempts as f32 / count as f32,
        fallbacks,
        collisions
    );
    for (options, n) in &histogram {
        println!("         {options} options = {n}");
    }
}
