/*
config.rs

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

//! Application constants and settings.
//!
//! The settings are read from an optional JSON file. Missing fields, or a missing file, take
//! the default values.
//! The API key for the generative services is never stored in the file. It is read from the
//! [`API_KEY_ENV`] environment variable.

use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

pub const APP_NAME: &str = "Magic Farm";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2026 The Magic Farm contributors\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);

/// Environment variable that stores the key for the generative services.
pub const API_KEY_ENV: &str = "API_KEY";

/// Settings object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Model for generating character portraits and jigsaw pictures.
    pub image_model: String,

    /// Model for text-to-speech.
    pub speech_model: String,

    /// Voice of the text-to-speech model.
    pub voice_name: String,

    /// Sample rate of the PCM audio returned by the text-to-speech model.
    pub sample_rate: u32,

    /// Language of the platform voice, used when the text-to-speech model fails.
    pub language: String,

    /// Speech rate of the platform voice.
    pub speech_rate: f32,

    /// Pitch of the platform voice.
    pub speech_pitch: f32,

    /// Number of characters that the player can create outside of rewards.
    pub creation_limit: usize,

    /// Width and height of the drawing canvas, in pixels.
    pub canvas_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_model: "gemini-2.5-flash-image".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice_name: "Kore".to_string(),
            sample_rate: 24000,
            language: "tr-TR".to_string(),
            speech_rate: 0.9,
            speech_pitch: 1.1,
            creation_limit: 3,
            canvas_size: 500,
        }
    }
}

impl Settings {
    /// Read the settings from the given JSON file.
    ///
    /// Return the default settings if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    debug!("No settings file {path:?}: using defaults");
                    return Ok(Self::default());
                }
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let settings: Settings = serde_json::from_reader(reader)?;
        debug!("Settings from {path:?}: {settings:?}");
        Ok(settings)
    }

    /// Return the API key from the environment, if set and not empty.
    pub fn api_key() -> Option<String> {
        env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn version_notice() {
        assert!(COPYRIGHT_NOTICE.starts_with(VERSION));
        assert!(COPYRIGHT_NOTICE.contains("Copyright 2026 The Magic Farm contributors"));
        assert!(COPYRIGHT_NOTICE.contains("GPL-3.0-or-later"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let settings = Settings::load(&dir.path().join("settings.json")).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        write!(file, r#"{{"voice_name": "Puck", "creation_limit": 5}}"#).expect("write");
        let settings = Settings::load(file.path()).expect("valid settings");
        assert_eq!(settings.voice_name, "Puck");
        assert_eq!(settings.creation_limit, 5);
        assert_eq!(settings.sample_rate, 24000);
        assert_eq!(settings.language, "tr-TR");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        write!(file, "not json").expect("write");
        assert!(Settings::load(file.path()).is_err());
    }
}
