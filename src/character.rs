/*
character.rs

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

//! Characters, the game pieces of the matching game.
//!
//! A [`Character`] is never modified after it is created.
//! The [`crate::roster::Roster`] owns the characters, the other components only borrow them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the picture of a character comes from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// PNG picture returned by the image generation service, as a `data:` URI.
    Generated(String),

    /// Placeholder URL, used when the image generation service failed.
    Placeholder(String),

    /// PNG picture painted by the player on the drawing canvas, as a `data:` URI.
    Drawn(String),
}

impl ImageRef {
    /// Return the string that the visual layer uses as the image source.
    pub fn src(&self) -> &str {
        match self {
            ImageRef::Generated(s) | ImageRef::Placeholder(s) | ImageRef::Drawn(s) => s,
        }
    }

    /// Whether the picture is a fallback placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageRef::Placeholder(_))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Data URIs are long. Only display the beginning.
        let src: &str = self.src();
        match src.char_indices().nth(48) {
            Some((i, _)) => write!(f, "{}...", &src[..i]),
            None => write!(f, "{src}"),
        }
    }
}

/// Character object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Unique identifier, allocated by the roster.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-text description that was used to generate the picture.
    pub description: String,

    /// Picture.
    pub image: ImageRef,
}

impl Character {
    /// Create a [`Character`] object.
    pub fn new(id: &str, name: &str, description: &str, image: ImageRef) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_src_is_the_inner_string() {
        let img = ImageRef::Placeholder("https://example.com/a.svg".to_string());
        assert_eq!(img.src(), "https://example.com/a.svg");
        assert!(img.is_placeholder());
        assert!(!ImageRef::Drawn("data:image/png;base64,AAAA".to_string()).is_placeholder());
    }

    #[test]
    fn long_sources_are_shortened_for_display() {
        let img = ImageRef::Generated(format!("data:image/png;base64,{}", "A".repeat(200)));
        let shown = img.to_string();
        assert!(shown.ends_with("..."));
        assert_eq!(shown.len(), 51);
    }
}
