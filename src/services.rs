/*
services.rs

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

//! External services: image generation and speech.
//!
//! Both services may fail at any time. The failures never reach the player:
//!
//! * A failed image generation is replaced by a placeholder picture, see [`image`].
//! * A failed speech falls back to the next voice, and then to silence, see [`speech`].
//!
//! Only one request per service is outstanding at a time. A new request supersedes the
//! previous one, whose result is dropped.
//!
//! The network transport is not part of this crate. The [`gemini`] module builds the request
//! bodies and parses the responses, and delegates the exchange to a [`gemini::Transport`]
//! object provided by the caller.

pub mod gemini;
pub mod image;
pub mod slot;
pub mod speech;

use std::error::Error;
use std::fmt;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ServiceError {
    /// The service is not available (no API key, no voice, no network...).
    Unavailable(String),

    /// The service answered, but the answer has no usable content.
    NoContent,

    /// The content cannot be decoded.
    Decode(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::Unavailable(msg) => write!(f, "service unavailable: {msg}"),
            ServiceError::NoContent => write!(f, "no content in the response"),
            ServiceError::Decode(msg) => write!(f, "cannot decode the content: {msg}"),
        }
    }
}

impl Error for ServiceError {}
