/*
jigsaw.rs

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

//! Jigsaw puzzle.
//!
//! A picture is cut into 3x3 square pieces. The piece identifier is the index of its correct
//! slot, in reading order. The pieces start in a shuffled bank. The player selects a piece in
//! the bank and then a slot on the board. A piece placed on an occupied slot sends the
//! occupant back to the bank.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, RgbaImage, imageops};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::error::Error;
use std::fmt;
use std::io::Cursor;

use crate::prompts;
use crate::services::image::ImageService;

/// Number of pieces per row and per column.
pub const GRID_SIZE: u32 = 3;

pub const PIECE_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum JigsawError {
    /// The picture cannot be decoded.
    Decode(String),

    /// The picture is too small to be cut.
    TooSmall(u32, u32),

    /// A piece cannot be encoded as PNG.
    Encode(String),
}

impl fmt::Display for JigsawError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JigsawError::Decode(msg) => write!(f, "cannot decode the picture: {msg}"),
            JigsawError::TooSmall(w, h) => write!(f, "picture too small: {w}x{h}"),
            JigsawError::Encode(msg) => write!(f, "cannot encode the piece: {msg}"),
        }
    }
}

impl Error for JigsawError {}

impl JigsawError {
    /// Phrase read aloud when the picture cannot be used.
    pub fn phrase(&self) -> &'static str {
        prompts::JIGSAW_FAILED
    }
}

/// Request a new random picture for the puzzle, and return the phrase read while it is drawn.
///
/// The picture is delivered by the service. The visual layer loads its bytes and cuts it with
/// [`Jigsaw::from_png`].
pub fn request_picture<R: Rng + ?Sized>(service: &mut ImageService, rng: &mut R) -> &'static str {
    service.request_jigsaw(&prompts::jigsaw_prompt(rng));
    prompts::JIGSAW_LOADING
}

/// Piece of the puzzle.
#[derive(Debug, Clone)]
pub struct Piece {
    /// Index of the slot where the piece belongs.
    pub id: usize,

    /// Slot where the piece is, or None if it is in the bank.
    pub slot: Option<usize>,

    pub image: RgbaImage,
}

impl Piece {
    /// Encode the picture of the piece as a PNG `data:` URI.
    pub fn data_uri(&self) -> Result<String, JigsawError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| JigsawError::Encode(e.to_string()))?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
    }

    pub fn is_in_bank(&self) -> bool {
        self.slot.is_none()
    }
}

/// Result of selecting a piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected,

    /// The piece was already selected.
    Deselected,

    /// The puzzle is solved, or the piece is not in the bank.
    Ignored,
}

impl Selection {
    /// Phrase read aloud, if any.
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Selection::Selected => Some(prompts::JIGSAW_PIECE_SELECTED),
            Selection::Deselected | Selection::Ignored => None,
        }
    }
}

/// Result of clicking a slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The puzzle is solved, no piece is selected, or the slot does not exist.
    Ignored,

    /// The selected piece is placed. The piece that occupied the slot, if any, is back in the
    /// bank.
    Placed { displaced: Option<usize> },

    /// The selected piece is placed, and every piece is in its slot.
    Solved,
}

impl Placement {
    /// Phrase read aloud, if any.
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Placement::Solved => Some(prompts::JIGSAW_SOLVED),
            Placement::Ignored | Placement::Placed { .. } => None,
        }
    }
}

/// Jigsaw puzzle object.
#[derive(Debug)]
pub struct Jigsaw {
    /// Pieces, in bank order.
    pieces: Vec<Piece>,
    selected: Option<usize>,
    solved: bool,
}

impl Jigsaw {
    /// Decode a PNG picture and cut it.
    pub fn from_png<R: Rng + ?Sized>(bytes: &[u8], rng: &mut R) -> Result<Self, JigsawError> {
        let picture: RgbaImage = image::load_from_memory(bytes)
            .map_err(|e| JigsawError::Decode(e.to_string()))?
            .to_rgba8();
        Self::from_image(&picture, rng)
    }

    /// Cut the picture into square pieces and shuffle them in the bank.
    ///
    /// The size of the pieces is the third of the picture width.
    pub fn from_image<R: Rng + ?Sized>(
        picture: &RgbaImage,
        rng: &mut R,
    ) -> Result<Self, JigsawError> {
        let (width, height): (u32, u32) = picture.dimensions();
        let piece_size: u32 = width / GRID_SIZE;
        if piece_size == 0 || height < piece_size * GRID_SIZE {
            return Err(JigsawError::TooSmall(width, height));
        }

        let mut pieces: Vec<Piece> = Vec::with_capacity(PIECE_COUNT);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                pieces.push(Piece {
                    id: (y * GRID_SIZE + x) as usize,
                    slot: None,
                    image: imageops::crop_imm(
                        picture,
                        x * piece_size,
                        y * piece_size,
                        piece_size,
                        piece_size,
                    )
                    .to_image(),
                });
            }
        }
        pieces.shuffle(rng);
        debug!(
            "Jigsaw: {width}x{height} picture cut into {PIECE_COUNT} pieces of {piece_size} pixels"
        );

        Ok(Self {
            pieces,
            selected: None,
            solved: false,
        })
    }

    /// Phrase read aloud when the puzzle is ready.
    pub fn intro(&self) -> &'static str {
        prompts::JIGSAW_READY
    }

    /// Return all the pieces, in bank order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Return the pieces in the bank.
    pub fn bank(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_in_bank())
    }

    /// Return the piece in the given slot.
    pub fn piece_at(&self, slot: usize) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.slot == Some(slot))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Select a piece of the bank. Selecting the selected piece again deselects it.
    pub fn select(&mut self, id: usize) -> Selection {
        if self.solved {
            return Selection::Ignored;
        }
        if self.selected == Some(id) {
            self.selected = None;
            return Selection::Deselected;
        }
        if !self.pieces.iter().any(|p| p.id == id && p.is_in_bank()) {
            return Selection::Ignored;
        }
        self.selected = Some(id);
        Selection::Selected
    }

    /// Move the selected piece to the given slot.
    pub fn place(&mut self, slot: usize) -> Placement {
        if self.solved || slot >= PIECE_COUNT {
            return Placement::Ignored;
        }
        let Some(id) = self.selected.take() else {
            return Placement::Ignored;
        };

        let mut displaced: Option<usize> = None;
        for piece in self.pieces.iter_mut() {
            if piece.id == id {
                piece.slot = Some(slot);
            } else if piece.slot == Some(slot) {
                piece.slot = None;
                displaced = Some(piece.id);
            }
        }
        debug!("Jigsaw: piece {id} placed in slot {slot}");

        if self.pieces.iter().all(|p| p.slot == Some(p.id)) {
            debug!("Jigsaw solved");
            self.solved = true;
            return Placement::Solved;
        }
        Placement::Placed { displaced }
    }
}
