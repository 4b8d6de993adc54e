/*
creator.rs

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

//! Character creation.
//!
//! The player gives a name and a description, or nothing at all: young children cannot type,
//! so an empty name is replaced by a random cute name and an empty description by a default
//! one. Outside of rewards, the number of characters is limited.

use log::debug;
use rand::Rng;

use crate::character::{Character, ImageRef};
use crate::config::Settings;
use crate::drawing::{DrawingError, DrawingSurface};
use crate::prompts;
use crate::roster::Roster;
use crate::services::image::{ImageGenerator, ImageService, character_image};

/// Why the creator is open.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CreationMode {
    /// Opened from the main menu.
    #[default]
    Default,

    /// Opened as a reward during the matching game. The limit does not apply.
    Reward,
}

impl CreationMode {
    /// Phrase read when the creator opens.
    pub fn intro(self) -> &'static str {
        match self {
            CreationMode::Default => prompts::CREATOR_INTRO,
            CreationMode::Reward => prompts::CREATOR_REWARD_INTRO,
        }
    }
}

/// Name and description being entered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CharacterDraft {
    pub name: String,
    pub description: String,
}

impl CharacterDraft {
    /// Replace the name with a random one and return the phrase that suggests it.
    pub fn pick_random_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        self.name = prompts::random_name(rng).to_string();
        prompts::name_suggestion(&self.name)
    }

    /// Append the words recognized by the voice input to the description.
    pub fn append_transcript(&mut self, transcript: &str) {
        let transcript: &str = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(transcript);
    }

    /// Return the name and the description to use, with the defaults for empty fields.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> (String, String) {
        let name: &str = match self.name.trim() {
            "" => prompts::random_name(rng),
            n => n,
        };
        let description: &str = match self.description.trim() {
            "" => prompts::DEFAULT_DESCRIPTION,
            d => d,
        };
        (name.to_string(), description.to_string())
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}

/// Character added to the roster, with the phrase read aloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Created<'r> {
    pub character: &'r Character,
    pub phrase: &'static str,
}

/// Character waiting for its picture.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCharacter {
    pub name: String,
    pub description: String,
}

impl PendingCharacter {
    /// Phrase read aloud while the picture is drawn.
    pub fn phrase(&self) -> &'static str {
        prompts::CREATOR_DRAWING
    }

    /// Add the character to the roster with the generated picture.
    pub fn complete(self, roster: &mut Roster, image: ImageRef) -> Created<'_> {
        Created {
            character: roster.add(&self.name, &self.description, image),
            phrase: prompts::CREATOR_READY,
        }
    }
}

/// Character creator object.
#[derive(Debug)]
pub struct Creator {
    mode: CreationMode,
    limit: usize,
    pub draft: CharacterDraft,
}

impl Creator {
    /// Create a [`Creator`] object. The limit comes from the settings.
    pub fn new(mode: CreationMode, settings: &Settings) -> Self {
        Self {
            mode,
            limit: settings.creation_limit,
            draft: CharacterDraft::default(),
        }
    }

    pub fn mode(&self) -> CreationMode {
        self.mode
    }

    /// Phrase that explains the name field.
    pub fn name_help(&self) -> &'static str {
        prompts::CREATOR_NAME_HELP
    }

    /// Phrase that explains the description field.
    pub fn description_help(&self) -> &'static str {
        prompts::CREATOR_DESCRIPTION_HELP
    }

    /// Whether one more character can be created.
    pub fn can_create(&self, roster: &Roster) -> bool {
        self.mode == CreationMode::Reward || roster.len() < self.limit
    }

    /// Create the character from the draft, wait for its picture, and add it to the roster.
    ///
    /// Return None when the limit is reached.
    pub fn create<'r, R: Rng + ?Sized>(
        &mut self,
        roster: &'r mut Roster,
        generator: &dyn ImageGenerator,
        rng: &mut R,
    ) -> Option<Created<'r>> {
        let pending: PendingCharacter = self.start(roster, rng)?;
        let picture: ImageRef = character_image(generator, &pending.name, &pending.description);
        Some(pending.complete(roster, picture))
    }

    /// Start the creation of the character from the draft and request its picture in the
    /// background. Complete the creation with [`PendingCharacter::complete`] when the
    /// service delivers the picture.
    ///
    /// Return None when the limit is reached.
    pub fn request<R: Rng + ?Sized>(
        &mut self,
        roster: &Roster,
        service: &mut ImageService,
        rng: &mut R,
    ) -> Option<PendingCharacter> {
        let pending: PendingCharacter = self.start(roster, rng)?;
        service.request_character(&pending.name, &pending.description);
        Some(pending)
    }

    fn start<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) -> Option<PendingCharacter> {
        if !self.can_create(roster) {
            debug!(
                "Creation refused: {} characters, limit {}",
                roster.len(),
                self.limit
            );
            return None;
        }
        let (name, description): (String, String) = self.draft.resolve(rng);
        self.draft.clear();
        Some(PendingCharacter { name, description })
    }
}

/// Add the picture painted on the canvas as a new character.
pub fn add_drawn<'r>(
    roster: &'r mut Roster,
    name: &str,
    surface: &DrawingSurface,
) -> Result<Created<'r>, DrawingError> {
    let uri: String = surface.export_data_uri()?;
    let name: &str = match name.trim() {
        "" => prompts::DEFAULT_DRAWN_NAME,
        n => n,
    };
    Ok(Created {
        character: roster.add(name, prompts::DRAWN_DESCRIPTION, ImageRef::Drawn(uri)),
        phrase: prompts::PAINTER_DONE,
    })
}

/// Voice input for the character description.
///
/// When the platform has no speech recognition, the player is told once, and the voice input
/// stays disabled for the session.
#[derive(Debug)]
pub struct VoiceInput {
    available: bool,
    notified: bool,
}

impl VoiceInput {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            notified: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Return the notice to display when the player asks for the voice input on a platform
    /// without speech recognition. The notice is returned only once.
    pub fn notice_once(&mut self) -> Option<&'static str> {
        if self.available || self.notified {
            return None;
        }
        self.notified = true;
        Some(prompts::VOICE_INPUT_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::services::image::{Offline, placeholder_url};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    struct Painter;

    impl ImageGenerator for Painter {
        fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
            Ok("data:image/png;base64,AAAA".to_string())
        }
    }

    #[test]
    fn empty_draft_gets_defaults() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut roster = Roster::new();
        let mut creator = Creator::new(CreationMode::Default, &Settings::default());
        creator.draft.name = "   ".to_string();

        let created = creator
            .create(&mut roster, &Painter, &mut rng)
            .expect("below the limit");
        assert_eq!(created.phrase, prompts::CREATOR_READY);
        let character = created.character;
        assert!(prompts::CUTE_NAMES.contains(&character.name.as_str()));
        assert_eq!(character.description, prompts::DEFAULT_DESCRIPTION);
        assert_eq!(
            character.image,
            ImageRef::Generated("data:image/png;base64,AAAA".to_string())
        );
    }

    #[test]
    fn failed_picture_gives_a_placeholder() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut roster = Roster::new();
        let mut creator = Creator::new(CreationMode::Default, &Settings::default());
        creator.draft.name = " Boncuk ".to_string();
        creator.draft.append_transcript("mavi");
        creator.draft.append_transcript(" bir kedi ");

        let character = creator
            .create(&mut roster, &Offline, &mut rng)
            .expect("below the limit")
            .character;
        assert_eq!(character.name, "Boncuk");
        assert_eq!(character.description, "mavi bir kedi");
        assert_eq!(
            character.image,
            ImageRef::Placeholder(placeholder_url("Boncuk"))
        );
        assert_eq!(creator.draft, CharacterDraft::default());
    }

    #[test]
    fn limit_applies_outside_of_rewards() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut roster = Roster::new();
        let mut creator = Creator::new(CreationMode::Default, &Settings::default());
        for _ in 0..3 {
            assert!(creator.create(&mut roster, &Offline, &mut rng).is_some());
        }
        assert!(!creator.can_create(&roster));
        assert!(creator.create(&mut roster, &Offline, &mut rng).is_none());
        assert_eq!(roster.len(), 3);

        assert_eq!(creator.name_help(), prompts::CREATOR_NAME_HELP);
        assert_eq!(creator.description_help(), prompts::CREATOR_DESCRIPTION_HELP);

        let mut reward = Creator::new(CreationMode::Reward, &Settings::default());
        assert_eq!(reward.mode().intro(), prompts::CREATOR_REWARD_INTRO);
        assert!(reward.create(&mut roster, &Offline, &mut rng).is_some());
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn background_creation() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut roster = Roster::new();
        let mut service = ImageService::new(Arc::new(Offline));
        let mut creator = Creator::new(CreationMode::Default, &Settings::default());
        creator.draft.name = "Roket".to_string();

        let pending = creator
            .request(&roster, &mut service, &mut rng)
            .expect("below the limit");
        assert_eq!(pending.phrase(), prompts::CREATOR_DRAWING);
        let picture = service.wait().expect("picture");
        let created = pending.complete(&mut roster, picture);
        assert_eq!(created.phrase, prompts::CREATOR_READY);
        assert_eq!(created.character.name, "Roket");
        assert!(created.character.image.is_placeholder());
    }

    #[test]
    fn random_name_is_suggested() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut draft = CharacterDraft::default();
        let phrase = draft.pick_random_name(&mut rng);
        assert_eq!(phrase, format!("İsmi {} olsun mu?", draft.name));
    }

    #[test]
    fn drawn_characters() {
        let mut roster = Roster::new();
        let surface = DrawingSurface::new(10);
        let created = add_drawn(&mut roster, "", &surface).expect("exported");
        assert_eq!(created.phrase, prompts::PAINTER_DONE);
        let character = created.character;
        assert_eq!(character.name, prompts::DEFAULT_DRAWN_NAME);
        assert_eq!(character.description, prompts::DRAWN_DESCRIPTION);
        assert!(matches!(
            &character.image,
            ImageRef::Drawn(uri) if uri.starts_with("data:image/png;base64,")
        ));

        let named = add_drawn(&mut roster, " Pamuk ", &surface).expect("exported");
        assert_eq!(named.character.name, "Pamuk");
    }

    #[test]
    fn voice_input_notice_is_shown_once() {
        let mut missing = VoiceInput::new(false);
        assert_eq!(missing.notice_once(), Some(prompts::VOICE_INPUT_UNAVAILABLE));
        assert_eq!(missing.notice_once(), None);
        assert!(!missing.is_available());

        let mut present = VoiceInput::new(true);
        assert_eq!(present.notice_once(), None);
    }
}
