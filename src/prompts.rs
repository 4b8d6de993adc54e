/*
prompts.rs

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

//! Fixed texts: spoken phrases and image generation prompts.
//!
//! The game speaks Turkish only. Phrases that embed a value are format templates that are
//! rendered with [`formatx`] at runtime.

use formatx::formatx;
use log::warn;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Names offered to children who cannot type yet.
pub const CUTE_NAMES: [&str; 15] = [
    "Boncuk", "Şeker", "Bulut", "Pamuk", "Limon", "Çilek", "Pofuduk", "Zeytin", "Maviş", "Güneş",
    "Fıstık", "Bambi", "Roket", "Atom", "Süper",
];

/// Description used when the player does not describe the character.
pub const DEFAULT_DESCRIPTION: &str = "Sevimli, renkli, mutlu bir karakter.";

/// Name of a painted character when the player does not name it.
pub const DEFAULT_DRAWN_NAME: &str = "Minik Ressam";

/// Description of the painted characters.
pub const DRAWN_DESCRIPTION: &str = "Elle çizilmiş özel karakter";

// Character creation
pub const CREATOR_INTRO: &str = "Yeni karakter yapalım! Önce ismini seç, sonra bana anlat.";
pub const CREATOR_REWARD_INTRO: &str = "Ödül kazandın! Hadi yeni bir karakter yapalım!";
pub const CREATOR_NAME_HELP: &str =
    "Karakterinin adı ne olsun? Buraya yazabilirsin veya zara basabilirsin.";
pub const CREATOR_DESCRIPTION_HELP: &str =
    "Karakterin neye benzesin? Aşağıdaki mikrofona bas ve bana anlat.";
pub const CREATOR_DRAWING: &str = "Harika! Karakterini çiziyorum, biraz bekle...";
pub const CREATOR_READY: &str = "İşte karakterin hazır!";
const CREATOR_NAME_SUGGESTION: &str = "İsmi {} olsun mu?";

/// Notice displayed once when the platform has no speech recognition.
pub const VOICE_INPUT_UNAVAILABLE: &str =
    "Bu tarayıcıda sesli konuşma desteklenmiyor. Lütfen Chrome kullanın.";

// Drawing canvas
pub const PAINTER_BRUSH: &str = "Fırçayı seçtin.";
pub const PAINTER_ERASER: &str = "Silgiyi seçtin.";
pub const PAINTER_CLEARED: &str = "Sayfa tertemiz oldu!";
pub const PAINTER_DONE: &str = "Harika bir resim! Ekliyorum.";

// Matching game
pub const GAME_CORRECT: &str = "Harikasın! Doğru bildin!";
pub const GAME_WRONG: &str = "Üzgünüm, yanlış oldu. Tekrar deneyelim mi?";
pub const GAME_HOW_TO_PLAY: &str = "Nasıl oynanır anlatıyorum. Sol taraftaki resimlere bak ve \
    sayılarını bul. Sonra soru işaretinin yerine hangi sayı gelmeli, aşağıdan işaretle!";

// Jigsaw
pub const JIGSAW_LOADING: &str = "Yeni bir resim çiziyorum, bekle...";
pub const JIGSAW_READY: &str = "Resim hazır! Parçaları yerine koyabilir misin?";
pub const JIGSAW_PIECE_SELECTED: &str = "Parçayı seçtin. Şimdi koymak istediğin kutuya tıkla.";
pub const JIGSAW_SOLVED: &str = "Tebrikler! Yapbozu tamamladın!";
pub const JIGSAW_FAILED: &str = "Bir sorun oldu, tekrar deneyelim.";

// Stories
pub const STORY_WELCOME: &str = "Masal köşesine hoş geldin! Okumak istediğin masalı seç.";
pub const STORY_END: &str = "Masal bitti! Başka bir masal seçelim mi?";

/// Subjects for the jigsaw pictures.
pub const JIGSAW_SUBJECTS: [&str; 6] = [
    "farm animals in a sunny meadow",
    "a colorful underwater coral reef with fish",
    "cute dinosaurs playing in prehistoric jungle",
    "space rocket and smiling planets",
    "magical forest with glowing mushrooms and fairies",
    "a busy town with cute colorful cars",
];

const CHARACTER_PROMPT: &str = "A cute pixel art character portrait of {}. Description: {}. \
    Style: Stardew Valley inspired, 16-bit retro pixel art, vibrant colors, white background. \
    Make it look like a friendly RPG character icon suitable for children.";

const JIGSAW_PROMPT: &str = "A cute, vibrant, detailed cartoon illustration of {}. \
    Style: Children's book illustration, colorful, clear outlines, simple shapes, high contrast. \
    Make it suitable for a jigsaw puzzle for kids. Aspect ratio 1:1.";

/// Render a template. The templates are constants, so a failure is a programming error that
/// only costs the placeholder values.
fn render(template: &str, values: &[&str]) -> String {
    let res = match values {
        [a] => formatx!(template, a),
        [a, b] => formatx!(template, a, b),
        _ => Ok(template.to_string()),
    };
    res.unwrap_or_else(|e| {
        warn!("Cannot render {template:?}: {e:?}");
        template.to_string()
    })
}

/// Return a random name from [`CUTE_NAMES`].
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CUTE_NAMES.choose(rng).copied().unwrap_or(CUTE_NAMES[0])
}

/// Phrase suggesting a name to the player.
pub fn name_suggestion(name: &str) -> String {
    render(CREATOR_NAME_SUGGESTION, &[name])
}

/// Prompt for the portrait of a character.
pub fn character_prompt(name: &str, description: &str) -> String {
    render(CHARACTER_PROMPT, &[name, description])
}

/// Prompt for a random jigsaw picture.
pub fn jigsaw_prompt<R: Rng + ?Sized>(rng: &mut R) -> String {
    let subject: &str = JIGSAW_SUBJECTS.choose(rng).copied().unwrap_or(JIGSAW_SUBJECTS[0]);
    render(JIGSAW_PROMPT, &[subject])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn templates_are_rendered() {
        assert_eq!(name_suggestion("Boncuk"), "İsmi Boncuk olsun mu?");
        let prompt = character_prompt("Roket", "mavi bir kedi");
        assert!(prompt.starts_with("A cute pixel art character portrait of Roket. "));
        assert!(prompt.contains("Description: mavi bir kedi."));
    }

    #[test]
    fn jigsaw_prompt_uses_a_known_subject() {
        let mut rng = StdRng::seed_from_u64(4);
        let prompt = jigsaw_prompt(&mut rng);
        assert!(JIGSAW_SUBJECTS.iter().any(|s| prompt.contains(s)));
    }

    #[test]
    fn random_names_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            assert!(CUTE_NAMES.contains(&random_name(&mut rng)));
        }
    }
}
