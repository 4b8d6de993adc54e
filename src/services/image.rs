/*
image.rs

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

//! Generate pictures for characters and jigsaw puzzles.
//!
//! The generation runs in a background thread. [`ImageService`] keeps the last request only:
//! the result of a superseded request is discarded when its thread completes.

use async_channel::Sender;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};
use std::sync::Arc;
use std::thread;

use super::ServiceError;
use super::slot::{Poll, Slot};
use crate::character::ImageRef;
use crate::prompts;

/// Placeholder for jigsaw pictures.
pub const JIGSAW_PLACEHOLDER_URL: &str = "https://image.pollinations.ai/prompt/cute%20cartoon%20puzzle%20image?width=512&height=512&nologo=true";

/// Service that turns a prompt into a picture.
pub trait ImageGenerator: Send + Sync {
    /// Generate a picture and return it as a `data:` URI.
    fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Generator used when no service is configured. Every request fails.
pub struct Offline;

impl ImageGenerator for Offline {
    fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable("no image service".to_string()))
    }
}

/// Characters that URL components keep as they are, in addition to the ones
/// [`urlencoding::encode`] keeps.
const URL_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a URL component the way the web pages that display the pictures do.
pub fn encode_component(text: &str) -> String {
    URL_COMPONENT_MARKS
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |encoded, &(escaped, mark)| {
            encoded.replace(escaped, mark)
        })
}

/// Return the placeholder picture for a character. The same name always gives the same
/// picture.
pub fn placeholder_url(name: &str) -> String {
    format!(
        "https://api.dicebear.com/9.x/pixel-art/svg?seed={}",
        encode_component(name)
    )
}

/// Generate the portrait of a character, or return its placeholder.
pub fn character_image(generator: &dyn ImageGenerator, name: &str, description: &str) -> ImageRef {
    match generator.generate(&prompts::character_prompt(name, description)) {
        Ok(uri) => ImageRef::Generated(uri),
        Err(e) => {
            warn!("Cannot generate the picture of {name}: {e}");
            ImageRef::Placeholder(placeholder_url(name))
        }
    }
}

/// Generate a jigsaw picture from the prompt, or return the jigsaw placeholder.
pub fn jigsaw_image(generator: &dyn ImageGenerator, prompt: &str) -> ImageRef {
    match generator.generate(prompt) {
        Ok(uri) => ImageRef::Generated(uri),
        Err(e) => {
            warn!("Cannot generate the jigsaw picture: {e}");
            ImageRef::Placeholder(JIGSAW_PLACEHOLDER_URL.to_string())
        }
    }
}

/// Return the bytes of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ServiceError> {
    let (_, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or_else(|| ServiceError::Decode("not a base64 data URI".to_string()))?;
    BASE64
        .decode(payload.as_bytes())
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Run image requests in the background, one at a time.
pub struct ImageService {
    generator: Arc<dyn ImageGenerator>,
    slot: Slot<ImageRef>,
}

impl ImageService {
    /// Create an [`ImageService`] object.
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            slot: Slot::new("image"),
        }
    }

    /// Start generating the portrait of a character.
    pub fn request_character(&mut self, name: &str, description: &str) {
        let name: String = name.to_string();
        let description: String = description.to_string();
        self.spawn(move |g| character_image(g, &name, &description));
    }

    /// Start generating a jigsaw picture from the given prompt.
    pub fn request_jigsaw(&mut self, prompt: &str) {
        let prompt: String = prompt.to_string();
        self.spawn(move |g| jigsaw_image(g, &prompt));
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn ImageGenerator) -> ImageRef + Send + 'static,
    {
        let sender: Sender<ImageRef> = self.slot.open();
        let generator: Arc<dyn ImageGenerator> = Arc::clone(&self.generator);
        thread::spawn(move || {
            let image: ImageRef = job(generator.as_ref());
            if sender.send_blocking(image).is_err() {
                debug!("Image request superseded: result dropped");
            }
        });
    }

    /// Whether a request is in progress.
    pub fn is_busy(&self) -> bool {
        self.slot.is_open()
    }

    /// Return the result of the pending request if it is available.
    pub fn poll(&mut self) -> Option<ImageRef> {
        match self.slot.poll() {
            Poll::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Block until the pending request completes and return its result.
    ///
    /// Return None if there is no pending request.
    pub fn wait(&mut self) -> Option<ImageRef> {
        self.slot.wait()
    }

    /// Forget the pending request.
    pub fn cancel(&mut self) {
        self.slot.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    struct Echo;

    impl ImageGenerator for Echo {
        fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
            Ok(format!("data:image/png;base64,{}", BASE64.encode(prompt)))
        }
    }

    /// Generator that blocks the "first" prompt until the test releases it.
    struct Gate {
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl ImageGenerator for Gate {
        fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
            if prompt == "first" {
                let release = self.release.lock().expect("lock");
                let _ = release.recv_timeout(Duration::from_secs(5));
            }
            Ok(format!("data:image/png;base64,{}", BASE64.encode(prompt)))
        }
    }

    #[test]
    fn components_keep_the_marks() {
        assert_eq!(encode_component("Bambi!"), "Bambi!");
        assert_eq!(encode_component("Kedi (mavi) *'"), "Kedi%20(mavi)%20*'");
        assert_eq!(encode_component("a,b&c"), "a%2Cb%26c");
        assert_eq!(encode_component("%21"), "%2521");
        assert_eq!(
            placeholder_url("Bambi!"),
            "https://api.dicebear.com/9.x/pixel-art/svg?seed=Bambi!"
        );
    }

    #[test]
    fn failure_gives_a_deterministic_placeholder() {
        let first = character_image(&Offline, "Boncuk", "sevimli");
        let second = character_image(&Offline, "Boncuk", "başka");
        assert_eq!(first, second);
        assert_eq!(
            first,
            ImageRef::Placeholder("https://api.dicebear.com/9.x/pixel-art/svg?seed=Boncuk".to_string())
        );
        assert_ne!(first, character_image(&Offline, "Şeker", "sevimli"));
    }

    #[test]
    fn placeholder_names_are_url_encoded() {
        assert_eq!(
            placeholder_url("Çilek Kız"),
            "https://api.dicebear.com/9.x/pixel-art/svg?seed=%C3%87ilek%20K%C4%B1z"
        );
    }

    #[test]
    fn jigsaw_fallback() {
        assert_eq!(
            jigsaw_image(&Offline, "anything"),
            ImageRef::Placeholder(JIGSAW_PLACEHOLDER_URL.to_string())
        );
        assert!(matches!(jigsaw_image(&Echo, "cows"), ImageRef::Generated(_)));
    }

    #[test]
    fn data_uri_round_trip() {
        let uri = Echo.generate("hello").expect("generated");
        assert_eq!(decode_data_uri(&uri), Ok(b"hello".to_vec()));
        assert!(decode_data_uri("https://example.com/a.png").is_err());
    }

    #[test]
    fn service_returns_the_result() {
        let mut service = ImageService::new(Arc::new(Offline));
        assert!(!service.is_busy());
        assert_eq!(service.wait(), None);

        service.request_character("Boncuk", "");
        assert!(service.is_busy());
        assert_eq!(
            service.wait(),
            Some(ImageRef::Placeholder(placeholder_url("Boncuk")))
        );
        assert!(!service.is_busy());
    }

    #[test]
    fn new_request_supersedes_the_pending_one() {
        let (release, gate) = mpsc::channel();
        let mut service = ImageService::new(Arc::new(Gate {
            release: Mutex::new(gate),
        }));

        service.request_jigsaw("first");
        service.request_jigsaw("second");
        let image = service.wait().expect("second result");
        assert_eq!(decode_data_uri(image.src()), Ok(b"second".to_vec()));

        release.send(()).expect("release the first request");
        assert_eq!(service.poll(), None);
    }
}
