/*
speech.rs

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

//! Read phrases aloud.
//!
//! The [`SpeechPlayer`] object owns the only playing utterance. Starting a new utterance stops
//! the current one, which never completes. The voices are tried in order: the generative voice
//! first, and then the platform voice. When no voice can speak, the utterance ends silently.
//!
//! The player does not know when the audio ends. The audio layer reports the end of the
//! playback with [`SpeechPlayer::playback_finished`].

use async_channel::{Receiver, Sender, TryRecvError};
use log::{debug, warn};

use super::ServiceError;
use super::gemini::{GeminiClient, Transport};
use crate::config::Settings;

/// Identifier of an utterance, allocated by the player.
pub type UtteranceId = u64;

/// How an utterance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The audio was played until the end.
    Finished,

    /// The playback was stopped with [`SpeechPlayer::stop_all`].
    Stopped,

    /// No voice could read the text.
    Silent,
}

/// State of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceState {
    Playing,
    Ended(PlaybackEnd),

    /// Another utterance started before this one ended. No completion is delivered.
    Preempted,
}

/// Handle on an utterance, returned by [`SpeechPlayer::start`].
#[derive(Debug)]
pub struct Utterance {
    id: UtteranceId,
    done: Receiver<PlaybackEnd>,
    ended: Option<UtteranceState>,
}

impl Utterance {
    fn new(id: UtteranceId, done: Receiver<PlaybackEnd>) -> Self {
        Self {
            id,
            done,
            ended: None,
        }
    }

    pub fn id(&self) -> UtteranceId {
        self.id
    }

    /// Return the state of the utterance without blocking.
    pub fn state(&mut self) -> UtteranceState {
        if let Some(state) = self.ended {
            return state;
        }
        let state: UtteranceState = match self.done.try_recv() {
            Ok(end) => UtteranceState::Ended(end),
            Err(TryRecvError::Empty) => return UtteranceState::Playing,
            Err(TryRecvError::Closed) => UtteranceState::Preempted,
        };
        self.ended = Some(state);
        state
    }

    /// Block until the utterance ends.
    ///
    /// Return None if the utterance was preempted.
    pub fn wait(&mut self) -> Option<PlaybackEnd> {
        if let Some(state) = self.ended {
            return match state {
                UtteranceState::Ended(end) => Some(end),
                _ => None,
            };
        }
        let state: UtteranceState = match self.done.recv_blocking() {
            Ok(end) => UtteranceState::Ended(end),
            Err(_) => UtteranceState::Preempted,
        };
        self.ended = Some(state);
        match state {
            UtteranceState::Ended(end) => Some(end),
            _ => None,
        }
    }
}

/// A voice that can read text aloud.
pub trait SpeechBackend: Send {
    /// Name of the voice, for the logs.
    fn name(&self) -> &str;

    /// Start reading the text. The call returns as soon as the audio starts.
    fn play(&mut self, id: UtteranceId, text: &str) -> Result<(), ServiceError>;

    /// Stop the audio immediately.
    fn stop(&mut self);
}

/// Convert 16-bit little-endian PCM bytes to samples in [-1, 1).
///
/// A trailing odd byte is ignored.
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]) as f32 / 32768.0)
        .collect()
}

/// Audio device that plays mono samples.
pub trait AudioOutput: Send {
    fn play(
        &mut self,
        id: UtteranceId,
        samples: Vec<f32>,
        sample_rate: u32,
    ) -> Result<(), ServiceError>;

    fn stop(&mut self);
}

/// Voice of the generative speech model.
pub struct GeminiVoice<T: Transport, O: AudioOutput> {
    client: GeminiClient<T>,
    output: O,
    sample_rate: u32,
}

impl<T: Transport, O: AudioOutput> GeminiVoice<T, O> {
    pub fn new(client: GeminiClient<T>, output: O, settings: &Settings) -> Self {
        Self {
            client,
            output,
            sample_rate: settings.sample_rate,
        }
    }
}

impl<T: Transport, O: AudioOutput> SpeechBackend for GeminiVoice<T, O> {
    fn name(&self) -> &str {
        "gemini"
    }

    fn play(&mut self, id: UtteranceId, text: &str) -> Result<(), ServiceError> {
        let pcm: Vec<u8> = self.client.synthesize(text)?;
        let samples: Vec<f32> = decode_pcm16(&pcm);
        if samples.is_empty() {
            return Err(ServiceError::NoContent);
        }
        debug!(
            "Utterance {id}: {} samples at {} Hz",
            samples.len(),
            self.sample_rate
        );
        self.output.play(id, samples, self.sample_rate)
    }

    fn stop(&mut self) {
        self.output.stop();
    }
}

/// Utterance for the speech synthesizer of the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformUtterance {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Speech synthesizer of the platform.
pub trait UtteranceEngine: Send {
    /// Whether the platform has a speech synthesizer.
    fn is_available(&self) -> bool;

    fn speak(&mut self, id: UtteranceId, utterance: PlatformUtterance)
    -> Result<(), ServiceError>;

    fn cancel(&mut self);
}

/// Voice of the platform, used when the generative voice fails.
pub struct PlatformVoice<E: UtteranceEngine> {
    engine: E,
    language: String,
    rate: f32,
    pitch: f32,
}

impl<E: UtteranceEngine> PlatformVoice<E> {
    pub fn new(engine: E, settings: &Settings) -> Self {
        Self {
            engine,
            language: settings.language.clone(),
            rate: settings.speech_rate,
            pitch: settings.speech_pitch,
        }
    }
}

impl<E: UtteranceEngine> SpeechBackend for PlatformVoice<E> {
    fn name(&self) -> &str {
        "platform"
    }

    fn play(&mut self, id: UtteranceId, text: &str) -> Result<(), ServiceError> {
        if !self.engine.is_available() {
            return Err(ServiceError::Unavailable(
                "no speech synthesizer on this platform".to_string(),
            ));
        }
        self.engine.speak(
            id,
            PlatformUtterance {
                text: text.to_string(),
                language: self.language.clone(),
                rate: self.rate,
                pitch: self.pitch,
            },
        )
    }

    fn stop(&mut self) {
        self.engine.cancel();
    }
}

/// The playing utterance.
struct Current {
    id: UtteranceId,

    /// Index of the voice that reads the utterance.
    backend: usize,

    /// Sends the end of the utterance. Dropping the sender without sending marks the
    /// utterance as preempted.
    sender: Sender<PlaybackEnd>,
}

/// Speech manager. Only one utterance is audible at a time.
pub struct SpeechPlayer {
    backends: Vec<Box<dyn SpeechBackend>>,
    current: Option<Current>,
    next_id: UtteranceId,
}

impl SpeechPlayer {
    /// Create a [`SpeechPlayer`] object. The voices are tried in the given order.
    pub fn new(backends: Vec<Box<dyn SpeechBackend>>) -> Self {
        Self {
            backends,
            current: None,
            next_id: 1,
        }
    }

    /// Create a player without voice. Every utterance ends silently.
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    /// Start reading the text, after stopping the current utterance.
    pub fn start(&mut self, text: &str) -> Utterance {
        self.preempt();

        let id: UtteranceId = self.next_id;
        self.next_id += 1;
        let (sender, receiver): (Sender<PlaybackEnd>, Receiver<PlaybackEnd>) =
            async_channel::bounded(1);

        for (index, backend) in self.backends.iter_mut().enumerate() {
            match backend.play(id, text) {
                Ok(()) => {
                    debug!("Utterance {id} played by the {} voice", backend.name());
                    self.current = Some(Current {
                        id,
                        backend: index,
                        sender,
                    });
                    return Utterance::new(id, receiver);
                }
                Err(e) => warn!("The {} voice cannot read utterance {id}: {e}", backend.name()),
            }
        }

        debug!("Utterance {id} is silent");
        let _ = sender.try_send(PlaybackEnd::Silent);
        Utterance::new(id, receiver)
    }

    /// Stop the current utterance without completing it.
    fn preempt(&mut self) {
        if let Some(current) = self.current.take() {
            debug!("Utterance {} preempted", current.id);
            if let Some(backend) = self.backends.get_mut(current.backend) {
                backend.stop();
            }
        }
    }

    /// Stop the current utterance. The utterance ends with [`PlaybackEnd::Stopped`].
    pub fn stop_all(&mut self) {
        if let Some(current) = self.current.take() {
            debug!("Utterance {} stopped", current.id);
            if let Some(backend) = self.backends.get_mut(current.backend) {
                backend.stop();
            }
            let _ = current.sender.try_send(PlaybackEnd::Stopped);
        }
    }

    /// Report that the audio of the given utterance reached the end.
    ///
    /// Reports for an utterance that is no longer current are ignored. Return whether the
    /// report was accepted.
    pub fn playback_finished(&mut self, id: UtteranceId) -> bool {
        match self.current.take_if(|c| c.id == id) {
            Some(current) => {
                let _ = current.sender.try_send(PlaybackEnd::Finished);
                true
            }
            None => {
                debug!("Ignoring the end of stale utterance {id}");
                false
            }
        }
    }

    /// Identifier of the playing utterance.
    pub fn current(&self) -> Option<UtteranceId> {
        self.current.as_ref().map(|c| c.id)
    }

    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }
}
