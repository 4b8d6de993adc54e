/*
gemini.rs

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

//! Request and response bodies of the generative API.
//!
//! Pictures and speech come back as base64 inline data in the first candidate of the response.
//! Pictures are PNG files. Speech is raw PCM: mono, 16-bit little-endian samples.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ServiceError;
use super::image::ImageGenerator;
use crate::config::Settings;

/// Exchange a request body with the generative API.
///
/// Implementations add the API key and perform the network call.
pub trait Transport: Send + Sync {
    /// Send the request body to the given model and return the decoded JSON response.
    fn generate_content(&self, model: &str, body: &Value) -> Result<Value, ServiceError>;
}

#[derive(Serialize, Debug)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<[&'static str; 1]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

/// Inline data part of a response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,

    /// Base64 payload.
    pub data: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Build the request body for a square picture.
pub fn image_request(prompt: &str) -> Value {
    let request = GenerateContentRequest {
        contents: [RequestContent {
            parts: [TextPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            image_config: Some(ImageConfig { aspect_ratio: "1:1" }),
            ..Default::default()
        },
    };
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Build the request body for reading the text aloud with the given voice.
pub fn speech_request(text: &str, voice_name: &str) -> Value {
    let request = GenerateContentRequest {
        contents: [RequestContent {
            parts: [TextPart { text }],
        }],
        generation_config: GenerationConfig {
            response_modalities: Some(["AUDIO"]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name },
                },
            }),
            ..Default::default()
        },
    };
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Return the first inline data part of the first candidate.
pub fn first_inline_data(response: Value) -> Result<InlineData, ServiceError> {
    let response: GenerateContentResponse =
        serde_json::from_value(response).map_err(|e| ServiceError::Decode(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
        .ok_or(ServiceError::NoContent)
}

/// Client for the generative API.
pub struct GeminiClient<T: Transport> {
    transport: T,
    image_model: String,
    speech_model: String,
    voice_name: String,
}

impl<T: Transport> GeminiClient<T> {
    /// Create a [`GeminiClient`] object that uses the models from the settings.
    pub fn new(transport: T, settings: &Settings) -> Self {
        Self {
            transport,
            image_model: settings.image_model.clone(),
            speech_model: settings.speech_model.clone(),
            voice_name: settings.voice_name.clone(),
        }
    }

    /// Generate a PNG picture and return it as a `data:` URI.
    pub fn generate_image(&self, prompt: &str) -> Result<String, ServiceError> {
        let response: Value = self
            .transport
            .generate_content(&self.image_model, &image_request(prompt))?;
        let inline: InlineData = first_inline_data(response)?;
        debug!("Image generated: {} base64 bytes", inline.data.len());
        Ok(format!("data:image/png;base64,{}", inline.data))
    }

    /// Read the text aloud and return the raw PCM bytes.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>, ServiceError> {
        let response: Value = self.transport.generate_content(
            &self.speech_model,
            &speech_request(text, &self.voice_name),
        )?;
        let inline: InlineData = first_inline_data(response)?;
        BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

impl<T: Transport> ImageGenerator for GeminiClient<T> {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self.generate_image(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport that records the requests and returns a canned response.
    struct CannedTransport {
        response: Result<Value, ServiceError>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl CannedTransport {
        fn new(response: Result<Value, ServiceError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn generate_content(&self, model: &str, body: &Value) -> Result<Value, ServiceError> {
            self.requests
                .lock()
                .expect("lock")
                .push((model.to_string(), body.clone()));
            match &self.response {
                Ok(v) => Ok(v.clone()),
                Err(ServiceError::Unavailable(m)) => Err(ServiceError::Unavailable(m.clone())),
                Err(_) => Err(ServiceError::NoContent),
            }
        }
    }

    fn inline_response(data: &str) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here you go"},
                        {"inlineData": {"mimeType": "image/png", "data": data}}
                    ]
                }
            }]
        })
    }

    #[test]
    fn image_request_shape() {
        let body = image_request("a cow");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "a cow");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "1:1");
        assert!(body["generationConfig"].get("speechConfig").is_none());
    }

    #[test]
    fn speech_request_shape() {
        let body = speech_request("merhaba", "Kore");
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
    }

    #[test]
    fn inline_data_is_found_after_text_parts() {
        let inline = first_inline_data(inline_response("QUJD")).expect("inline data");
        assert_eq!(inline.data, "QUJD");
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
        assert_eq!(
            first_inline_data(json!({"candidates": []})),
            Err(ServiceError::NoContent)
        );
        assert_eq!(first_inline_data(json!({})), Err(ServiceError::NoContent));
    }

    #[test]
    fn client_returns_a_data_uri() {
        let client = GeminiClient::new(
            CannedTransport::new(Ok(inline_response("QUJD"))),
            &Settings::default(),
        );
        assert_eq!(
            client.generate("a cow"),
            Ok("data:image/png;base64,QUJD".to_string())
        );
        let requests = client.transport.requests.lock().expect("lock");
        assert_eq!(requests[0].0, "gemini-2.5-flash-image");
    }

    #[test]
    fn client_decodes_speech() {
        // Two little-endian samples: 0x0100 and 0x7fff
        let client = GeminiClient::new(
            CannedTransport::new(Ok(inline_response("AAH/fw=="))),
            &Settings::default(),
        );
        assert_eq!(client.synthesize("merhaba"), Ok(vec![0x00, 0x01, 0xff, 0x7f]));
    }

    #[test]
    fn transport_errors_are_propagated() {
        let client = GeminiClient::new(
            CannedTransport::new(Err(ServiceError::Unavailable("offline".to_string()))),
            &Settings::default(),
        );
        assert_eq!(
            client.synthesize("merhaba"),
            Err(ServiceError::Unavailable("offline".to_string()))
        );
    }
}
