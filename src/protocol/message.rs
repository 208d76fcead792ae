//! Translation request and response messages.

use bytes::Bytes;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::phrase::Phrase;

/// A translation request ready to be framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub id: String,
    pub language: String,
    pub context: Option<String>,
    pub phrases: Vec<Phrase>,
}

impl TranslationRequest {
    /// Create a request with a fresh id.
    pub fn new(language: &str, context: Option<&str>, phrases: Vec<Phrase>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            language: language.to_string(),
            context: context.map(str::to_string),
            phrases,
        }
    }

    /// Frames: `[id, "", language, context, text, count, text, count, ...]`.
    ///
    /// The empty frame after the id is the delimiter servers route on. A
    /// missing context or count is sent as an empty frame.
    pub fn to_frames(&self) -> Vec<Bytes> {
        let mut frames = Vec::with_capacity(4 + self.phrases.len() * 2);
        frames.push(Bytes::from(self.id.clone()));
        frames.push(Bytes::new());
        frames.push(Bytes::from(self.language.clone()));
        frames.push(Bytes::from(self.context.clone().unwrap_or_default()));
        for phrase in &self.phrases {
            frames.push(Bytes::from(phrase.text.clone()));
            frames.push(match phrase.count {
                Some(count) => Bytes::from(count.to_string()),
                None => Bytes::new(),
            });
        }
        frames
    }

    /// Parse a request from frames, as a server would.
    pub fn from_frames(frames: &[Bytes]) -> ClientResult<Self> {
        if frames.len() < 4 || (frames.len() - 4) % 2 != 0 {
            return Err(ClientError::protocol(format!(
                "request has {} frames",
                frames.len()
            )));
        }
        let text = decode_frames(frames)?;
        let context = (!text[3].is_empty()).then(|| text[3].clone());
        let phrases = text[4..]
            .chunks(2)
            .map(|pair| {
                let count = if pair[1].is_empty() {
                    None
                } else {
                    Some(pair[1].parse::<i64>().map_err(|_| {
                        ClientError::protocol(format!("invalid count '{}'", pair[1]))
                    })?)
                };
                Ok(Phrase {
                    text: pair[0].clone(),
                    count,
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        Ok(Self {
            id: text[0].clone(),
            language: text[2].clone(),
            context,
            phrases,
        })
    }
}

/// What a response frame list turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResponse {
    /// Answer to the request in flight.
    Translations(Vec<String>),
    /// Answer to some earlier request; carries the id it was for.
    Stale(String),
}

impl TranslationResponse {
    /// Parse `[id, "", translation...]` received for `request`.
    pub fn parse(request: &TranslationRequest, frames: &[Bytes]) -> ClientResult<Self> {
        if frames.len() < 3 {
            return Err(ClientError::Server(
                "server could not handle request".to_string(),
            ));
        }

        let mut text = decode_frames(frames)?;
        if text[0] != request.id {
            return Ok(TranslationResponse::Stale(text.swap_remove(0)));
        }

        let translations = text.split_off(2);
        if translations.len() == 1 && translations[0].is_empty() {
            return Err(ClientError::Server(
                "server encountered an error".to_string(),
            ));
        }

        if translations.len() != request.phrases.len() {
            return Err(ClientError::protocol(format!(
                "expected {} translations, got {}",
                request.phrases.len(),
                translations.len()
            )));
        }

        Ok(TranslationResponse::Translations(translations))
    }

    /// Build response frames, as a server would.
    pub fn frames_for(request_id: &str, translations: &[&str]) -> Vec<Bytes> {
        let mut frames = Vec::with_capacity(2 + translations.len());
        frames.push(Bytes::from(request_id.to_string()));
        frames.push(Bytes::new());
        frames.extend(
            translations
                .iter()
                .map(|t| Bytes::from(t.to_string())),
        );
        frames
    }
}

fn decode_frames(frames: &[Bytes]) -> ClientResult<Vec<String>> {
    frames
        .iter()
        .map(|frame| {
            String::from_utf8(frame.to_vec())
                .map_err(|_| ClientError::protocol("frame is not valid UTF-8"))
        })
        .collect()
}
