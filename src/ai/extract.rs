//! Poetic fragment extraction.
//!
//! [`FragmentExtractor`] turns raw entry text into two phrase corpora, one
//! sized for the four-line collage and one for the eight-line collage.
//! [`OllamaExtractor`] asks a local model; [`LocalExtractor`] splits the text
//! on punctuation and needs no network. Callers fall back to the local
//! extractor when the model fails.

use super::ollama::OllamaClient;
use super::prompts::extract_prompt;
use crate::collage::char_len;
use crate::constants::{
    FALLBACK_EIGHT_LINE_PHRASES, FALLBACK_FILLER_PHRASES, FALLBACK_FOUR_LINE_PHRASES,
    FALLBACK_MIN_SEGMENTS, FALLBACK_SEPARATORS, MIN_EXTRACTED_PHRASES, MIN_PHRASE_CHARS,
};
use crate::errors::{AIError, AppResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::cell::RefCell;
use tracing::{debug, info};

/// Phrases extracted from one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoeticResponse {
    pub four_lines: Vec<String>,
    pub eight_lines: Vec<String>,
}

impl PoeticResponse {
    /// Both corpora merged, first occurrence wins.
    pub fn pool(&self) -> Vec<String> {
        let mut pool: Vec<String> = Vec::new();
        for phrase in self.four_lines.iter().chain(&self.eight_lines) {
            if !pool.contains(phrase) {
                pool.push(phrase.clone());
            }
        }
        pool
    }
}

/// Source of collage phrases for an entry.
pub trait FragmentExtractor {
    fn extract(&self, text: &str) -> AppResult<PoeticResponse>;
}

/// Extracts phrases with an Ollama chat model.
pub struct OllamaExtractor<'a> {
    client: &'a OllamaClient,
    model: String,
}

impl<'a> OllamaExtractor<'a> {
    pub fn new(client: &'a OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl FragmentExtractor for OllamaExtractor<'_> {
    fn extract(&self, text: &str) -> AppResult<PoeticResponse> {
        info!("Extracting fragments with model {}", self.model);

        let raw = self
            .client
            .chat_json(&self.model, &extract_prompt(text))?;
        let response = parse_extraction(&raw)?;

        debug!(
            "Model returned {} four-line and {} eight-line phrases",
            response.four_lines.len(),
            response.eight_lines.len()
        );
        Ok(response)
    }
}

/// Parses the model's JSON answer into a [`PoeticResponse`].
///
/// Non-string items are stringified, every phrase is trimmed, and phrases
/// shorter than two characters are dropped. Missing or non-array fields are
/// treated as empty.
///
/// # Errors
///
/// Returns `AIError::InvalidResponse` for text that is not JSON and
/// `AIError::SparseResponse` when fewer than two four-line phrases survive.
pub fn parse_extraction(raw: &str) -> AppResult<PoeticResponse> {
    let data: Value = serde_json::from_str(raw).map_err(|e| {
        AIError::InvalidResponse(format!("Extraction answer is not JSON: {}", e))
    })?;

    let response = PoeticResponse {
        four_lines: clean_phrases(data.get("fourLines")),
        eight_lines: clean_phrases(data.get("eightLines")),
    };

    if response.four_lines.len() < MIN_EXTRACTED_PHRASES {
        return Err(AIError::SparseResponse {
            found: response.four_lines.len(),
            required: MIN_EXTRACTED_PHRASES,
        }
        .into());
    }

    Ok(response)
}

fn clean_phrases(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        })
        .filter(|phrase| char_len(phrase) >= MIN_PHRASE_CHARS)
        .collect()
}

/// Splits `text` into phrases without any model.
///
/// Segments are separated by common Chinese and Latin punctuation or
/// whitespace; segments shorter than two characters are dropped. When five or
/// fewer remain, a fixed set of filler phrases is appended. Each corpus is an
/// independent shuffle of the segments, truncated to 10 and 16 phrases.
pub fn fallback_extract<R: Rng>(text: &str, rng: &mut R) -> PoeticResponse {
    let mut segments: Vec<String> = text
        .split(|c: char| c.is_whitespace() || FALLBACK_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|segment| char_len(segment) >= MIN_PHRASE_CHARS)
        .map(str::to_string)
        .collect();

    if segments.len() <= FALLBACK_MIN_SEGMENTS {
        segments.extend(FALLBACK_FILLER_PHRASES.iter().map(|s| s.to_string()));
    }

    let mut shuffled = |limit: usize| {
        let mut phrases = segments.clone();
        phrases.shuffle(&mut *rng);
        phrases.truncate(limit);
        phrases
    };

    PoeticResponse {
        four_lines: shuffled(FALLBACK_FOUR_LINE_PHRASES),
        eight_lines: shuffled(FALLBACK_EIGHT_LINE_PHRASES),
    }
}

/// Extractor backed by [`fallback_extract`]. Never fails.
pub struct LocalExtractor<R> {
    rng: RefCell<R>,
}

impl<R: Rng> LocalExtractor<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }
}

impl<R: Rng> FragmentExtractor for LocalExtractor<R> {
    fn extract(&self, text: &str) -> AppResult<PoeticResponse> {
        debug!("Extracting fragments locally");
        Ok(fallback_extract(text, &mut *self.rng.borrow_mut()))
    }
}
