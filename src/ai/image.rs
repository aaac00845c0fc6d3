//! Collage illustration.

use super::ollama::OllamaClient;
use super::prompts::{artistic_prompt, keyword_prompt};
use crate::constants::{DEFAULT_IMAGE_KEYWORDS, FALLBACK_IMAGES, IMAGE_SEED_CHARS};
use crate::errors::AppResult;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Produces an image reference for a collage.
pub trait ImageSynthesizer {
    /// Returns a data URI or URL for an image inspired by `seed`, or `None`
    /// when the service produced nothing.
    fn synthesize(&self, seed: &str) -> AppResult<Option<String>>;
}

/// Keeps ASCII letters, commas and spaces; falls back to
/// [`DEFAULT_IMAGE_KEYWORDS`] when nothing is left.
pub fn sanitize_keywords(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ',' || *c == ' ')
        .collect();
    if cleaned.trim().is_empty() {
        DEFAULT_IMAGE_KEYWORDS.to_string()
    } else {
        cleaned
    }
}

/// Asks a chat model for keywords, then an image model for the picture.
pub struct OllamaImageSynthesizer<'a> {
    client: &'a OllamaClient,
    text_model: String,
    image_model: String,
}

impl<'a> OllamaImageSynthesizer<'a> {
    pub fn new(
        client: &'a OllamaClient,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }
}

impl ImageSynthesizer for OllamaImageSynthesizer<'_> {
    fn synthesize(&self, seed: &str) -> AppResult<Option<String>> {
        let seed: String = seed.chars().take(IMAGE_SEED_CHARS).collect();
        let raw_keywords = self.client.chat(&self.text_model, &keyword_prompt(&seed))?;
        let keywords = sanitize_keywords(&raw_keywords);
        debug!("Illustration keywords: {}", keywords);

        info!("Generating illustration with model {}", self.image_model);
        let image = self
            .client
            .generate_image(&self.image_model, &artistic_prompt(&keywords))?;

        Ok(image.map(|data| format!("data:image/png;base64,{}", data)))
    }
}

/// Synthesizer used when no image model is available. Always yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImageSynthesizer;

impl ImageSynthesizer for NoImageSynthesizer {
    fn synthesize(&self, _seed: &str) -> AppResult<Option<String>> {
        Ok(None)
    }
}

/// Picks a random image from the fixed fallback gallery.
pub fn fallback_image<R: Rng>(rng: &mut R) -> String {
    FALLBACK_IMAGES
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sanitize_keywords() {
        assert_eq!(sanitize_keywords("Cat, Rain."), "Cat, Rain");
        assert_eq!(sanitize_keywords("  \"Lamp\", Book!  "), "Lamp, Book");
        assert_eq!(sanitize_keywords("猫，雨"), DEFAULT_IMAGE_KEYWORDS);
        assert_eq!(sanitize_keywords(""), DEFAULT_IMAGE_KEYWORDS);
    }

    #[test]
    fn test_no_image_synthesizer() {
        assert_eq!(NoImageSynthesizer.synthesize("晚风").unwrap(), None);
    }

    #[test]
    fn test_fallback_image_from_gallery() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            let image = fallback_image(&mut rng);
            assert!(FALLBACK_IMAGES.contains(&image.as_str()));
        }
    }
}
