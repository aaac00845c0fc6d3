//! AI collaborators for collage generation.
//!
//! This module provides integration with Ollama for local LLM inference:
//! extracting poetic phrases from an entry and illustrating the result.
//! Both services sit behind traits so the generate operation can swap in
//! the local fallbacks.
//!
//! # Module Structure
//!
//! - `ollama`: HTTP client for Ollama API
//! - `extract`: phrase extraction and the punctuation-based fallback
//! - `image`: illustration synthesis and the fallback gallery
//! - `prompts`: System prompts and message builders
//!
//! # Example
//!
//! ```no_run
//! use mosaic::ai::{FragmentExtractor, OllamaClient, OllamaExtractor};
//!
//! let client = OllamaClient::new("http://127.0.0.1:11434");
//! let extractor = OllamaExtractor::new(&client, "llama3.2:3b");
//! let phrases = extractor.extract("今天下雨了，我在窗边读旧书。")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod extract;
pub mod image;
pub mod ollama;
pub mod prompts;

// Re-export commonly used types
pub use extract::{
    fallback_extract, FragmentExtractor, LocalExtractor, OllamaExtractor, PoeticResponse,
};
pub use image::{fallback_image, ImageSynthesizer, NoImageSynthesizer, OllamaImageSynthesizer};
pub use ollama::{Message, OllamaClient};
