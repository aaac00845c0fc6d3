//! Ollama HTTP client for chat completion and image generation.
//!
//! This module provides a simple blocking client for the parts of the Ollama
//! API mosaic uses: `/api/chat` for fragment extraction and keyword
//! selection, and `/api/generate` for image models.

use crate::errors::{AIError, AppResult};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender (system, user, assistant)
    pub role: String,
    /// The content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for chat completion.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
}

/// Response from chat completion.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Message,
}

/// Request body for image generation.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from image generation. Image models return base64 PNG data
/// either as a single `image` or as an `images` list.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

/// Client for interacting with Ollama API.
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    /// Creates a new Ollama client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Ollama API (e.g., "http://127.0.0.1:11434")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        model: &str,
        body: &B,
    ) -> AppResult<R> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(AIError::OllamaOffline)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AIError::ModelNotFound(model.to_string()).into());
            }

            return Err(
                AIError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into(),
            );
        }

        response.json().map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse {} response: {}", path, e)).into()
        })
    }

    /// Sends a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Ollama API is not reachable
    /// - Model is not found
    /// - API returns an error response
    pub fn chat(&self, model: &str, messages: &[Message]) -> AppResult<String> {
        debug!("Sending chat request with model: {}", model);
        self.send_chat(model, messages, None)
    }

    /// Sends a chat completion request constrained to JSON output.
    ///
    /// The returned string is the raw JSON text produced by the model.
    pub fn chat_json(&self, model: &str, messages: &[Message]) -> AppResult<String> {
        debug!("Sending JSON chat request with model: {}", model);
        self.send_chat(model, messages, Some("json"))
    }

    fn send_chat(
        &self,
        model: &str,
        messages: &[Message],
        format: Option<&str>,
    ) -> AppResult<String> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            format,
        };

        let chat_response: ChatResponse = self.post("/api/chat", model, &request)?;

        debug!("Received chat response");
        Ok(chat_response.message.content)
    }

    /// Asks an image model to render `prompt`.
    ///
    /// Returns the base64 PNG payload, or `None` when the model answered
    /// without an image.
    pub fn generate_image(&self, model: &str, prompt: &str) -> AppResult<Option<String>> {
        debug!("Sending image generation request with model: {}", model);

        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let response: GenerateResponse = self.post("/api/generate", model, &request)?;

        Ok(response
            .image
            .or_else(|| response.images.into_iter().next())
            .filter(|data| !data.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let system = Message::system("You are a poet");
        assert_eq!(system.role, "system");
        assert_eq!(system.content, "You are a poet");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "Hello");
    }

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_chat_request_omits_format_when_unset() {
        let messages = vec![Message::user("hi")];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
            stream: false,
            format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("format").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_generate_response_accepts_either_shape() {
        let single: GenerateResponse = serde_json::from_str(r#"{"image":"AAA"}"#).unwrap();
        assert_eq!(single.image.as_deref(), Some("AAA"));

        let list: GenerateResponse = serde_json::from_str(r#"{"images":["BBB"]}"#).unwrap();
        assert_eq!(list.images, vec!["BBB".to_string()]);

        let none: GenerateResponse = serde_json::from_str(r#"{"response":""}"#).unwrap();
        assert!(none.image.is_none() && none.images.is_empty());
    }
}
