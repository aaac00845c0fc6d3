//! System prompts and message builders for AI interactions.
//!
//! This module provides the fixed prompts used to extract collage phrases
//! from an entry and to pick illustration keywords.

use super::ollama::Message;

/// System prompt for phrase extraction.
pub const SYSTEM_PROMPT: &str = r#"You are a deep, quiet poet. You read a short diary entry and pick out
short phrases that can be cut out and rearranged into a collage poem.

Guidelines:
- Keep phrases short (2 to 6 characters for Chinese, 1 to 3 words otherwise)
- Prefer concrete images over abstract statements
- Keep the language of the original text
- Never invent content that is not in the entry
- Answer with JSON only"#;

/// Builds messages asking for the two phrase corpora.
///
/// The model is asked for a JSON object with `fourLines` (8-10 phrases) and
/// `eightLines` (12-16 phrases).
pub fn extract_prompt(entry_content: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!(
            r#"Extract two groups of phrases for a collage poem from the text below:
1. fourLines: 8-10 phrases.
2. eightLines: 12-16 phrases.

Return a JSON object of the form {{"fourLines": ["..."], "eightLines": ["..."]}}.

Text:
---
{}
---"#,
            entry_content
        )),
    ]
}

/// Builds messages asking for two simple English nouns describing `seed`.
pub fn keyword_prompt(seed: &str) -> Vec<Message> {
    vec![Message::user(format!(
        r#"Extract only TWO simple English nouns from this: "{}". Return format: "Noun, Noun"."#,
        seed
    ))]
}

/// Builds the illustration prompt for the image model.
pub fn artistic_prompt(keywords: &str) -> String {
    format!(
        "Minimalist flat illustration of {}, Bauhaus inspired, Morandi color palette, grainy paper texture, warm beige background, high quality.",
        keywords
    )
}
