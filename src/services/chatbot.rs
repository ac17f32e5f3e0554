// src/services/chatbot.rs
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog;
use super::completion::{CompletionMessage, CompletionService};

pub const GREETING: &str = "Hi! I'm your shopping assistant. How can I help you today?";

pub const APOLOGY: &str = "I'm having trouble connecting to my recommendation system right now. Please try again later.";

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful shopping assistant for an ecommerce store. \
Provide friendly, helpful advice about products and make recommendations based on user preferences. \
Keep responses concise and focused on shopping assistance.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Append-only conversation log, in submission order.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript opened with the assistant's greeting.
    pub fn new() -> Self {
        Self {
            entries: vec![ChatEntry { role: ChatRole::Assistant, content: GREETING.to_string() }],
        }
    }

    pub fn push(&mut self, role: ChatRole, content: impl Into<String>) -> usize {
        self.entries.push(ChatEntry { role, content: content.into() });
        self.entries.len()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Blank submissions are dropped before anything else happens.
pub fn is_submittable(message: &str) -> bool {
    !message.trim().is_empty()
}

pub fn user_turn(message: &str) -> String {
    format!(
        "I need help with: {message}. Our products include: {}.",
        catalog::product_names()
    )
}

/// Ask the assistant for a reply. Failures turn into the fixed apology.
pub async fn generate_reply(service: &dyn CompletionService, message: &str) -> String {
    let messages = [
        CompletionMessage::system(SYSTEM_INSTRUCTION),
        CompletionMessage::user(user_turn(message)),
    ];

    match service.complete(&messages).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "chat completion failed");
            APOLOGY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_starts_with_greeting() {
        let t = Transcript::new();
        assert_eq!(t.len(), 1);
        assert_eq!(t.entries()[0].role, ChatRole::Assistant);
        assert_eq!(t.entries()[0].content, GREETING);
    }

    #[test]
    fn blank_messages_are_not_submittable() {
        assert!(!is_submittable(""));
        assert!(!is_submittable("   \t\n"));
        assert!(is_submittable(" yoga "));
    }

    #[test]
    fn user_turn_lists_products() {
        let turn = user_turn("a gift");
        assert!(turn.starts_with("I need help with: a gift. Our products include: Wireless Headphones"));
        assert!(turn.ends_with("Bluetooth Speaker."));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let entry = ChatEntry { role: ChatRole::User, content: "hi".into() };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "user");
    }
}
