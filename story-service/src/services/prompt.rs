//! Fixed prompt templates.

use crate::services::providers::{ChatMessage, Role};

/// Name of the only substitution slot, written `{topic}` in templates.
pub const TOPIC_VARIABLE: &str = "topic";
const TOPIC_SLOT: &str = "{topic}";

/// The story prompt: one system message asking for a long story.
pub const STORY_PROMPT: PromptTemplate =
    PromptTemplate::new(&[(Role::System, "Tell me a long story about {topic}")]);

/// A list of message templates with a `{topic}` slot.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    messages: &'static [(Role, &'static str)],
}

impl PromptTemplate {
    pub const fn new(messages: &'static [(Role, &'static str)]) -> Self {
        Self { messages }
    }

    /// Fills the slot in every message with `topic`.
    ///
    /// Replacement is a single pass over the template, so braces inside the
    /// topic are inserted verbatim and never expanded.
    pub fn format_messages(&self, topic: &str) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|(role, template)| ChatMessage {
                role: *role,
                content: template.replace(TOPIC_SLOT, topic),
            })
            .collect()
    }

    /// Slot names used by this template.
    pub fn input_variables(&self) -> Vec<&'static str> {
        if self.messages.iter().any(|(_, t)| t.contains(TOPIC_SLOT)) {
            vec![TOPIC_VARIABLE]
        } else {
            Vec::new()
        }
    }
}
