//! Conversation assembly for the copilot chat.
//!
//! Order: persona, JD summary, sector note, letter draft (letter mode only),
//! pattern fragments, mode directive, then the caller's own history.

use serde::Deserialize;

use crate::chat::prompts::{
    DEFAULT_MODE_DIRECTIVE, JD_MODE_DIRECTIVE, JD_SUMMARY_PREFIX, LETTER_DRAFT_PREFIX,
    LETTER_MODE_DIRECTIVE, PATTERN_FRAGMENTS_PREFIX, SECTOR_NOTE_TEMPLATE,
};
use crate::llm_client::prompts::COPILOT_SYSTEM_PROMPT;
use crate::llm_client::ChatMessage;
use crate::patterns::PatternStore;
use crate::text::summarize_text;

pub const JD_SUMMARY_MAX_CHARS: usize = 700;
pub const LETTER_SUMMARY_MAX_CHARS: usize = 1200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatMode {
    #[default]
    Default,
    Jd,
    Letter,
}

impl ChatMode {
    /// Unknown or missing modes behave like `default`.
    pub fn from_request(mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
            Some("jd") => ChatMode::Jd,
            Some("letter") => ChatMode::Letter,
            _ => ChatMode::Default,
        }
    }

    pub fn directive(&self) -> &'static str {
        match self {
            ChatMode::Default => DEFAULT_MODE_DIRECTIVE,
            ChatMode::Jd => JD_MODE_DIRECTIVE,
            ChatMode::Letter => LETTER_MODE_DIRECTIVE,
        }
    }
}

/// A message as sent by the browser. Entries missing a role or content are
/// dropped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

impl IncomingMessage {
    fn to_chat_message(&self) -> Option<ChatMessage> {
        let role = non_blank(self.role.as_deref())?;
        let content = non_blank(self.content.as_deref())?;
        Some(ChatMessage::new(role, content))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
    pub mode: Option<String>,
    pub jd_text: Option<String>,
    pub assembled_letter: Option<String>,
    pub sector: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn build_conversation(request: &ChatRequest, patterns: &PatternStore) -> Vec<ChatMessage> {
    let mode = ChatMode::from_request(request.mode.as_deref());
    let mut conversation = vec![ChatMessage::system(COPILOT_SYSTEM_PROMPT)];

    if let Some(jd_text) = non_blank(request.jd_text.as_deref()) {
        conversation.push(ChatMessage::user(format!(
            "{JD_SUMMARY_PREFIX}{}",
            summarize_text(jd_text, JD_SUMMARY_MAX_CHARS)
        )));
    }

    if let Some(sector) = non_blank(request.sector.as_deref()) {
        conversation.push(ChatMessage::assistant(
            SECTOR_NOTE_TEMPLATE.replace("{sector}", sector.trim()),
        ));
    }

    if mode == ChatMode::Letter {
        if let Some(letter) = non_blank(request.assembled_letter.as_deref()) {
            conversation.push(ChatMessage::user(format!(
                "{LETTER_DRAFT_PREFIX}{}",
                summarize_text(letter, LETTER_SUMMARY_MAX_CHARS)
            )));
        }
    }

    conversation.push(ChatMessage::assistant(format!(
        "{PATTERN_FRAGMENTS_PREFIX}{}",
        patterns.render_context()
    )));
    conversation.push(ChatMessage::assistant(mode.directive()));

    conversation.extend(
        request
            .messages
            .iter()
            .filter_map(IncomingMessage::to_chat_message),
    );

    conversation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> PatternStore {
        PatternStore::from_json(r#"[{"sector": "Fintech", "fragments": ["payments rails"]}]"#)
            .unwrap()
    }

    fn message(role: &str, content: &str) -> IncomingMessage {
        IncomingMessage {
            role: Some(role.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn test_mode_parsing_defaults_unknown_values() {
        assert_eq!(ChatMode::from_request(None), ChatMode::Default);
        assert_eq!(ChatMode::from_request(Some("jd")), ChatMode::Jd);
        assert_eq!(ChatMode::from_request(Some(" Letter ")), ChatMode::Letter);
        assert_eq!(ChatMode::from_request(Some("poetry")), ChatMode::Default);
    }

    #[test]
    fn test_minimal_conversation_shape() {
        let request = ChatRequest {
            messages: vec![message("user", "Which sector fits?")],
            ..Default::default()
        };

        let conversation = build_conversation(&request, &patterns());
        let roles: Vec<&str> = conversation.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "assistant", "assistant", "user"]);
        assert_eq!(conversation[0].content, COPILOT_SYSTEM_PROMPT);
        assert!(conversation[1].content.contains("Fintech: payments rails"));
        assert_eq!(conversation[2].content, DEFAULT_MODE_DIRECTIVE);
        assert_eq!(conversation[3].content, "Which sector fits?");
    }

    #[test]
    fn test_full_letter_mode_conversation_order() {
        let request = ChatRequest {
            messages: vec![message("user", "Tighten paragraph two.")],
            mode: Some("letter".to_string()),
            jd_text: Some("Director of Partnerships\n\n  at Acme".to_string()),
            assembled_letter: Some("Dear team,\nI build partnerships.".to_string()),
            sector: Some("Partnerships/BD".to_string()),
        };

        let conversation = build_conversation(&request, &patterns());
        assert_eq!(conversation.len(), 7);
        assert_eq!(
            conversation[1].content,
            "JD summary: Director of Partnerships at Acme"
        );
        assert_eq!(conversation[1].role, "user");
        assert!(conversation[2].content.contains("Partnerships/BD"));
        assert_eq!(conversation[2].role, "assistant");
        assert!(conversation[3]
            .content
            .ends_with("Dear team, I build partnerships."));
        assert_eq!(conversation[3].role, "user");
        assert!(conversation[4].content.starts_with(PATTERN_FRAGMENTS_PREFIX));
        assert_eq!(conversation[5].content, LETTER_MODE_DIRECTIVE);
        assert_eq!(conversation[6].content, "Tighten paragraph two.");
    }

    #[test]
    fn test_letter_draft_only_included_in_letter_mode() {
        let request = ChatRequest {
            messages: vec![message("user", "hi")],
            mode: Some("jd".to_string()),
            assembled_letter: Some("Dear team".to_string()),
            ..Default::default()
        };

        let conversation = build_conversation(&request, &patterns());
        assert!(conversation
            .iter()
            .all(|m| !m.content.starts_with(LETTER_DRAFT_PREFIX)));
        assert!(conversation.iter().any(|m| m.content == JD_MODE_DIRECTIVE));
    }

    #[test]
    fn test_long_inputs_are_capped() {
        let request = ChatRequest {
            messages: vec![message("user", "hi")],
            mode: Some("letter".to_string()),
            jd_text: Some("a".repeat(2000)),
            assembled_letter: Some("b".repeat(5000)),
            ..Default::default()
        };

        let conversation = build_conversation(&request, &patterns());
        let jd = &conversation[1].content;
        assert_eq!(
            jd.chars().count(),
            JD_SUMMARY_PREFIX.len() + JD_SUMMARY_MAX_CHARS + 3
        );
        let letter = &conversation[2].content;
        assert_eq!(
            letter.chars().count(),
            LETTER_DRAFT_PREFIX.chars().count() + LETTER_SUMMARY_MAX_CHARS + 3
        );
    }

    #[test]
    fn test_incomplete_caller_messages_are_dropped() {
        let request = ChatRequest {
            messages: vec![
                message("user", "keep me"),
                IncomingMessage {
                    role: Some("user".to_string()),
                    content: None,
                },
                message("", "no role"),
                message("assistant", "   "),
            ],
            ..Default::default()
        };

        let conversation = build_conversation(&request, &patterns());
        let last = conversation.last().unwrap();
        assert_eq!(last.content, "keep me");
        assert_eq!(conversation.len(), 4);
    }

    #[test]
    fn test_request_deserializes_from_camel_case() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"messages": [{"role": "user", "content": "hi"}], "jdText": "JD", "assembledLetter": "L", "mode": "letter"}"#,
        )
        .unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.jd_text.as_deref(), Some("JD"));
        assert_eq!(request.assembled_letter.as_deref(), Some("L"));
        assert!(request.sector.is_none());
    }
}
