//! Small convenience constructors and parsers for common types.

use fchat::{ChatMessage, ChatMode, ChatRequest, ChatRole};

pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::system(content)
}

pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::user(content)
}

pub fn assistant_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::assistant(content)
}

/// Single-turn request holding one user message.
pub fn ask(content: impl Into<String>) -> ChatRequest {
    ChatRequest::new(vec![user_message(content)])
}

/// Accepts both wire spellings (`ROLE_USER`) and plain names (`user`). Anything else is
/// [`ChatRole::Unspecified`], which validation rejects.
pub fn parse_role(value: &str) -> ChatRole {
    match value.trim().to_ascii_lowercase().as_str() {
        "role_user" | "user" => ChatRole::User,
        "role_assistant" | "assistant" => ChatRole::Assistant,
        "role_system" | "system" => ChatRole::System,
        _ => ChatRole::Unspecified,
    }
}

pub fn parse_mode(value: &str) -> Option<ChatMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "chat" | "plain" => Some(ChatMode::Plain),
        "tool" | "chat-with-tool" => Some(ChatMode::Tool),
        "agent" | "chat-with-agent" => Some(ChatMode::Agent),
        "doc" | "rag" | "chat-with-doc" => Some(ChatMode::Doc),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use fchat::{ChatMode, ChatRole};

    use super::{ask, parse_mode, parse_role};

    #[test]
    fn parse_role_supports_wire_and_plain_spellings() {
        assert_eq!(parse_role("ROLE_USER"), ChatRole::User);
        assert_eq!(parse_role("assistant"), ChatRole::Assistant);
        assert_eq!(parse_role(" System "), ChatRole::System);
        assert_eq!(parse_role("ROLE_UNSPECIFIED"), ChatRole::Unspecified);
        assert_eq!(parse_role("tool"), ChatRole::Unspecified);
    }

    #[test]
    fn parse_mode_accepts_names_and_endpoint_suffixes() {
        assert_eq!(parse_mode("chat"), Some(ChatMode::Plain));
        assert_eq!(parse_mode("chat-with-tool"), Some(ChatMode::Tool));
        assert_eq!(parse_mode("Agent"), Some(ChatMode::Agent));
        assert_eq!(parse_mode("rag"), Some(ChatMode::Doc));
        assert_eq!(parse_mode("stream"), None);
    }

    #[test]
    fn every_mode_name_parses_back() {
        for mode in ChatMode::ALL {
            assert_eq!(parse_mode(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn ask_builds_single_user_turn() {
        let request = ask("Calculate 5 + 3");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert_eq!(request.temperature, None);
    }
}
