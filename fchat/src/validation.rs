//! Pure checks applied to every request before any backend call.

use crate::{ChatError, ChatMessage, ChatMode, ChatRequest, ChatRole};

/// Rejects an empty list, then the first message with empty content or unrecognized role.
pub fn validate_messages(messages: &[ChatMessage]) -> Result<(), ChatError> {
    if messages.is_empty() {
        return Err(ChatError::invalid_input("messages cannot be empty"));
    }

    for (index, message) in messages.iter().enumerate() {
        if message.content.is_empty() {
            return Err(ChatError::invalid_message(
                index,
                format!("message content cannot be empty at index {index}"),
            ));
        }

        if message.role == ChatRole::Unspecified {
            return Err(ChatError::invalid_message(
                index,
                format!("invalid message role at index {index}"),
            ));
        }
    }

    Ok(())
}

pub fn validate_request(mode: ChatMode, request: &ChatRequest) -> Result<(), ChatError> {
    validate_messages(&request.messages)?;

    if mode.requires_user_turn()
        && let Some(last) = request.messages.last()
        && last.role != ChatRole::User
    {
        return Err(ChatError::invalid_message(
            request.messages.len() - 1,
            "last message must be from user",
        ));
    }

    if let Some(temperature) = request.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        return Err(ChatError::invalid_input(
            "temperature must be in the inclusive range 0.0..=2.0",
        ));
    }

    if request.max_output_tokens == Some(0) {
        return Err(ChatError::invalid_input(
            "max_output_tokens must be greater than zero",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatErrorKind;

    #[test]
    fn accepts_well_formed_conversation() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user(" "),
        ];
        assert!(validate_messages(&messages).is_ok());
    }

    #[test]
    fn rejects_empty_list() {
        let error = validate_messages(&[]).expect_err("empty list should fail");
        assert_eq!(error.kind, ChatErrorKind::InvalidInput);
        assert_eq!(error.index, None);
    }

    #[test]
    fn reports_index_of_first_invalid_message() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant(""),
            ChatMessage::new(ChatRole::Unspecified, "??"),
        ];
        let error = validate_messages(&messages).expect_err("empty content should fail");
        assert_eq!(error.index, Some(1));
        assert_eq!(error.message, "message content cannot be empty at index 1");

        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::new(ChatRole::Unspecified, "??"),
        ];
        let error = validate_messages(&messages).expect_err("unknown role should fail");
        assert_eq!(error.index, Some(1));
        assert_eq!(error.message, "invalid message role at index 1");
    }

    #[test]
    fn tool_mode_requires_user_turn_last() {
        let request = ChatRequest::new(vec![
            ChatMessage::user("what is 2+2?"),
            ChatMessage::assistant("4"),
        ]);

        let error = validate_request(ChatMode::Tool, &request).expect_err("tool mode should fail");
        assert_eq!(error.index, Some(1));
        assert!(validate_request(ChatMode::Plain, &request).is_ok());
        assert!(validate_request(ChatMode::Agent, &request).is_ok());
        assert!(validate_request(ChatMode::Doc, &request).is_ok());
    }

    #[test]
    fn rejects_out_of_range_generation_options() {
        let messages = vec![ChatMessage::user("hi")];

        let hot = ChatRequest::new(messages.clone()).with_temperature(2.5);
        assert!(validate_request(ChatMode::Plain, &hot).is_err());

        let none = ChatRequest::new(messages.clone()).with_max_output_tokens(0);
        assert!(validate_request(ChatMode::Plain, &none).is_err());

        let ok = ChatRequest::new(messages)
            .with_temperature(0.0)
            .with_max_output_tokens(1);
        assert!(validate_request(ChatMode::Plain, &ok).is_ok());
    }
}
