/// Creates a single [`ChatMessage`](crate::ChatMessage) from a role shorthand.
///
/// ```rust
/// use foundry::{ChatRole, foundry_msg};
///
/// let message = foundry_msg!(assistant => "Done.");
/// assert_eq!(message.role, ChatRole::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! foundry_msg {
    (system => $content:expr $(,)?) => {
        $crate::ChatMessage::system($content)
    };
    (user => $content:expr $(,)?) => {
        $crate::ChatMessage::user($content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::ChatMessage::assistant($content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<ChatMessage>` from role/content pairs.
///
/// ```rust
/// use foundry::{ChatRole, foundry_messages};
///
/// let messages = foundry_messages![
///     system => "You are concise.",
///     user => "What is 6 * 7?",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, ChatRole::System);
/// assert_eq!(messages[1].role, ChatRole::User);
/// ```
#[macro_export]
macro_rules! foundry_messages {
    () => {
        Vec::<$crate::ChatMessage>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::foundry_msg!($role => $content)),+]
    };
}

/// Creates a [`ChatRequest`](crate::ChatRequest) from role/content pairs.
///
/// ```rust
/// use foundry::foundry_request;
///
/// let request = foundry_request![user => "Calculate 5 + 3"];
/// assert_eq!(request.messages.len(), 1);
/// ```
#[macro_export]
macro_rules! foundry_request {
    ($($role:ident => $content:expr),+ $(,)?) => {
        $crate::ChatRequest::new($crate::foundry_messages![$($role => $content),+])
    };
}
