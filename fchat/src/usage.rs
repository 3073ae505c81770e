//! Coarse token accounting used when the backend reports none.
//!
//! ```rust
//! use fchat::estimate_usage;
//! use fprovider::{Message, Role};
//!
//! let usage = estimate_usage(&[Message::new(Role::User, "abcd")], "wxyz");
//! assert_eq!((usage.input_tokens, usage.output_tokens, usage.total_tokens), (1, 1, 2));
//! ```

use fprovider::{Message, TokenUsage};

const BYTES_PER_TOKEN: usize = 4;

/// Roughly four bytes of UTF-8 per token, truncating.
pub fn estimate_usage(messages: &[Message], response: &str) -> TokenUsage {
    let input_bytes = messages
        .iter()
        .map(|message| message.content.len())
        .sum::<usize>();

    TokenUsage::new(to_tokens(input_bytes), to_tokens(response.len()))
}

fn to_tokens(bytes: usize) -> u32 {
    u32::try_from(bytes / BYTES_PER_TOKEN).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use fprovider::Role;

    use super::*;

    #[test]
    fn empty_input_estimates_zero() {
        assert_eq!(estimate_usage(&[], ""), TokenUsage::new(0, 0));
        assert_eq!(
            estimate_usage(&[Message::new(Role::User, "")], ""),
            TokenUsage::default()
        );
    }

    #[test]
    fn sums_all_messages_before_dividing() {
        let messages = vec![
            Message::new(Role::System, "abc"),
            Message::new(Role::User, "defgh"),
        ];

        let usage = estimate_usage(&messages, "1234567");
        assert_eq!(usage.input_tokens, 2);
        assert_eq!(usage.output_tokens, 1);
        assert_eq!(usage.total_tokens, 3);
    }
}
