//! Typed decoding of backend-supplied argument payloads.
//!
//! ```rust
//! use serde::Deserialize;
//! use ftooling::parse_args;
//!
//! #[derive(Deserialize)]
//! struct Query {
//!     query: String,
//! }
//!
//! let args: Query = parse_args(r#"{"query":"rust"}"#).expect("args should decode");
//! assert_eq!(args.query, "rust");
//! ```

use serde::de::DeserializeOwned;

use crate::ToolError;

/// Decodes `args_json` into `T`, reporting malformed or missing fields as `InvalidArguments`.
pub fn parse_args<T>(args_json: &str) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    let trimmed = args_json.trim();
    let payload = if trimmed.is_empty() { "{}" } else { trimmed };

    serde_json::from_str(payload)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid arguments: {err}")))
}
