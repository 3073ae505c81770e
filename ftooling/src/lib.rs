//! Capability layer for registering and executing tools requested by the model backend.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fprovider::ToolCall;
//! use ftooling::builtin::CalculateTool;
//! use ftooling::{DefaultToolRuntime, ToolExecutionContext, ToolRegistry, ToolRuntime};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut registry = ToolRegistry::new();
//! registry.register(CalculateTool);
//! let runtime = DefaultToolRuntime::new(Arc::new(registry));
//!
//! let result = runtime
//!     .execute(
//!         ToolCall {
//!             id: "call_1".to_string(),
//!             name: "calculate".to_string(),
//!             arguments: r#"{"expression":"5 + 3"}"#.to_string(),
//!         },
//!         ToolExecutionContext::new("req-1"),
//!     )
//!     .await
//!     .expect("calculation should succeed");
//! assert_eq!(result.output, "5 + 3 = 8");
//! # }
//! ```

mod args;
mod error;
mod hooks;
mod registry;
mod runtime;
mod tool;
mod types;

pub mod builtin;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks, Tool, ToolError, ToolErrorKind,
        ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime,
        ToolRuntimeHooks, parse_args,
    };
}

pub use args::parse_args;
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
