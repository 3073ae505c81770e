//! Built-in capabilities declared in tool mode: `calculate` and `search_web`.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fcommon::BoxFuture;
//! use ftooling::builtin::{SearchClient, SearchError, standard_registry};
//!
//! struct Offline;
//!
//! impl SearchClient for Offline {
//!     fn search<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, Result<String, SearchError>> {
//!         Box::pin(async { Ok(String::new()) })
//!     }
//! }
//!
//! let registry = standard_registry(Arc::new(Offline));
//! let names = registry
//!     .definitions()
//!     .into_iter()
//!     .map(|definition| definition.name)
//!     .collect::<Vec<_>>();
//! assert_eq!(names, vec!["calculate", "search_web"]);
//! ```

use std::sync::Arc;

use crate::ToolRegistry;

pub mod calculator;
pub mod search;

pub use calculator::{CALCULATE_TOOL_NAME, CalculateTool, CalculatorError, evaluate_expression};
pub use search::{
    DEFAULT_MAX_RESULTS, DEFAULT_USER_AGENT, DUCKDUCKGO_BASE_URL, DuckDuckGoSearchClient,
    SEARCH_TOOL_NAME, SearchClient, SearchError, SearchErrorKind, SearchWebTool,
};

/// Registry holding exactly the capabilities tool mode declares.
pub fn standard_registry(search: Arc<dyn SearchClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(CalculateTool);
    registry.register(SearchWebTool::new(search));
    registry
}
