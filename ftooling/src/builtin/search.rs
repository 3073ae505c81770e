//! Web search capability backed by a pluggable [`SearchClient`].

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use fcommon::BoxFuture;
use fprovider::ToolDefinition;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{Tool, ToolError, ToolExecutionContext, ToolFuture, parse_args};

pub const SEARCH_TOOL_NAME: &str = "search_web";
pub const DUCKDUCKGO_BASE_URL: &str = "https://api.duckduckgo.com";
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Foundry-Service/1.0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    Transport,
    Timeout,
    Status,
    Malformed,
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SearchError {}

impl From<SearchError> for ToolError {
    fn from(value: SearchError) -> Self {
        match value.kind {
            SearchErrorKind::Timeout => {
                ToolError::timeout(format!("search failed: {}", value.message))
            }
            _ => ToolError::execution(format!("search failed: {}", value.message)),
        }
    }
}

/// External text search. Returns free-text result content for `query`.
pub trait SearchClient: Send + Sync {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, SearchError>>;
}

/// DuckDuckGo instant-answer client.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearchClient {
    client: Client,
    base_url: String,
    max_results: usize,
    user_agent: String,
}

impl DuckDuckGoSearchClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DUCKDUCKGO_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<InstantAnswer, SearchError> {
        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SearchError::new(SearchErrorKind::Timeout, err.to_string())
                } else {
                    SearchError::new(SearchErrorKind::Transport, err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::new(
                SearchErrorKind::Status,
                format!("search service returned status {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|err| SearchError::new(SearchErrorKind::Transport, err.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|err| SearchError::new(SearchErrorKind::Malformed, err.to_string()))
    }
}

impl SearchClient for DuckDuckGoSearchClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, SearchError>> {
        Box::pin(async move {
            let answer = self.fetch(query).await?;
            let results = answer.into_results(self.max_results);
            if results.is_empty() {
                return Err(SearchError::new(
                    SearchErrorKind::NoResults,
                    "no good search results found",
                ));
            }

            Ok(results
                .iter()
                .map(SearchResult::render)
                .collect::<Vec<_>>()
                .join("\n\n"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchResult {
    title: String,
    description: String,
    url: String,
}

impl SearchResult {
    fn render(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nURL: {}",
            self.title, self.description, self.url
        )
    }
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

impl InstantAnswer {
    fn into_results(self, max_results: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();
        if !self.abstract_text.is_empty() {
            results.push(SearchResult {
                title: self.heading,
                description: self.abstract_text,
                url: self.abstract_url,
            });
        }

        let mut pending = self.related_topics;
        pending.reverse();
        while let Some(topic) = pending.pop() {
            if results.len() >= max_results {
                break;
            }

            if !topic.topics.is_empty() {
                pending.extend(topic.topics.into_iter().rev());
                continue;
            }

            if topic.text.is_empty() {
                continue;
            }

            let title = topic
                .text
                .split(" - ")
                .next()
                .unwrap_or(topic.text.as_str())
                .to_string();
            results.push(SearchResult {
                title,
                description: topic.text,
                url: topic.first_url,
            });
        }

        results.truncate(max_results);
        results
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

pub struct SearchWebTool {
    client: Arc<dyn SearchClient>,
}

impl SearchWebTool {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }
}

impl Tool for SearchWebTool {
    fn definition(&self) -> ToolDefinition {
        let schema = json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find information on the web"
                }
            },
            "required": ["query"]
        });

        ToolDefinition {
            name: SEARCH_TOOL_NAME.to_string(),
            description: "Search the web for current information, news, weather, facts, etc."
                .to_string(),
            input_schema: schema.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let args: SearchArgs = parse_args(args_json)?;
            let query = args.query.trim();
            if query.is_empty() {
                return Err(ToolError::invalid_arguments("query must not be empty"));
            }

            Ok(self.client.search(query).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ToolErrorKind;

    #[derive(Default)]
    struct FakeSearchClient {
        queries: Mutex<Vec<String>>,
    }

    impl SearchClient for FakeSearchClient {
        fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, SearchError>> {
            Box::pin(async move {
                self.queries
                    .lock()
                    .expect("queries lock")
                    .push(query.to_string());
                if query == "offline" {
                    return Err(SearchError::new(SearchErrorKind::Transport, "connection refused"));
                }
                Ok(format!("results for {query}"))
            })
        }
    }

    #[test]
    fn instant_answer_flattens_nested_topics_up_to_limit() {
        let answer: InstantAnswer = serde_json::from_value(json!({
            "Heading": "Rust",
            "AbstractText": "Rust is a systems language.",
            "AbstractURL": "https://example.com/rust",
            "RelatedTopics": [
                {"Text": "Cargo - the Rust package manager", "FirstURL": "https://example.com/cargo"},
                {"Name": "Tools", "Topics": [
                    {"Text": "rustup - toolchain installer", "FirstURL": "https://example.com/rustup"},
                    {"Text": "clippy - lints", "FirstURL": "https://example.com/clippy"}
                ]},
                {"Text": "Ferris - mascot", "FirstURL": "https://example.com/ferris"}
            ]
        }))
        .expect("answer should decode");

        let results = answer.into_results(3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Rust");
        assert_eq!(results[1].title, "Cargo");
        assert_eq!(results[2].title, "rustup");
        assert_eq!(
            results[1].render(),
            "Title: Cargo\nDescription: Cargo - the Rust package manager\nURL: https://example.com/cargo"
        );
    }

    #[tokio::test]
    async fn search_tool_forwards_trimmed_query() {
        let client = Arc::new(FakeSearchClient::default());
        let tool = SearchWebTool::new(client.clone());
        let context = ToolExecutionContext::new("req-1");

        let output = tool
            .invoke("{\"query\":\"  weather in Paris \"}", &context)
            .await
            .expect("search should succeed");
        assert_eq!(output, "results for weather in Paris");
        assert_eq!(
            client.queries.lock().expect("queries lock").as_slice(),
            ["weather in Paris".to_string()]
        );
    }

    #[tokio::test]
    async fn search_tool_classifies_failures() {
        let tool = SearchWebTool::new(Arc::new(FakeSearchClient::default()));
        let context = ToolExecutionContext::new("req-2");

        let error = tool
            .invoke("{\"query\":\"offline\"}", &context)
            .await
            .expect_err("client failure should surface");
        assert_eq!(error.kind, ToolErrorKind::Execution);
        assert!(error.message.starts_with("search failed: "));

        let error = tool
            .invoke("{\"query\":\"   \"}", &context)
            .await
            .expect_err("blank query should fail");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    }
}
