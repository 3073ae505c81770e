//! Single-pass execution of the capabilities a backend response asks for.

use std::sync::Arc;

use fprovider::{ToolCall, ToolDefinition};
use ftooling::{ToolError, ToolExecutionContext, ToolRuntime};

const RESULTS_HEADING: &str = "Tool Results:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocationOutcome {
    Output(String),
    Failed(ToolError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool_call_id: String,
    pub tool_name: String,
    pub outcome: ToolInvocationOutcome,
}

impl ToolInvocation {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ToolInvocationOutcome::Failed(_))
    }

    /// The line this invocation contributes under the results heading.
    pub fn result_line(&self) -> String {
        match &self.outcome {
            ToolInvocationOutcome::Output(output) => output.clone(),
            ToolInvocationOutcome::Failed(error) => format!("Tool call failed: {}", error.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub content: String,
    pub invocations: Vec<ToolInvocation>,
}

#[derive(Clone)]
pub struct ToolDispatcher {
    runtime: Arc<dyn ToolRuntime>,
}

impl ToolDispatcher {
    pub fn new(runtime: Arc<dyn ToolRuntime>) -> Self {
        Self { runtime }
    }

    /// Capabilities declared on every tool-mode backend call.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.runtime.definitions()
    }

    /// Runs `tool_calls` sequentially in order. Failures become result lines, never errors.
    pub async fn dispatch(
        &self,
        content: String,
        tool_calls: Vec<ToolCall>,
        context: &ToolExecutionContext,
    ) -> DispatchOutcome {
        if tool_calls.is_empty() {
            return DispatchOutcome {
                content,
                invocations: Vec::new(),
            };
        }

        let mut invocations = Vec::with_capacity(tool_calls.len());
        for tool_call in tool_calls {
            let tool_call_id = tool_call.id.clone();
            let tool_name = tool_call.name.clone();
            let outcome = match self.runtime.execute(tool_call, context.clone()).await {
                Ok(result) => ToolInvocationOutcome::Output(result.output),
                Err(error) => ToolInvocationOutcome::Failed(error),
            };

            invocations.push(ToolInvocation {
                tool_call_id,
                tool_name,
                outcome,
            });
        }

        let lines = invocations
            .iter()
            .map(ToolInvocation::result_line)
            .collect::<Vec<_>>()
            .join("\n");

        DispatchOutcome {
            content: format!("{content}\n\n{RESULTS_HEADING}\n{lines}"),
            invocations,
        }
    }
}
