//! Tools the documentation pipeline hands to its agents.

mod code_execution;
mod web_search;

pub use code_execution::{
    CodeExecutionTool, DEFAULT_EXECUTION_TIMEOUT, DEFAULT_INTERPRETER, ExecutionOutcome,
};
pub use web_search::{SearchResult, TAVILY_API_BASE, WebSearchTool, format_results};
