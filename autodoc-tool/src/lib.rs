//! # autodoc-tool
//!
//! Tools for autodoc agents.
//!
//! - [`FunctionTool`] - wrap an async closure as a tool
//! - [`WebSearchTool`] - Python library documentation search (Tavily)
//! - [`CodeExecutionTool`] - run code through a local interpreter

pub mod builtin;
mod function_tool;

pub use builtin::{CodeExecutionTool, ExecutionOutcome, SearchResult, WebSearchTool};
pub use function_tool::FunctionTool;
