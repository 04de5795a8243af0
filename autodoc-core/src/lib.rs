//! # autodoc-core
//!
//! Core traits and types shared by every autodoc crate.
//!
//! - [`Llm`] - a text-generation service
//! - [`Tool`] / [`ToolContext`] - capabilities a model can call
//! - [`Content`] / [`Part`] - role-tagged messages
//! - [`AutodocError`] / [`Result`] - unified error handling

pub mod error;
pub mod model;
pub mod tool;
pub mod types;

pub use error::{AutodocError, Result};
pub use model::{
    FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, LlmResponseStream,
    UsageMetadata,
};
pub use tool::{Tool, ToolContext};
pub use types::{Content, FunctionResponseData, Part, ROLE_FUNCTION, ROLE_MODEL, ROLE_USER};
