//! # autodoc-model
//!
//! [`Llm`](autodoc_core::Llm) implementations.
//!
//! - [`GeminiModel`] - Google Gemini over REST, with function calling
//! - [`MockLlm`] - scripted responses for tests
//!
//! ```rust,ignore
//! use autodoc_model::GeminiModel;
//!
//! let model = GeminiModel::new(api_key, "gemini-2.5-flash")?;
//! ```

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::MockLlm;
