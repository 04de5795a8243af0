//! Gemini provider.
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`) with
//! function declarations, system instructions, and a default sampling temperature.

mod client;
mod config;
mod convert;

pub use client::GeminiModel;
pub use config::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE, GeminiConfig};
