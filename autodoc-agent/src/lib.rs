//! # autodoc-agent
//!
//! [`LlmAgent`] runs a ReAct-style loop: call the model, execute requested tools, append
//! their results to the conversation, repeat until the model answers without tool calls.

mod context;
mod event;
mod llm_agent;

pub use context::AgentToolContext;
pub use event::{Event, EventStream};
pub use llm_agent::{
    AgentOutput, DEFAULT_MAX_ITERATIONS, LlmAgent, LlmAgentBuilder, ToolErrorPolicy,
};
