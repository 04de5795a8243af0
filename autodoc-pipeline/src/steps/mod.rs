//! The four state transformations of a run.

mod analyze;
mod document;
mod finalize;
mod research;

pub use analyze::analyze;
pub use document::document;
pub use finalize::finalize;
pub use research::research;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::state::{CurrentStep, PipelineState};
use autodoc_agent::{LlmAgent, ToolErrorPolicy};
use autodoc_core::{GenerateContentConfig, Llm, Tool};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    Research,
    Document,
    Analyze,
    Finalize,
}

impl StepName {
    pub const ALL: [StepName; 4] =
        [StepName::Research, StepName::Document, StepName::Analyze, StepName::Finalize];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::Research => "research",
            StepName::Document => "document",
            StepName::Analyze => "analyze",
            StepName::Finalize => "finalize",
        }
    }

    /// The `current_step` value a successful run of this step leaves behind.
    pub fn completes(&self) -> CurrentStep {
        match self {
            StepName::Research => CurrentStep::Researched,
            StepName::Document => CurrentStep::Documented,
            StepName::Analyze => CurrentStep::Analyzed,
            StepName::Finalize => CurrentStep::Completed,
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collaborators shared by every step of a run.
pub struct StepContext {
    pub model: Arc<dyn Llm>,
    pub search_tool: Arc<dyn Tool>,
    pub code_tool: Arc<dyn Tool>,
    pub config: PipelineConfig,
}

impl StepContext {
    fn generate_config(&self) -> GenerateContentConfig {
        GenerateContentConfig { temperature: Some(self.config.temperature), ..Default::default() }
    }

    /// An agent for one step. Tool errors abort the agent instead of going back to the model.
    fn agent(
        &self,
        name: &str,
        instruction: &str,
        tool: Option<Arc<dyn Tool>>,
    ) -> autodoc_core::Result<LlmAgent> {
        let mut builder = LlmAgent::builder(name)
            .model(self.model.clone())
            .instruction(instruction)
            .generate_config(self.generate_config())
            .max_iterations(self.config.max_iterations)
            .tool_error_policy(ToolErrorPolicy::Propagate);
        if let Some(tool) = tool {
            builder = builder.tool(tool);
        }
        builder.build()
    }
}

/// Apply one step to `state`.
pub async fn execute(
    step: StepName,
    ctx: &StepContext,
    state: PipelineState,
) -> Result<PipelineState> {
    match step {
        StepName::Research => research(ctx, state).await,
        StepName::Document => document(ctx, state).await,
        StepName::Analyze => analyze(ctx, state).await,
        StepName::Finalize => finalize(ctx, state).await,
    }
}
