//! The driver: runs steps in graph order and streams progress.

use crate::artifacts::ArtifactWriter;
use crate::config::{ApiKeys, PipelineConfig};
use crate::diagram::DiagramRenderer;
use crate::error::{PipelineError, Result};
use crate::graph::{ENTRY, Transition, render_mermaid, transition_after};
use crate::router::route_after_research;
use crate::state::PipelineState;
use crate::steps::{self, StepContext};
use crate::stream::{PipelineEvent, PipelineEventStream};
use autodoc_core::{AutodocError, Llm, Tool};
use autodoc_model::{GeminiConfig, GeminiModel};
use autodoc_tool::{CodeExecutionTool, WebSearchTool};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Documents and tests one Python module per run.
///
/// Runs share nothing but the collaborators; each call to [`run`](Self::run) owns its state.
pub struct Pipeline {
    ctx: Arc<StepContext>,
    renderer: DiagramRenderer,
}

#[derive(Default)]
pub struct PipelineBuilder {
    model: Option<Arc<dyn Llm>>,
    search_tool: Option<Arc<dyn Tool>>,
    code_tool: Option<Arc<dyn Tool>>,
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    /// Tool offered during Research. Must be named `search_library_info` to match the prompt.
    pub fn search_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.search_tool = Some(tool);
        self
    }

    /// Tool offered during Analyze.
    pub fn code_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.code_tool = Some(tool);
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        let missing = |what: &str| AutodocError::Config(format!("{} is required", what));
        let model = self.model.ok_or_else(|| missing("model"))?;
        let search_tool = self.search_tool.ok_or_else(|| missing("search tool"))?;
        let code_tool = self.code_tool.unwrap_or_else(|| {
            Arc::new(
                CodeExecutionTool::with_interpreter(
                    self.config.interpreter.clone(),
                    self.config.interpreter_args.clone(),
                )
                .with_timeout(self.config.execution_timeout),
            )
        });
        let renderer = DiagramRenderer::new().with_base_url(self.config.diagram_base_url.clone());

        Ok(Pipeline {
            ctx: Arc::new(StepContext { model, search_tool, code_tool, config: self.config }),
            renderer,
        })
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Gemini for the model, Tavily for search, a local interpreter for code execution.
    pub fn from_config(config: PipelineConfig, keys: &ApiKeys) -> Result<Self> {
        let model = GeminiModel::from_config(
            GeminiConfig::new(keys.model_key.clone(), config.model.clone())
                .with_temperature(config.temperature),
        )?;
        let search =
            WebSearchTool::new(keys.search_key.clone())?.with_max_results(config.search_results);

        Self::builder().model(Arc::new(model)).search_tool(Arc::new(search)).config(config).build()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.ctx.config
    }

    /// Save the step graph into the output directory.
    pub async fn save_diagram(&self) -> Option<PathBuf> {
        let writer = ArtifactWriter::new(&self.ctx.config.output_dir);
        self.renderer.save(&render_mermaid(), &writer).await
    }

    /// Run to completion and return the final state.
    pub async fn run(&self, code: impl Into<String>) -> Result<PipelineState> {
        let mut stream = self.run_stream(code);
        let mut final_state = None;
        while let Some(event) = stream.next().await {
            if let PipelineEvent::Done { state, .. } = event? {
                final_state = Some(state);
            }
        }
        final_state.ok_or(PipelineError::Incomplete)
    }

    /// Run, yielding an event before and after every step and at each routing decision.
    ///
    /// The first error ends the stream.
    pub fn run_stream(&self, code: impl Into<String>) -> PipelineEventStream {
        let ctx = self.ctx.clone();
        let renderer = self.renderer.clone();
        let code = code.into();

        let stream = async_stream::stream! {
            if ctx.config.diagram {
                let writer = ArtifactWriter::new(&ctx.config.output_dir);
                if let Some(path) = renderer.save(&render_mermaid(), &writer).await {
                    yield Ok(PipelineEvent::diagram_saved(path));
                }
            }

            let mut state = PipelineState::new(code);
            let mut next = Some(ENTRY);
            let mut executed = 0;
            tracing::info!(chars = state.original_code.len(), "pipeline run started");

            while let Some(step) = next {
                yield Ok(PipelineEvent::step_start(step));
                let started = Instant::now();

                state = match steps::execute(step, &ctx, state).await {
                    Ok(state) => state,
                    Err(e) => {
                        tracing::error!(%step, error = %e, "step failed");
                        yield Err(e);
                        return;
                    }
                };
                executed += 1;

                let duration_ms = started.elapsed().as_millis() as u64;
                tracing::debug!(%step, duration_ms, "step finished");
                yield Ok(PipelineEvent::step_end(step, duration_ms, state.clone()));

                next = match transition_after(step) {
                    Transition::Next(next) => Some(next),
                    Transition::Route => {
                        let to = route_after_research(&mut state).step();
                        yield Ok(PipelineEvent::routed(step, to));
                        Some(to)
                    }
                    Transition::End => None,
                };
            }

            if !state.is_complete() {
                yield Err(PipelineError::Incomplete);
                return;
            }
            tracing::info!(steps = executed, "pipeline run completed");
            yield Ok(PipelineEvent::done(state, executed));
        };

        Box::pin(stream)
    }
}
