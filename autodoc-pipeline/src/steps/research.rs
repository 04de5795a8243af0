use super::{StepContext, StepName};
use crate::analysis::{extract_imports, has_documentation};
use crate::error::{PipelineError, Result};
use crate::prompts::{RESEARCH_PROMPT, research_message};
use crate::state::{CurrentStep, PipelineState};
use tracing::instrument;

/// Let the research agent look at the code (and search libraries it does not know), then
/// record imports and documentation presence from static checks.
///
/// The agent's reply is not kept. A failing model or search call fails the step.
#[instrument(name = "step.research", skip_all)]
pub async fn research(ctx: &StepContext, mut state: PipelineState) -> Result<PipelineState> {
    let fail = |e| PipelineError::step(StepName::Research, e);

    let agent = ctx
        .agent("code_researcher", RESEARCH_PROMPT, Some(ctx.search_tool.clone()))
        .map_err(fail)?;
    let output = agent.ask(research_message(&state.original_code)).await.map_err(fail)?;
    tracing::debug!(turns = output.turns, searches = output.tool_calls, "research agent done");

    state.libraries_used = extract_imports(&state.original_code);
    state.has_documentation = has_documentation(&state.original_code);
    tracing::info!(
        libraries = ?state.libraries_used,
        has_documentation = state.has_documentation,
        "research complete"
    );

    state.advance(CurrentStep::Researched)?;
    Ok(state)
}
