use super::{StepContext, StepName};
use crate::analysis::strip_code_fence;
use crate::error::{PipelineError, Result};
use crate::prompts::{DOCUMENT_PROMPT, document_message};
use crate::state::{CurrentStep, PipelineState};
use tracing::instrument;

/// Ask the model for a documented rewrite of the original code. No tools are offered.
#[instrument(name = "step.document", skip_all)]
pub async fn document(ctx: &StepContext, mut state: PipelineState) -> Result<PipelineState> {
    let fail = |e| PipelineError::step(StepName::Document, e);

    let agent = ctx.agent("documentation_generator", DOCUMENT_PROMPT, None).map_err(fail)?;
    let output = agent
        .ask(document_message(&state.original_code, &state.libraries_used))
        .await
        .map_err(fail)?;

    state.documented_code = strip_code_fence(&output.text, "python");
    tracing::info!(chars = state.documented_code.len(), "documentation complete");

    state.advance(CurrentStep::Documented)?;
    Ok(state)
}
