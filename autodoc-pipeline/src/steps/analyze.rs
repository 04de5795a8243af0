use super::{StepContext, StepName};
use crate::analysis::extract_findings;
use crate::error::{PipelineError, Result};
use crate::prompts::{ANALYZE_PROMPT, analyze_message};
use crate::state::{CurrentStep, PipelineState};
use tracing::instrument;

/// Have the analysis agent execute and exercise the code, then pull issues out of its report.
#[instrument(name = "step.analyze", skip_all)]
pub async fn analyze(ctx: &StepContext, mut state: PipelineState) -> Result<PipelineState> {
    let fail = |e| PipelineError::step(StepName::Analyze, e);

    let code = state.effective_code().to_string();
    let agent = ctx
        .agent("code_analyzer", ANALYZE_PROMPT, Some(ctx.code_tool.clone()))
        .map_err(fail)?;
    let output = agent.ask(analyze_message(&code)).await.map_err(fail)?;
    tracing::debug!(turns = output.turns, executions = output.tool_calls, "analysis agent done");

    let findings = extract_findings(&output.text);
    state.test_results = findings.test_results;
    state.issues_found = findings.issues;
    tracing::info!(
        issues = state.issues_found.len(),
        test_results = state.test_results.len(),
        "analysis complete"
    );

    state.advance(CurrentStep::Analyzed)?;
    Ok(state)
}
