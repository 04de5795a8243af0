use super::StepContext;
use crate::artifacts::ArtifactWriter;
use crate::error::Result;
use crate::report::{render_report, report_timestamp};
use crate::state::{CurrentStep, PipelineState};
use tracing::instrument;

/// Write the rewritten source and the report. Write failures are logged, never raised.
#[instrument(name = "step.finalize", skip_all, fields(dir = %ctx.config.output_dir.display()))]
pub async fn finalize(ctx: &StepContext, mut state: PipelineState) -> Result<PipelineState> {
    let writer = ArtifactWriter::new(&ctx.config.output_dir);

    writer.save_logged(&ctx.config.code_file, state.effective_code()).await;

    let report = render_report(&state, &report_timestamp(), &ctx.config.code_file);
    writer.save_logged(&ctx.config.report_file, report).await;

    state.advance(CurrentStep::Completed)?;
    Ok(state)
}
