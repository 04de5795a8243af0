//! Span helpers for pipeline runs

use tracing::Span;

/// Span covering one pipeline run over `source_name`.
///
/// ```
/// use autodoc_telemetry::pipeline_run_span;
/// let span = pipeline_run_span("calculator.py", "gemini-2.5-flash");
/// let _enter = span.enter();
/// ```
pub fn pipeline_run_span(source_name: &str, model_name: &str) -> Span {
    tracing::info_span!("pipeline.run", source = source_name, model.name = model_name)
}
