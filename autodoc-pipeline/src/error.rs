//! Error types for autodoc-pipeline

use crate::state::CurrentStep;
use crate::steps::StepName;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A collaborator call inside a step failed
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: StepName,
        #[source]
        source: autodoc_core::AutodocError,
    },

    /// A step tried to move `current_step` backwards
    #[error("Step progress cannot move from {from} back to {to}")]
    StepRegression { from: CurrentStep, to: CurrentStep },

    /// The run ended without reaching the terminal step
    #[error("Pipeline stopped before completion")]
    Incomplete,

    /// The step graph could not be rendered
    #[error("Diagram error: {0}")]
    Diagram(String),

    #[error("Core error: {0}")]
    Core(#[from] autodoc_core::AutodocError),
}

impl PipelineError {
    pub fn step(step: StepName, source: autodoc_core::AutodocError) -> Self {
        Self::StepFailed { step, source }
    }
}
