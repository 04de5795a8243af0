//! The record threaded through every step of a run.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a run has progressed. Ordered; a run only ever moves forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CurrentStep {
    #[default]
    Start,
    Researched,
    Documented,
    Analyzed,
    Completed,
}

impl CurrentStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentStep::Start => "start",
            CurrentStep::Researched => "researched",
            CurrentStep::Documented => "documented",
            CurrentStep::Analyzed => "analyzed",
            CurrentStep::Completed => "completed",
        }
    }
}

impl fmt::Display for CurrentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub original_code: String,
    pub documented_code: String,
    pub has_documentation: bool,
    pub libraries_used: Vec<String>,
    pub test_results: Vec<String>,
    pub issues_found: Vec<String>,
    pub current_step: CurrentStep,
}

impl PipelineState {
    pub fn new(original_code: impl Into<String>) -> Self {
        Self { original_code: original_code.into(), ..Default::default() }
    }

    /// Documented code when present, the original otherwise.
    pub fn effective_code(&self) -> &str {
        if self.documented_code.is_empty() { &self.original_code } else { &self.documented_code }
    }

    pub fn is_complete(&self) -> bool {
        self.current_step == CurrentStep::Completed
    }

    /// Move `current_step` forward. Moving backwards is an error; staying put is allowed.
    pub fn advance(&mut self, to: CurrentStep) -> Result<()> {
        if to < self.current_step {
            return Err(PipelineError::StepRegression { from: self.current_step, to });
        }
        self.current_step = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = PipelineState::new("def f(): pass");
        assert_eq!(state.original_code, "def f(): pass");
        assert!(state.documented_code.is_empty());
        assert!(!state.has_documentation);
        assert!(state.libraries_used.is_empty());
        assert!(state.test_results.is_empty());
        assert!(state.issues_found.is_empty());
        assert_eq!(state.current_step, CurrentStep::Start);
    }

    #[test]
    fn test_effective_code_prefers_documented() {
        let mut state = PipelineState::new("x = 1");
        assert_eq!(state.effective_code(), "x = 1");
        state.documented_code = "# one\nx = 1".to_string();
        assert_eq!(state.effective_code(), "# one\nx = 1");
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut state = PipelineState::new("x");
        state.advance(CurrentStep::Researched).unwrap();
        state.advance(CurrentStep::Analyzed).unwrap();
        let err = state.advance(CurrentStep::Documented).unwrap_err();
        assert!(matches!(err, PipelineError::StepRegression { .. }));
        assert_eq!(state.current_step, CurrentStep::Analyzed);
    }

    #[test]
    fn test_serialized_shape() {
        let state = PipelineState::new("import os");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["current_step"], "start");
        assert_eq!(json["original_code"], "import os");
        assert_eq!(json["libraries_used"], serde_json::json!([]));
    }
}
