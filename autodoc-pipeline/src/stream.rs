//! Events emitted while a run is in progress.

use crate::error::Result;
use crate::state::PipelineState;
use crate::steps::StepName;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::pin::Pin;

pub type PipelineEventStream = Pin<Box<dyn Stream<Item = Result<PipelineEvent>> + Send>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// The step graph was written to disk
    DiagramSaved { path: PathBuf },

    /// A step is about to run
    StepStart { step: StepName },

    /// A step finished; `state` is its output
    StepEnd { step: StepName, duration_ms: u64, state: PipelineState },

    /// The router picked the step after `from`
    Routed { from: StepName, to: StepName },

    /// The run reached the terminal step
    Done { state: PipelineState, steps_executed: usize },
}

impl PipelineEvent {
    pub fn diagram_saved(path: PathBuf) -> Self {
        Self::DiagramSaved { path }
    }

    pub fn step_start(step: StepName) -> Self {
        Self::StepStart { step }
    }

    pub fn step_end(step: StepName, duration_ms: u64, state: PipelineState) -> Self {
        Self::StepEnd { step, duration_ms, state }
    }

    pub fn routed(from: StepName, to: StepName) -> Self {
        Self::Routed { from, to }
    }

    pub fn done(state: PipelineState, steps_executed: usize) -> Self {
        Self::Done { state, steps_executed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagging() {
        let json = serde_json::to_value(PipelineEvent::step_start(StepName::Research)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "step_start", "step": "research" }));

        let event = PipelineEvent::routed(StepName::Research, StepName::Analyze);
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "routed");
        assert_eq!(json["to"], "analyze");
    }
}
