//! The one conditional edge: after Research, document or go straight to analysis.

use crate::state::PipelineState;
use crate::steps::StepName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Document,
    Analyze,
}

impl Route {
    pub fn step(self) -> StepName {
        match self {
            Route::Document => StepName::Document,
            Route::Analyze => StepName::Analyze,
        }
    }
}

/// Already-documented code skips Document. In that case the original is copied into
/// `documented_code` so Analyze and Finalize see it there.
pub fn route_after_research(state: &mut PipelineState) -> Route {
    if state.has_documentation {
        state.documented_code = state.original_code.clone();
        tracing::info!("code already documented, proceeding to analysis");
        Route::Analyze
    } else {
        tracing::info!("code requires documentation");
        Route::Document
    }
}
