//! Static shape of a run: which step follows which.

use crate::router::Route;
use crate::steps::StepName;

pub const START: &str = "__start__";
pub const END: &str = "__end__";

/// First step of every run.
pub const ENTRY: StepName = StepName::Research;

/// What the driver does once a step has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Unconditionally continue with this step.
    Next(StepName),
    /// Ask the router.
    Route,
    End,
}

pub fn transition_after(step: StepName) -> Transition {
    match step {
        StepName::Research => Transition::Route,
        StepName::Document => Transition::Next(StepName::Analyze),
        StepName::Analyze => Transition::Next(StepName::Finalize),
        StepName::Finalize => Transition::End,
    }
}

/// Mermaid flowchart of the step graph. Conditional edges are dotted.
pub fn render_mermaid() -> String {
    let mut lines = vec![
        "---".to_string(),
        "config:".to_string(),
        "  flowchart:".to_string(),
        "    curve: linear".to_string(),
        "---".to_string(),
        "graph TD;".to_string(),
        format!("\t{START}([<p>{START}</p>]):::first"),
    ];
    for step in StepName::ALL {
        lines.push(format!("\t{step}({step})"));
    }
    lines.push(format!("\t{END}([<p>{END}</p>]):::last"));

    lines.push(format!("\t{START} --> {ENTRY};"));
    for step in StepName::ALL {
        match transition_after(step) {
            Transition::Next(next) => lines.push(format!("\t{step} --> {next};")),
            Transition::Route => {
                for route in [Route::Analyze, Route::Document] {
                    lines.push(format!("\t{step} -.-> {};", route.step()));
                }
            }
            Transition::End => lines.push(format!("\t{step} --> {END};")),
        }
    }

    lines.push("\tclassDef default fill:#f2f0ff,line-height:1.2".to_string());
    lines.push("\tclassDef first fill-opacity:0".to_string());
    lines.push("\tclassDef last fill:#bfb6fc".to_string());
    lines.join("\n") + "\n"
}
