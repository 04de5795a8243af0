//! Human-readable progress lines for a pipeline run.

use autodoc_pipeline::{PipelineConfig, PipelineEvent, PipelineState, Route, StepName};
use colored::Colorize;

const RULE_WIDTH: usize = 50;
const STEP_RULE_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Title,
    Rule,
    Step,
    Detail,
    Success,
}

/// One line of console output, styled only when printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub style: Style,
    pub text: String,
}

impl ConsoleLine {
    fn new(style: Style, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }

    pub fn render(&self) -> String {
        match self.style {
            Style::Title => self.text.bright_white().bold().to_string(),
            Style::Rule => self.text.bright_black().to_string(),
            Style::Step => self.text.cyan().bold().to_string(),
            Style::Detail => self.text.clone(),
            Style::Success => self.text.green().to_string(),
        }
    }
}

fn rule(ch: char, width: usize) -> ConsoleLine {
    ConsoleLine::new(Style::Rule, ch.to_string().repeat(width))
}

fn detail(text: impl Into<String>) -> ConsoleLine {
    ConsoleLine::new(Style::Detail, text)
}

/// Maps pipeline events to console lines.
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    code_file: String,
    report_file: String,
}

impl ConsoleOutput {
    pub fn new(config: &PipelineConfig) -> Self {
        Self { code_file: config.code_file.clone(), report_file: config.report_file.clone() }
    }

    pub fn banner(&self) -> Vec<ConsoleLine> {
        vec![
            ConsoleLine::new(Style::Title, "Starting Documentation Workflow"),
            rule('=', RULE_WIDTH),
        ]
    }

    pub fn event(&self, event: &PipelineEvent) -> Vec<ConsoleLine> {
        match event {
            PipelineEvent::DiagramSaved { path } => {
                vec![detail(format!("Workflow diagram saved as {}", path.display()))]
            }
            PipelineEvent::StepStart { step } => vec![step_intro(*step)],
            PipelineEvent::StepEnd { step, state, .. } => {
                let mut lines = self.step_details(*step, state);
                lines.push(detail(""));
                lines.push(ConsoleLine::new(
                    Style::Step,
                    format!("Step: {}", step.as_str().to_uppercase()),
                ));
                lines.push(rule('-', STEP_RULE_WIDTH));
                lines
            }
            PipelineEvent::Routed { to, .. } => {
                let text = if *to == Route::Analyze.step() {
                    "  - Code already documented, proceeding to analysis"
                } else {
                    "  - Code requires documentation"
                };
                vec![detail(text)]
            }
            PipelineEvent::Done { state, .. } => self.summary(state),
        }
    }

    fn step_details(&self, step: StepName, state: &PipelineState) -> Vec<ConsoleLine> {
        match step {
            StepName::Research => vec![
                detail(format!("  - Libraries found: {:?}", state.libraries_used)),
                detail(format!("  - Documentation present: {}", state.has_documentation)),
            ],
            StepName::Document => vec![detail("  - Documentation completed")],
            StepName::Analyze => vec![
                detail(format!("  - Issues found: {}", state.issues_found.len())),
                detail(format!("  - Test results captured: {}", state.test_results.len())),
            ],
            StepName::Finalize => {
                vec![ConsoleLine::new(Style::Success, "Workflow completed successfully")]
            }
        }
    }

    fn summary(&self, state: &PipelineState) -> Vec<ConsoleLine> {
        vec![
            detail(""),
            rule('=', RULE_WIDTH),
            ConsoleLine::new(Style::Title, "WORKFLOW SUMMARY"),
            rule('=', RULE_WIDTH),
            detail(format!("Status: {}", state.current_step)),
            detail(format!("Libraries: {}", state.libraries_used.len())),
            detail(format!("Issues: {}", state.issues_found.len())),
            detail(format!("Tests: {}", state.test_results.len())),
            detail(""),
            detail("Output files:"),
            detail(format!("  - {}: Documented code", self.code_file)),
            detail(format!("  - {}: Analysis results", self.report_file)),
        ]
    }

    pub fn print(lines: &[ConsoleLine]) {
        for line in lines {
            println!("{}", line.render());
        }
    }
}

fn step_intro(step: StepName) -> ConsoleLine {
    let text = match step {
        StepName::Research => "RESEARCH: Analyzing code structure and documentation...",
        StepName::Document => "DOCUMENT: Adding documentation and comments...",
        StepName::Analyze => "ANALYZE: Testing code and identifying issues...",
        StepName::Finalize => "FINALIZE: Saving results to files...",
    };
    ConsoleLine::new(Style::Step, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autodoc_pipeline::CurrentStep;

    fn texts(lines: Vec<ConsoleLine>) -> Vec<String> {
        lines.into_iter().map(|l| l.text).collect()
    }

    fn output() -> ConsoleOutput {
        ConsoleOutput::new(&PipelineConfig::default())
    }

    #[test]
    fn test_banner() {
        assert_eq!(
            texts(output().banner()),
            vec!["Starting Documentation Workflow".to_string(), "=".repeat(50)]
        );
    }

    #[test]
    fn test_research_end_lines() {
        let mut state = PipelineState::new("import math");
        state.libraries_used = vec!["math".into()];
        state.current_step = CurrentStep::Researched;
        let event = PipelineEvent::step_end(StepName::Research, 12, state);

        assert_eq!(
            texts(output().event(&event)),
            vec![
                "  - Libraries found: [\"math\"]".to_string(),
                "  - Documentation present: false".to_string(),
                String::new(),
                "Step: RESEARCH".to_string(),
                "-".repeat(30),
            ]
        );
    }

    #[test]
    fn test_route_lines() {
        let skip = PipelineEvent::routed(StepName::Research, StepName::Analyze);
        assert_eq!(
            texts(output().event(&skip)),
            vec!["  - Code already documented, proceeding to analysis"]
        );
        let doc = PipelineEvent::routed(StepName::Research, StepName::Document);
        assert_eq!(texts(output().event(&doc)), vec!["  - Code requires documentation"]);
    }

    #[test]
    fn test_summary_counts() {
        let mut state = PipelineState::new("x");
        state.current_step = CurrentStep::Completed;
        state.issues_found = vec!["a".into(), "b".into()];
        state.test_results = vec!["t".into()];
        let lines = texts(output().event(&PipelineEvent::done(state, 4)));

        assert!(lines.contains(&"WORKFLOW SUMMARY".to_string()));
        assert!(lines.contains(&"Status: completed".to_string()));
        assert!(lines.contains(&"Libraries: 0".to_string()));
        assert!(lines.contains(&"Issues: 2".to_string()));
        assert!(lines.contains(&"Tests: 1".to_string()));
        assert!(lines.contains(&"  - analysis.txt: Analysis results".to_string()));
    }
}
