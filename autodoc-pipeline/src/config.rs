//! Run configuration and secrets.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_CODE_FILE: &str = "code.py";
pub const DEFAULT_REPORT_FILE: &str = "analysis.txt";
pub const DEFAULT_SEARCH_RESULTS: usize = 2;
pub const DIAGRAM_PNG_FILE: &str = "workflow_diagram.png";
pub const DIAGRAM_MERMAID_FILE: &str = "workflow_diagram.mmd";
pub const MERMAID_INK_BASE: &str = "https://mermaid.ink";

/// Everything a run needs besides the two secrets.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub model: String,
    pub temperature: f32,
    /// Directory receiving the artifacts and the diagram.
    pub output_dir: PathBuf,
    pub code_file: String,
    pub report_file: String,
    pub search_results: usize,
    /// Interpreter program plus arguments; it must read the program from stdin.
    pub interpreter: String,
    pub interpreter_args: Vec<String>,
    pub execution_timeout: Duration,
    /// Upper bound on model turns for each agent.
    pub max_iterations: usize,
    pub diagram: bool,
    pub diagram_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            output_dir: PathBuf::from("."),
            code_file: DEFAULT_CODE_FILE.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            search_results: DEFAULT_SEARCH_RESULTS,
            interpreter: autodoc_tool::builtin::DEFAULT_INTERPRETER.to_string(),
            interpreter_args: vec!["-".to_string()],
            execution_timeout: autodoc_tool::builtin::DEFAULT_EXECUTION_TIMEOUT,
            max_iterations: autodoc_agent::DEFAULT_MAX_ITERATIONS,
            diagram: true,
            diagram_base_url: MERMAID_INK_BASE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_code_file(mut self, name: impl Into<String>) -> Self {
        self.code_file = name.into();
        self
    }

    pub fn with_report_file(mut self, name: impl Into<String>) -> Self {
        self.report_file = name.into();
        self
    }

    pub fn with_search_results(mut self, count: usize) -> Self {
        self.search_results = count;
        self
    }

    pub fn with_interpreter<I, S>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interpreter = program.into();
        self.interpreter_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_diagram(mut self, enabled: bool) -> Self {
        self.diagram = enabled;
        self
    }

    pub fn with_diagram_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.diagram_base_url = base_url.into();
        self
    }

    pub fn code_path(&self) -> PathBuf {
        self.output_dir.join(&self.code_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

/// The model key and the search key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pub model_key: String,
    pub search_key: String,
}

impl ApiKeys {
    pub fn new(model_key: impl Into<String>, search_key: impl Into<String>) -> Self {
        Self { model_key: model_key.into(), search_key: search_key.into() }
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("model_key", &"<redacted>")
            .field("search_key", &"<redacted>")
            .finish()
    }
}
