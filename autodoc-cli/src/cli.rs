use autodoc_pipeline::PipelineConfig;
use autodoc_pipeline::config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use autodoc_telemetry::LogFormat;
use clap::Parser;
use std::path::PathBuf;

/// Document and test a Python module with Gemini.
#[derive(Parser, Debug)]
#[command(name = "autodoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Python file to process (the bundled calculator sample when omitted)
    pub input: Option<PathBuf>,

    /// Directory for code.py, analysis.txt and the workflow diagram
    #[arg(short, long, env = "AUTODOC_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Gemini model name
    #[arg(short, long, env = "AUTODOC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Interpreter used by the code execution tool
    #[arg(long, default_value = "python3")]
    pub python: String,

    /// Do not write workflow_diagram.png / workflow_diagram.mmd
    #[arg(long)]
    pub no_diagram: bool,

    /// Log output format (pretty or json)
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_output_dir(self.output_dir.clone())
            .with_interpreter(self.python.clone(), ["-"])
            .with_diagram(!self.no_diagram)
    }
}
