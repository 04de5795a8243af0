use anyhow::Result;
use autodoc_cli::cli::Cli;
use autodoc_cli::config::{ReadlinePrompt, env_lookup, resolve_api_keys};
use autodoc_cli::load_source;
use autodoc_cli::output::ConsoleOutput;
use autodoc_pipeline::{Pipeline, PipelineEvent};
use autodoc_telemetry::{Instrument, init_telemetry, pipeline_run_span};
use clap::Parser;
use colored::Colorize;
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<()> {
    // No .env is fine; keys may come from the environment or the prompt
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("Loaded config from: {}", path.display());
    }

    let cli = Cli::parse();
    init_telemetry("autodoc", cli.log_format)?;

    let (source_name, source) = load_source(cli.input.as_deref())?;
    let keys = resolve_api_keys(env_lookup, &mut ReadlinePrompt::new())?;

    let config = cli.pipeline_config();
    let span = pipeline_run_span(&source_name, &config.model);
    let output = ConsoleOutput::new(&config);
    let pipeline = Pipeline::from_config(config, &keys)?;

    ConsoleOutput::print(&output.banner());
    let run = async {
        let mut events = pipeline.run_stream(source);
        let mut completed = false;
        while let Some(event) = events.next().await {
            let event = event?;
            ConsoleOutput::print(&output.event(&event));
            completed |= matches!(event, PipelineEvent::Done { .. });
        }
        anyhow::Ok(completed)
    };

    match run.instrument(span).await {
        Ok(true) => Ok(()),
        Ok(false) => anyhow::bail!("pipeline stopped before completion"),
        Err(e) => {
            eprintln!("{}: {:#}", "Workflow failed".red().bold(), e);
            Err(e)
        }
    }
}
