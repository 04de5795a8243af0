//! # autodoc-cli
//!
//! The `autodoc` binary: loads `.env`, resolves the Google and Tavily keys (prompting for
//! missing ones), runs the documentation pipeline over a Python file and prints progress.
//!
//! ```bash
//! autodoc                       # the bundled calculator sample
//! autodoc src/module.py -o out  # write code.py and analysis.txt into out/
//! ```

pub mod cli;
pub mod config;
pub mod output;

use anyhow::{Context, Result};
use std::path::Path;

/// Toy arithmetic module processed when no input file is given.
pub const SAMPLE_SOURCE: &str = include_str!("../samples/calculator.py");
pub const SAMPLE_NAME: &str = "calculator.py";

/// Display name and contents of the module to process.
pub fn load_source(input: Option<&Path>) -> Result<(String, String)> {
    let Some(path) = input else {
        return Ok((SAMPLE_NAME.to_string(), SAMPLE_SOURCE.to_string()));
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok((path.display().to_string(), source))
}
