//! # autodoc-pipeline
//!
//! Documents and tests a Python module with a hosted language model:
//!
//! ```text
//! research ──┬──> document ──> analyze ──> finalize
//!            └───────────────> analyze
//! ```
//!
//! Research runs static checks (imports, documentation presence) alongside a research agent;
//! the router skips Document when the code already carries documentation; Analyze has an
//! agent execute the code and extracts issues from its report; Finalize writes `code.py` and
//! `analysis.txt`.
//!
//! ```rust,ignore
//! use autodoc_pipeline::{ApiKeys, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::from_config(PipelineConfig::default(), &keys)?;
//! let state = pipeline.run(source).await?;
//! assert!(state.is_complete());
//! ```

pub mod analysis;
pub mod artifacts;
pub mod config;
pub mod diagram;
pub mod error;
pub mod executor;
pub mod graph;
pub mod prompts;
pub mod report;
pub mod router;
pub mod state;
pub mod steps;
pub mod stream;

pub use config::{ApiKeys, PipelineConfig};
pub use error::{PipelineError, Result};
pub use executor::{Pipeline, PipelineBuilder};
pub use router::{Route, route_after_research};
pub use state::{CurrentStep, PipelineState};
pub use steps::{StepContext, StepName};
pub use stream::{PipelineEvent, PipelineEventStream};
