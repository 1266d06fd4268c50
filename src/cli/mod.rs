//! Command-line workflow, kept apart from argument parsing in `main`.

pub mod orchestration;

pub use orchestration::{run_pipeline, PipelineArgs, PipelineReport, Stage};
