pub mod advisory;
pub mod build;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod package;
pub mod platform;
pub mod process;
pub mod ui;
pub mod version;

pub use error::{PackagerError, Result};
