pub mod cleaner;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod inspector;
pub mod logging;
pub mod orchestrator;
pub mod ui;

pub use error::{MilestoneError, Result};
