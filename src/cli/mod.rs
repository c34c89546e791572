//! Command-line layer independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_action, Action, WorkflowArgs};
