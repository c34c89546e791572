use crate::git::{CommandOutput, GitBackend};
use std::collections::HashMap;
use std::sync::Mutex;

/// Subcommands that change the repository or the remote
const MUTATING: &[&str] = &["checkout", "add", "commit", "tag", "push"];

/// Returns true when an argument vector changes repository or remote state
pub fn is_mutating(args: &[String]) -> bool {
    args.first()
        .map(|cmd| MUTATING.contains(&cmd.as_str()))
        .unwrap_or(false)
}

/// Scripted backend for testing without a real repository
///
/// Responses are looked up by exact argument vector first, then by the most
/// recently registered matching prefix, then the default (success, empty output).
/// Every invocation is recorded in order.
pub struct ScriptedBackend {
    exact: HashMap<Vec<String>, CommandOutput>,
    prefixes: Vec<(Vec<String>, CommandOutput)>,
    default: CommandOutput,
    calls: Mutex<Vec<Vec<String>>>,
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn scripted(ok: bool, output: &str) -> CommandOutput {
    if ok {
        CommandOutput::success(output)
    } else {
        CommandOutput::failure(Some(1), output)
    }
}

impl ScriptedBackend {
    /// Create a backend where every command succeeds with empty output
    pub fn new() -> Self {
        ScriptedBackend {
            exact: HashMap::new(),
            prefixes: Vec::new(),
            default: CommandOutput::success(""),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer this exact argument vector
    pub fn respond(self, args: &[&str], ok: bool, output: &str) -> Self {
        self.respond_with(args, scripted(ok, output))
    }

    pub fn respond_with(mut self, args: &[&str], output: CommandOutput) -> Self {
        self.exact.insert(owned(args), output);
        self
    }

    /// Answer any argument vector starting with `prefix`
    pub fn respond_prefix(self, prefix: &[&str], ok: bool, output: &str) -> Self {
        self.respond_prefix_with(prefix, scripted(ok, output))
    }

    pub fn respond_prefix_with(mut self, prefix: &[&str], output: CommandOutput) -> Self {
        self.prefixes.push((owned(prefix), output));
        self
    }

    /// Answer for commands with no scripted response
    pub fn otherwise(mut self, output: CommandOutput) -> Self {
        self.default = output;
        self
    }

    /// Every argument vector received so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Calls that would have changed the repository or remote
    pub fn mutating_calls(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().filter(|c| is_mutating(c)).collect()
    }

    fn lookup(&self, args: &[String]) -> CommandOutput {
        if let Some(out) = self.exact.get(args) {
            return out.clone();
        }
        self.prefixes
            .iter()
            .rev()
            .find(|(prefix, _)| args.starts_with(prefix))
            .map(|(_, out)| out.clone())
            .unwrap_or_else(|| self.default.clone())
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GitBackend for ScriptedBackend {
    fn run(&self, args: &[&str]) -> CommandOutput {
        let args = owned(args);
        let out = self.lookup(&args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_success() {
        let backend = ScriptedBackend::new();
        let out = backend.run(&["status", "--porcelain"]);
        assert!(out.ok);
        assert!(out.output.is_empty());
    }

    #[test]
    fn test_exact_beats_prefix() {
        let backend = ScriptedBackend::new()
            .respond_prefix(&["checkout"], false, "nope")
            .respond(&["checkout", "main"], true, "");

        assert!(backend.run(&["checkout", "main"]).ok);
        assert!(!backend.run(&["checkout", "dev"]).ok);
    }

    #[test]
    fn test_latest_prefix_wins() {
        let backend = ScriptedBackend::new()
            .respond_prefix(&["push"], false, "rejected")
            .respond_prefix(&["push", "origin", "--tags"], true, "");

        assert!(backend.run(&["push", "origin", "--tags"]).ok);
        assert!(!backend.run(&["push", "origin", "main"]).ok);
    }

    #[test]
    fn test_records_calls_in_order() {
        let backend = ScriptedBackend::new();
        backend.run(&["status", "--porcelain"]);
        backend.run(&["add", "-A"]);

        assert_eq!(backend.calls().len(), 2);
        assert_eq!(backend.mutating_calls(), vec![vec!["add", "-A"]]);
    }

    #[test]
    fn test_otherwise_applies_to_unscripted() {
        let backend = ScriptedBackend::new().otherwise(CommandOutput::failure(Some(128), "fatal"));
        let out = backend.run(&["rev-parse", "HEAD"]);
        assert!(!out.ok);
        assert_eq!(out.code, Some(128));
    }
}
