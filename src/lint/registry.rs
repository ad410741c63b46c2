//! Per-command rule registry.
//!
//! The [`CommandRuleRegistry`] maps a command name to an ordered list of
//! rule functions. Registering a second rule for the same command adds to
//! the list; every rule for a command runs, in registration order.

use std::collections::HashMap;

use super::args::{CommandArg, SplitCommand};
use super::collector::DiagnosticCollector;
use super::context::ScriptCheckContext;
use super::rule::Severity;
use crate::meta::model::DocumentationModel;

/// A rule run against every use of one command.
pub type CommandRule = fn(&mut CommandCheck<'_>);

/// Everything a command rule can see and change.
pub struct CommandCheck<'a> {
    pub model: &'a DocumentationModel,
    pub command: &'a SplitCommand,
    /// Line of the command entry (0-indexed).
    pub line: usize,
    /// End column of the command entry.
    pub line_end: usize,
    /// Whether the entry opens a nested command block.
    pub has_block: bool,
    pub context: &'a mut ScriptCheckContext,
    pub collector: &'a mut DiagnosticCollector,
}

impl<'a> CommandCheck<'a> {
    /// Whether `prefix` is a switch of this command or a command-global
    /// switch.
    pub fn is_switch(&self, prefix: &str) -> bool {
        self.model.command_global_switches().contains(prefix)
            || self
                .model
                .command(&self.command.name)
                .is_some_and(|meta| meta.switches.iter().any(|s| s == prefix))
    }

    /// Arguments that are not `switch:value` pairs.
    pub fn positional(&self) -> Vec<&'a CommandArg> {
        let command: &'a SplitCommand = self.command;
        command
            .args
            .iter()
            .filter(|arg| match arg.switch() {
                Some((prefix, _)) => !self.is_switch(&prefix),
                None => true,
            })
            .collect()
    }

    /// Value of the first `prefix:value` argument.
    pub fn switch_value(&self, prefix: &str) -> Option<&'a str> {
        let command: &'a SplitCommand = self.command;
        command
            .args
            .iter()
            .find_map(|arg| match arg.switch() {
                Some((found, _)) if found == prefix => {
                    arg.text.split_once(':').map(|(_, value)| value)
                }
                _ => None,
            })
    }

    /// Report a problem covering the whole command entry.
    pub fn report(&mut self, key: &str, severity: Severity, message: impl Into<String>) {
        self.collector.report(
            key,
            severity,
            self.line,
            self.command.name_start,
            self.line_end,
            message,
        );
    }

    /// Report a problem at one argument.
    pub fn report_arg(
        &mut self,
        arg: &CommandArg,
        key: &str,
        severity: Severity,
        message: impl Into<String>,
    ) {
        self.collector
            .report(key, severity, self.line, arg.start, arg.end, message);
    }
}

/// Ordered rule functions per command name.
#[derive(Default)]
pub struct CommandRuleRegistry {
    rules: HashMap<String, Vec<CommandRule>>,
}

impl CommandRuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in command rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::rules::register_builtins(&mut registry);
        registry
    }

    /// Add a rule for a command. Earlier rules for the same command keep
    /// running first.
    pub fn register(&mut self, command: &str, rule: CommandRule) {
        self.rules
            .entry(command.to_lowercase())
            .or_default()
            .push(rule);
    }

    /// Rules registered for a command, in registration order.
    pub fn rules_for(&self, command: &str) -> &[CommandRule] {
        self.rules.get(command).map(Vec::as_slice).unwrap_or_default()
    }

    /// Run every rule registered for the checked command.
    pub fn run(&self, check: &mut CommandCheck<'_>) {
        for rule in self.rules_for(&check.command.name) {
            rule(check);
        }
    }

    /// Names of commands with at least one rule.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for CommandRuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut commands: Vec<_> = self.commands().collect();
        commands.sort_unstable();
        f.debug_struct("CommandRuleRegistry")
            .field("commands", &commands)
            .finish()
    }
}
