//! Built-in command rules.
//!
//! Each module registers the rules for a family of commands. Rules read
//! the split command, may report diagnostics, and may record names in the
//! container's [`ScriptCheckContext`](crate::lint::ScriptCheckContext).

pub mod adjust;
pub mod definitions;
pub mod determine;
pub mod inject;
pub mod loops;

use super::registry::CommandRuleRegistry;

/// Register every built-in rule.
pub fn register_builtins(registry: &mut CommandRuleRegistry) {
    definitions::register(registry);
    loops::register(registry);
    inject::register(registry);
    adjust::register(registry);
    determine::register(registry);
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::lint::args::split_command;
    use crate::lint::collector::DiagnosticCollector;
    use crate::lint::context::ScriptCheckContext;
    use crate::lint::diagnostic::LintDiagnostic;
    use crate::lint::registry::{CommandCheck, CommandRuleRegistry};
    use crate::meta::model::DocumentationModel;
    use crate::parse::structure::LineTrackedString;

    /// Run the built-in rules for each line in turn with one shared context.
    pub fn run_lines(
        lines: &[&str],
        context: &mut ScriptCheckContext,
        model: &DocumentationModel,
    ) -> Vec<LintDiagnostic> {
        let registry = CommandRuleRegistry::with_builtins();
        let mut collector = DiagnosticCollector::new("t.dsc", Default::default());
        for (line, text) in lines.iter().enumerate() {
            let entry = LineTrackedString::new(*text, line, 6);
            let command = split_command(&entry);
            let mut check = CommandCheck {
                model,
                command: &command,
                line,
                line_end: entry.end(),
                has_block: false,
                context: &mut *context,
                collector: &mut collector,
            };
            registry.run(&mut check);
        }
        collector.finish().0
    }
}
