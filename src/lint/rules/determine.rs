//! `determine` only has an effect where something reads the result.

use crate::lint::registry::{CommandCheck, CommandRuleRegistry};
use crate::lint::rule::Severity;

/// Container types whose scripts can return a determination.
const DETERMINING_TYPES: &[&str] = &[
    "procedure",
    "world",
    "assignment",
    "command",
    "custom",
    "economy",
    "enchantment",
];

pub fn register(registry: &mut CommandRuleRegistry) {
    registry.register("determine", determine);
}

fn determine(check: &mut CommandCheck<'_>) {
    let container = check.context.container_type.clone();
    if DETERMINING_TYPES.contains(&container.as_str()) {
        return;
    }
    check.report(
        "pointless_determine",
        Severity::Warning,
        format!("'determine' has no effect in a '{container}' script"),
    );
}

#[cfg(test)]
mod tests {
    use crate::lint::context::ScriptCheckContext;
    use crate::lint::rules::testing::run_lines;
    use crate::meta::model::DocumentationModel;

    #[test]
    fn determine_in_task_is_pointless() {
        let mut ctx = ScriptCheckContext::new("task");
        let diags = run_lines(&["determine 5"], &mut ctx, &DocumentationModel::empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_str(), "pointless_determine");
        assert!(diags[0].message.contains("task"));
    }

    #[test]
    fn determine_in_procedure_is_fine() {
        for container in ["procedure", "world", "assignment"] {
            let mut ctx = ScriptCheckContext::new(container);
            let diags = run_lines(&["determine 5"], &mut ctx, &DocumentationModel::empty());
            assert!(diags.is_empty(), "{container}");
        }
    }
}
