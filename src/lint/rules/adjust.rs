//! `adjust <object> <mechanism>[:<value>]` must name a documented
//! mechanism.

use crate::lint::registry::{CommandCheck, CommandRuleRegistry};
use crate::lint::rule::Severity;

pub fn register(registry: &mut CommandRuleRegistry) {
    registry.register("adjust", adjust);
}

fn adjust(check: &mut CommandCheck<'_>) {
    let model = check.model;
    if model.mechanism_count() == 0 {
        return;
    }
    let positional = check.positional();
    let Some(arg) = positional.get(1).copied() else {
        return;
    };
    let name = arg
        .text
        .split_once(':')
        .map_or(arg.text.as_str(), |(name, _)| name)
        .to_lowercase();
    if name.is_empty() || name.contains('<') {
        return;
    }

    let found = model.mechanisms_named(&name);
    if found.is_empty() {
        check.report_arg(
            arg,
            "bad_mechanism",
            Severity::Warning,
            format!("Mechanism '{name}' is not documented for any object type"),
        );
        return;
    }
    if let Some(reason) = found
        .iter()
        .map(|m| m.deprecated.as_deref())
        .collect::<Option<Vec<_>>>()
        .and_then(|reasons| reasons.first().copied())
    {
        check.report_arg(
            arg,
            "deprecated_mechanism",
            Severity::Warning,
            format!("Mechanism '{name}' is deprecated: {reason}"),
        );
    }
}
