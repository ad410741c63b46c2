//! Loop commands define their iteration values for the nested block.

use crate::lint::registry::{CommandCheck, CommandRuleRegistry};

/// Control forms that end or skip a loop instead of starting one.
const CONTROL_WORDS: &[&str] = &["stop", "next"];

pub fn register(registry: &mut CommandRuleRegistry) {
    registry.register("foreach", foreach);
    registry.register("repeat", repeat);
    registry.register("while", while_loop);
}

fn is_control(check: &CommandCheck<'_>) -> bool {
    check
        .command
        .args
        .first()
        .is_some_and(|arg| CONTROL_WORDS.contains(&arg.text.to_lowercase().as_str()))
}

fn foreach(check: &mut CommandCheck<'_>) {
    if is_control(check) {
        return;
    }
    let value = check.switch_value("as").unwrap_or("value");
    let key = check.switch_value("key").unwrap_or("key");
    check.context.define(value);
    check.context.define(key);
    check.context.define("loop_index");
}

fn repeat(check: &mut CommandCheck<'_>) {
    if is_control(check) {
        return;
    }
    let value = check.switch_value("as").unwrap_or("value");
    check.context.define(value);
}

fn while_loop(check: &mut CommandCheck<'_>) {
    if is_control(check) {
        return;
    }
    check.context.define("loop_index");
}
