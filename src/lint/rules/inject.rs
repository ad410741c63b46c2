//! `inject` runs another script inside the current queue, so any name may
//! be defined or saved from then on.

use crate::lint::registry::{CommandCheck, CommandRuleRegistry};

pub fn register(registry: &mut CommandRuleRegistry) {
    registry.register("inject", inject);
}

fn inject(check: &mut CommandCheck<'_>) {
    check.context.defs_unknowable = true;
    check.context.saves_unknowable = true;
}
