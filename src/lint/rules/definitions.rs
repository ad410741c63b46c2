//! `define` and `definemap` register the definition they create.

use crate::lint::registry::{CommandCheck, CommandRuleRegistry};

pub fn register(registry: &mut CommandRuleRegistry) {
    registry.register("define", register_definition);
    registry.register("definemap", register_definition);
}

fn register_definition(check: &mut CommandCheck<'_>) {
    let Some(first) = check.positional().into_iter().next() else {
        return;
    };
    // `define name:value` and `define name value` both name the definition first.
    let name = first
        .text
        .split_once(':')
        .map_or(first.text.as_str(), |(name, _)| name);
    check.context.define(name);
}

#[cfg(test)]
mod tests {
    use crate::lint::context::ScriptCheckContext;
    use crate::lint::rules::testing::run_lines;
    use crate::meta::model::DocumentationModel;

    #[test]
    fn define_registers_plain_and_colon_forms() {
        let mut ctx = ScriptCheckContext::new("task");
        run_lines(
            &["define count 3", "define Target:<player>", "definemap data:"],
            &mut ctx,
            &DocumentationModel::empty(),
        );
        assert!(ctx.knows_definition("count"));
        assert!(ctx.knows_definition("target"));
        assert!(ctx.knows_definition("data"));
        assert!(!ctx.knows_definition("player"));
    }

    #[test]
    fn dynamic_names_make_definitions_unknowable() {
        let mut ctx = ScriptCheckContext::new("task");
        run_lines(&["define <[prefix]>_x 1"], &mut ctx, &DocumentationModel::empty());
        assert!(ctx.defs_unknowable);
    }

    #[test]
    fn define_without_arguments_is_ignored() {
        let mut ctx = ScriptCheckContext::new("task");
        let diags = run_lines(&["define"], &mut ctx, &DocumentationModel::empty());
        assert!(diags.is_empty());
        assert!(ctx.definitions.is_empty());
    }
}
