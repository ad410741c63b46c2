//! Meta command implementation.
//!
//! The `scriptcheck meta` command looks documentation up: a tag such as
//! `<player.name>` is resolved the way the checker resolves it, anything
//! else is a free-text search over every documented object.

use crate::cli::args::MetaArgs;
use crate::error::Result;
use crate::meta::{MetaObject, MetaTag};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Project, EXIT_PROBLEMS, EXIT_USAGE};
use super::docs::{docs_paths, load_model};

/// Most search results printed.
const MAX_RESULTS: usize = 50;

/// The meta command implementation.
pub struct MetaCommand {
    project: Project,
    args: MetaArgs,
}

impl MetaCommand {
    /// Create a new meta command.
    pub fn new(project: Project, args: MetaArgs) -> Self {
        Self { project, args }
    }

    fn query(&self) -> String {
        self.args.query.join(" ")
    }
}

/// Whether a query should be resolved as a tag rather than searched.
fn is_tag_query(query: &str) -> bool {
    query.starts_with('<') || (!query.contains(' ') && query.contains('.'))
}

fn describe_tag(tag: &MetaTag) -> String {
    let mut text = format!("{}\n  returns: {}\n", tag.attribute, tag.returns);
    if let Some(reason) = &tag.deprecated {
        text.push_str(&format!("  deprecated: {}\n", reason));
    }
    if !tag.mechanism.is_empty() {
        text.push_str(&format!("  mechanism: {}\n", tag.mechanism));
    }
    for line in tag.description.lines().filter(|l| !l.trim().is_empty()) {
        text.push_str(&format!("  {}\n", line.trim()));
    }
    text
}

fn describe_result(object: &MetaObject) -> String {
    format!("{:<10} {}\n", object.kind(), object.name())
}

impl Command for MetaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let docs = docs_paths(&self.project, &self.args.docs);
        if docs.is_empty() {
            ui.error("No documentation sources; pass --docs or set `docs` in .scriptcheck.yml");
            return Ok(CommandResult::failure(EXIT_USAGE));
        }
        let model = match load_model(&docs, ui) {
            Ok(model) => model,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_USAGE));
            }
        };

        let query = self.query();
        if is_tag_query(&query) {
            if let Some(tag) = model.find_tag(&query) {
                ui.report(&describe_tag(tag));
                return Ok(CommandResult::success());
            }
            tracing::debug!(query = %query, "no tag found, falling back to search");
        }

        let results = model.search(&query.replace(['<', '>'], " "));
        if results.is_empty() {
            ui.warning(&format!("Nothing documented matches '{}'", query));
            return Ok(CommandResult::failure(EXIT_PROBLEMS));
        }
        let mut text = String::new();
        for object in results.iter().take(MAX_RESULTS) {
            text.push_str(&describe_result(object));
        }
        if results.len() > MAX_RESULTS {
            text.push_str(&format!("... and {} more\n", results.len() - MAX_RESULTS));
        }
        ui.report(&text);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptCheckConfig;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const DOCS: &str = r#"
<--[objecttype]
@name PlayerTag
@prefix p
@format The identity format for players is the UUID.
-->
<--[tag]
@attribute <PlayerTag.money>
@returns ElementTag(Decimal)
@description
Returns the amount of money the player has.
-->
<--[command]
@name narrate
@syntax narrate [<text>]
@short Shows some text to the player.
@required 1
@maximum 1
-->
"#;

    fn run(query: &[&str]) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs.meta");
        fs::write(&docs, DOCS).unwrap();
        let project = Project {
            root: temp.path().to_path_buf(),
            config: ScriptCheckConfig::default(),
        };
        let args = MetaArgs {
            query: query.iter().map(|q| q.to_string()).collect(),
            docs: vec![docs],
        };
        let mut ui = MockUI::new();
        let result = MetaCommand::new(project, args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn recognizes_tag_queries() {
        assert!(is_tag_query("<player.money>"));
        assert!(is_tag_query("player.money"));
        assert!(!is_tag_query("narrate"));
        assert!(!is_tag_query("shows some text."));
    }

    #[test]
    fn finds_tag_through_type_alias() {
        let (result, ui) = run(&["<player.money>"]);
        assert!(result.success);
        assert!(ui.report_text().contains("<PlayerTag.money>"));
        assert!(ui.report_text().contains("returns: ElementTag(Decimal)"));
    }

    #[test]
    fn searches_free_text() {
        let (result, ui) = run(&["shows", "text"]);
        assert!(result.success);
        assert!(ui.report_text().contains("narrate"));
    }

    #[test]
    fn no_match_fails() {
        let (result, ui) = run(&["teleport"]);
        assert_eq!(result.exit_code, EXIT_PROBLEMS);
        assert!(ui.has_warning("teleport"));
    }

    #[test]
    fn requires_docs() {
        let temp = TempDir::new().unwrap();
        let project = Project {
            root: temp.path().to_path_buf(),
            config: ScriptCheckConfig::default(),
        };
        let args = MetaArgs {
            query: vec!["narrate".into()],
            docs: vec![],
        };
        let mut ui = MockUI::new();
        let result = MetaCommand::new(project, args).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, EXIT_USAGE);
    }
}
