//! Building the documentation model for a command.

use std::path::PathBuf;

use crate::error::Result;
use crate::meta::{load_meta_sources, DocumentationModel, ModelBuilder};
use crate::ui::UserInterface;

use super::dispatcher::Project;

/// Documentation paths for a run: explicit `--docs` paths win over the
/// config file's `docs` list.
pub fn docs_paths(project: &Project, explicit: &[PathBuf]) -> Vec<PathBuf> {
    if explicit.is_empty() {
        project.config.docs_paths(&project.root)
    } else {
        explicit.to_vec()
    }
}

/// Load and build the documentation model.
///
/// With no paths the model is empty, which turns off every check that
/// needs documentation. Load problems inside the sources are logged and
/// summarized as a warning.
pub fn load_model(paths: &[PathBuf], ui: &mut dyn UserInterface) -> Result<DocumentationModel> {
    if paths.is_empty() {
        ui.warning("No documentation sources configured; command, tag and event checks are skipped");
        return Ok(DocumentationModel::empty());
    }

    let sources = load_meta_sources(paths)?;
    let files = sources.files;
    let model = ModelBuilder::from_sources(sources).build();

    for warning in model.load_warnings() {
        tracing::warn!("{}", warning);
    }
    if !model.load_warnings().is_empty() {
        ui.warning(&format!(
            "{} problem(s) while reading documentation (run with --debug for details)",
            model.load_warnings().len()
        ));
    }
    if ui.output_mode().shows_details() {
        ui.message(&format!(
            "Loaded documentation from {} file(s): {} command(s), {} tag(s), {} event(s)",
            files,
            model.command_count(),
            model.tag_count(),
            model.events().len()
        ));
    }
    Ok(model)
}
