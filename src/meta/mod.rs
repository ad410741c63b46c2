//! Documentation model.
//!
//! Documentation describes the commands, tags, events, actions,
//! mechanisms and object types scripts may use. It is read from local
//! `<--[kind] ... -->` blocks, collected into [`MetaObject`]s and built
//! into an immutable [`DocumentationModel`] that every analysis receives
//! as an explicit snapshot.
//!
//! # Example
//!
//! ```
//! use scriptcheck::meta::{loader, ModelBuilder};
//!
//! let mut sources = loader::LoadedSources::default();
//! loader::parse_meta_text(
//!     "<--[command]\n@name narrate\n@syntax narrate [<text>]\n@required 1\n@maximum 1\n-->",
//!     "inline",
//!     &mut sources,
//! );
//! let model = ModelBuilder::from_sources(sources).build();
//! assert!(model.command("narrate").is_some());
//! ```

pub mod loader;
pub mod model;
pub mod objects;
pub mod types;
pub mod validators;

pub use loader::{load_meta_sources, LoadedSources};
pub use model::{DocumentationModel, ModelBuilder, SharedModel};
pub use objects::{
    MetaAction, MetaCommand, MetaData, MetaEvent, MetaMechanism, MetaObject, MetaObjectType,
    MetaProperty, MetaTag, ParamRule, TagPartSpec,
};
pub use types::{ObjectTypeId, TypeGraph};
pub use validators::{ValidatorFn, ValidatorRegistry};
