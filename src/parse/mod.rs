//! Text-level parsing: matchers, tags, source preparation and structure.

pub mod pattern;
pub mod source;
pub mod structure;
pub mod tag;

pub use pattern::{compile, is_advanced, MatchPredicate, PatternError};
pub use source::{indentation_of, LineStats, PreparedSource};
pub use structure::{
    parse_structure, LineTrackedString, ParsedStructure, StructureIssue, StructureIssueKind,
    StructureNode,
};
pub use tag::{parse_tag, ParsedTag, TagPart, TagSyntaxError};
