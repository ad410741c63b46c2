//! Analyses over the documentation model: event matching and tag tracing.

pub mod events;
pub mod tracer;

pub use events::{best_match, compile_matchers, expand_optionals, CouldMatcher, SlotValidator};
pub use tracer::{trace_tag, TraceError, TraceErrorKind};
