//! Core types for locale-aware text segmentation and message rendering
//!
//! This crate holds the engine-independent half of Glossa. It defines the
//! collaborator seams ([`BoundaryAnalyzer`] and [`MessageCompiler`]) and the
//! state machines that sit on top of them:
//!
//! - [`SegmentationSession`] binds a boundary cursor to one text and hands out
//!   iterators of `(start, end)` UTF-16 offsets or of substrings.
//! - [`ValueCoercer`] and [`ArgumentTable`] turn caller arguments into the
//!   closed set of [`FormattableValue`]s a template can render.
//!
//! Concrete analyzers and compilers live in `glossa-engine`.
//!
//! # Example
//!
//! ```rust
//! use glossa_core::{Argument, ArgumentTable, FormattableValue, ValueCoercer};
//!
//! let args = vec![("count", Argument::from(3i64)), ("name", Argument::from("Ada"))];
//! let table = ArgumentTable::build(args, &ValueCoercer::default()).unwrap();
//!
//! assert_eq!(table.get("count"), Some(&FormattableValue::Integer(3)));
//! assert_eq!(table.names(), ["count".to_string(), "name".to_string()]);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod locale;
pub mod message;
pub mod segment;

pub use error::{CoercionCause, CoreError, Diagnostic, DiagnosticCode, LocaleError, Result};
pub use locale::Locale;
pub use message::{
    Argument, ArgumentKey, ArgumentTable, ArgumentValue, CompiledMessage, CompiledTemplate,
    DecimalText, FormattableValue, LocalTimeline, MessageCompiler, Timeline, UtcTimeline,
    ValueCoercer,
};
pub use segment::{
    BoundaryAnalyzer, BoundaryCursor, BoundaryPairIterator, SegmentKind, SegmentTextIterator,
    SegmentationSession,
};
