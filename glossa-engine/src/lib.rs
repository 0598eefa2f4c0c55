//! ICU4X-backed collaborators for Glossa
//!
//! This crate provides the concrete [`BoundaryAnalyzer`] and
//! [`MessageCompiler`] implementations used by the higher layers, along with
//! the options that tune them.

#![warn(missing_docs)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod message;

// Re-export key types
pub use analyzer::{Breaker, IcuBoundaryAnalyzer, PrecomputedCursor};
pub use config::{EngineConfig, LineStrictness, LineWordOption, WordModel};
pub use error::{EngineError, Result};
pub use message::{IcuMessageCompiler, IcuTemplate};

// Re-export from core for convenience
pub use glossa_core::{BoundaryAnalyzer, Locale, MessageCompiler, SegmentKind};
