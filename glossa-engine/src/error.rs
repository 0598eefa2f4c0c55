//! Engine errors and diagnostic helpers

use glossa_core::{CoreError, Diagnostic, DiagnosticCode};
use icu_provider::DataError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Unknown option value
    #[error("invalid value '{value}' for {option}")]
    InvalidOption {
        /// Option name
        option: &'static str,
        /// Rejected value
        value: String,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Wrap an ICU4X data failure into a collaborator diagnostic
pub(crate) fn data_diagnostic(what: &str, err: DataError) -> Diagnostic {
    log::debug!("locale data unavailable for {what}: {err}");
    Diagnostic::new(DiagnosticCode::MissingResource, format!("{what}: {err}"))
}
