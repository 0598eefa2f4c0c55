//! Core error types
//!
//! Collaborators report failures as a [`Diagnostic`]; the core wraps them into
//! [`CoreError`] variants that say which operation failed.

use std::fmt;
use thiserror::Error;

/// Diagnostic code reported by a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Locale data required by the collaborator is unavailable
    MissingResource,
    /// An argument or option is not acceptable
    IllegalArgument,
    /// Malformed pattern
    PatternSyntax,
    /// Braces in a pattern do not balance
    UnmatchedBraces,
    /// A pattern references an argument absent from the table
    MissingArgument,
    /// A bound value does not fit the placeholder kind
    ArgumentTypeMismatch,
    /// Anything else the collaborator could not do
    Internal,
}

impl DiagnosticCode {
    /// Stable kebab-case name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingResource => "missing-resource",
            DiagnosticCode::IllegalArgument => "illegal-argument",
            DiagnosticCode::PatternSyntax => "pattern-syntax",
            DiagnosticCode::UnmatchedBraces => "unmatched-braces",
            DiagnosticCode::MissingArgument => "missing-argument",
            DiagnosticCode::ArgumentTypeMismatch => "argument-type-mismatch",
            DiagnosticCode::Internal => "internal",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a collaborator (analyzer or message compiler)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {detail}")]
pub struct Diagnostic {
    /// Machine readable code
    pub code: DiagnosticCode,
    /// Human readable detail
    pub detail: String,
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(code: DiagnosticCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

/// Locale parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The tag cannot be read as a locale
    #[error("invalid locale tag '{tag}'")]
    InvalidTag {
        /// The offending tag
        tag: String,
    },

    /// A keyword in the `@k=v` suffix is malformed
    #[error("invalid locale keyword '{keyword}'")]
    InvalidKeyword {
        /// The offending keyword
        keyword: String,
    },
}

/// Why a single argument value could not be coerced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionCause {
    /// Integer outside the signed 64-bit range
    #[error("integer value out of range for int64")]
    Overflow,

    /// Decimal text not accepted by the renderer
    #[error("cannot create a decimal from '{text}'")]
    DecimalParse {
        /// The rejected text
        text: String,
    },

    /// Value kind not in the accepted set
    #[error("unsupported type '{type_name}': values must be integer, floating point, text, decimal, date, or datetime")]
    UnsupportedType {
        /// Name of the rejected type
        type_name: String,
    },

    /// A collaborator call (timestamp computation) failed
    #[error("{0}")]
    Collaborator(String),
}

/// Core errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Locale could not be parsed
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// Boundary analyzer could not be built
    #[error("failed to create boundary analyzer for {kind} segmentation: {diagnostic}")]
    AnalyzerConstruction {
        /// Requested segmentation kind
        kind: String,
        /// Collaborator diagnostic
        diagnostic: Diagnostic,
    },

    /// Boundary cursor cannot produce a private clone
    #[error("boundary cursor for {kind} segmentation cannot be forked")]
    CursorNotForkable {
        /// Segmentation kind of the session
        kind: String,
    },

    /// Message pattern could not be compiled
    #[error("failed to compile message pattern: {0}")]
    PatternSyntax(Diagnostic),

    /// Argument value could not be coerced
    #[error("argument '{key}': {cause}")]
    Coercion {
        /// Offending argument name
        key: String,
        /// Underlying cause
        cause: CoercionCause,
    },

    /// Argument key is not text
    #[error("argument keys must be text, found {type_name}")]
    KeyType {
        /// Type of the rejected key
        type_name: String,
    },

    /// Argument map changed size while the table was built
    #[error("argument map size changed during iteration (expected {expected} entries)")]
    ConcurrentModification {
        /// Size captured before iterating
        expected: usize,
    },

    /// Template rendering failed
    #[error("failed to format message: {0}")]
    Render(Diagnostic),
}

impl CoreError {
    /// Diagnostic code carried by collaborator failures
    pub fn diagnostic_code(&self) -> Option<DiagnosticCode> {
        match self {
            CoreError::AnalyzerConstruction { diagnostic, .. } => Some(diagnostic.code),
            CoreError::PatternSyntax(diagnostic) | CoreError::Render(diagnostic) => {
                Some(diagnostic.code)
            }
            _ => None,
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
