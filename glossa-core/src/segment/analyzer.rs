//! Boundary analysis collaborator seam

use super::SegmentKind;
use crate::error::Diagnostic;
use crate::locale::Locale;
use std::sync::Arc;

/// Factory for locale-specific boundary cursors
pub trait BoundaryAnalyzer: Send + Sync {
    /// Build a cursor for `kind` boundaries under `locale`
    fn create(
        &self,
        kind: SegmentKind,
        locale: &Locale,
    ) -> Result<Box<dyn BoundaryCursor>, Diagnostic>;
}

/// Stateful cursor over a bound UTF-16 buffer
///
/// Positions are UTF-16 code unit offsets. A freshly bound or reset cursor
/// sits at 0; `advance` returns each following boundary in increasing order
/// and `None` once the end has been reported.
pub trait BoundaryCursor: Send {
    /// Bind the cursor to a buffer and move it to the start
    fn bind(&mut self, text: Arc<[u16]>);

    /// Move back to the start of the buffer
    fn reset(&mut self);

    /// Move to the next boundary
    fn advance(&mut self) -> Option<usize>;

    /// Current position
    fn position(&self) -> usize;

    /// Independent cursor over the same buffer, positioned at the start
    fn fork(&self) -> Option<Box<dyn BoundaryCursor>> {
        None
    }
}
