//! Message rendering
//!
//! Arguments arrive as `(key, value)` map entries. The [`ValueCoercer`] turns
//! each value into a [`FormattableValue`], the [`ArgumentTable`] keeps names and
//! values index-aligned, and a [`CompiledMessage`] hands both to the template
//! produced by a [`MessageCompiler`].

mod coercer;
mod compiler;
mod table;
mod value;

pub use coercer::{
    canonical_decimal, millis_since_epoch, Argument, ArgumentValue, DecimalText, LocalTimeline,
    Timeline, Timestamp, UtcTimeline, ValueCoercer,
};
pub use compiler::{CompiledMessage, CompiledTemplate, MessageCompiler};
pub use table::{ArgumentKey, ArgumentTable};
pub use value::FormattableValue;
