//! `generate` command: emit a fixed number of identifiers.

use crate::context::ServiceContext;
use crate::error::Error;

use super::emit_one;

/// Resolves the raw count argument into the number of identifiers to emit.
///
/// A missing, unparseable or zero count means one identifier. Negative
/// counts are accepted and emit nothing.
#[must_use]
pub fn effective_count(raw: Option<&str>) -> u64 {
    match raw.map(str::parse::<i64>) {
        Some(Ok(count)) if count > 0 => count.unsigned_abs(),
        Some(Ok(count)) if count < 0 => 0,
        _ => 1,
    }
}

/// Execute the `generate` command.
///
/// Cancellation is polled before every identifier without blocking; once it
/// is observed the loop stops early and reports success.
///
/// Returns how many identifiers were written.
///
/// # Errors
///
/// Returns the first identifier-source or output failure. Identifiers
/// written before the failure stay written.
pub fn run(ctx: &mut ServiceContext, count: u64) -> Result<u64, Error> {
    tracing::debug!(count, "generating identifiers");

    let mut emitted = 0;
    while emitted < count {
        if ctx.cancel.is_cancelled() {
            tracing::debug!(emitted, count, "generation cancelled");
            break;
        }
        emit_one(ctx)?;
        emitted += 1;
    }
    Ok(emitted)
}
