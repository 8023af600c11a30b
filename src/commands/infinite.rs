//! `infinite` command: emit one identifier per refresh interval.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use crate::context::ServiceContext;
use crate::error::Error;

use super::emit_one;

/// Default time between two identifiers.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(1);

/// Execute the `infinite` command.
///
/// The first identifier appears one full `refresh` after the call, then one
/// per tick until cancellation. Each wait resolves on whichever of the next
/// tick or cancellation comes first, with cancellation winning ties.
///
/// Returns how many identifiers were written.
///
/// # Errors
///
/// Returns the first identifier-source or output failure.
pub async fn run(ctx: &mut ServiceContext, refresh: Duration) -> Result<u64, Error> {
    // `interval_at` panics on a zero period.
    let refresh = refresh.max(Duration::from_nanos(1));
    tracing::debug!(?refresh, "streaming identifiers");

    let cancel = ctx.cancel.clone();
    let mut ticker = time::interval_at(Instant::now() + refresh, refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut emitted = 0;
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                emit_one(ctx)?;
                emitted += 1;
            }
        }
    }

    tracing::debug!(emitted, "stream cancelled");
    Ok(emitted)
}
