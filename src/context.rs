//! Service context bundling what the generation loops depend on.

use std::io::{self, Write};

use tokio_util::sync::CancellationToken;

use crate::adapters::live::id_source::PooledIdSource;
use crate::ports::IdSource;

/// Bundles the identifier source, the output sink and the cancellation token.
///
/// Constructors wire up different implementations: [`ServiceContext::live`]
/// for the real program, [`ServiceContext::new`] for anything else.
pub struct ServiceContext {
    /// Source of fresh identifiers.
    pub id_source: Box<dyn IdSource>,
    /// Sink receiving one identifier per line.
    pub out: Box<dyn Write + Send>,
    /// Cooperative stop signal shared with the signal bridge.
    pub cancel: CancellationToken,
}

impl ServiceContext {
    /// Creates a context from explicit parts.
    #[must_use]
    pub fn new(
        id_source: Box<dyn IdSource>,
        out: Box<dyn Write + Send>,
        cancel: CancellationToken,
    ) -> Self {
        Self { id_source, out, cancel }
    }

    /// Creates a live context printing OS-random UUIDs to standard output.
    #[must_use]
    pub fn live(cancel: CancellationToken) -> Self {
        Self::new(Box::new(PooledIdSource::new()), Box::new(io::stdout()), cancel)
    }
}
