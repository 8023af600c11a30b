//! Identifier source port for producing random UUIDs.

use uuid::Uuid;

use crate::error::Error;

/// Produces fresh random identifiers on demand.
///
/// Abstracting the source lets the generation loops run against a scripted
/// or failing source in tests.
pub trait IdSource: Send {
    /// Returns a new random (version 4) UUID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if no entropy is available.
    fn next_id(&mut self) -> Result<Uuid, Error>;
}
