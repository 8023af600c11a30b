//! Error type shared by the generation loops and the dispatcher.

use std::io;

/// Failures that end a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier source could not produce an identifier.
    #[error("failed to generate uuid: {source}")]
    Generation {
        /// Underlying entropy failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing an identifier to the output failed.
    #[error("failed to write uuid: {0}")]
    Output(#[source] io::Error),

    /// The interrupt listener could not be registered.
    #[error("failed to listen for interrupts: {0}")]
    Signal(#[source] io::Error),

    /// The worker running a generation loop died.
    #[error("generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The invocation was rejected, or help/version output was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),
}

impl Error {
    /// Wraps an entropy failure from the identifier source.
    pub fn generation(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Generation { source: Box::new(source) }
    }

    /// Returns `true` when the output's reader went away.
    ///
    /// A closed pipe ends the stream without being reported as a failure.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_pipe_is_detected() {
        let err = Error::Output(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_broken_pipe());
    }

    #[test]
    fn other_output_errors_are_not_broken_pipe() {
        let err = Error::Output(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!err.is_broken_pipe());
    }

    #[test]
    fn generation_error_mentions_source() {
        let err = Error::generation(io::Error::other("entropy exhausted"));
        assert_eq!(err.to_string(), "failed to generate uuid: entropy exhausted");
    }
}
