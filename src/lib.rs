//! Core library entry for the `uuid-generator` CLI.
//!
//! The binary prints random UUIDs, either a fixed batch (`generate`) or one
//! per refresh interval until interrupted (`infinite`, the default).

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod context;
pub mod duration;
pub mod error;
pub mod ports;
pub mod signal;
pub mod telemetry;

pub use error::Error;

use context::ServiceContext;
use signal::SignalBridge;

/// Run the CLI with the provided arguments.
///
/// Installs the interrupt bridge, runs the selected generation loop against
/// standard output and releases the bridge once the loop returns.
///
/// Must be called from within a Tokio runtime with signal and time drivers
/// enabled.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails or help/version text
/// was requested, and the loop's error when generation or output fails.
pub async fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let command = cli::parse_command(args)?;

    let bridge = SignalBridge::install().map_err(Error::Signal)?;
    let ctx = ServiceContext::live(bridge.token());

    let result = commands::dispatch(&command, ctx).await;
    bridge.shutdown().await;
    result
}
