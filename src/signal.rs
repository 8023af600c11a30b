//! Bridge from operating-system interrupts to cooperative cancellation.
//!
//! The first interrupt cancels the shared [`CancellationToken`] so the active
//! generation loop can stop at its next check. A second interrupt terminates
//! the process on the spot with status 1, skipping every remaining cleanup
//! step. That hard exit is the only place the program ends itself without
//! unwinding back to `main`, and it exists so a loop that fails to notice
//! cancellation can still be killed from the keyboard.

use std::future::Future;
use std::io;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Printed when the first interrupt starts a cooperative shutdown.
pub const SHUTDOWN_NOTICE: &str = "received signal, start shutdown";

/// Printed right before the second interrupt terminates the process.
pub const HARD_EXIT_NOTICE: &str = "received second signal, hard exit";

/// Process status used by the hard exit.
pub const HARD_EXIT_STATUS: i32 = 1;

/// A stream of interrupt notifications.
pub trait Interrupts: Send + 'static {
    /// Waits for the next interrupt.
    ///
    /// Resolves to `None` once no further interrupts can be delivered.
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send;
}

/// Interrupts delivered by the operating system (`SIGINT` / Ctrl-C).
pub struct OsInterrupts {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
}

impl OsInterrupts {
    /// Registers interest in process interrupts.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handler cannot be installed.
    #[cfg(unix)]
    pub fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self { inner: signal(SignalKind::interrupt())? })
    }

    /// Registers interest in process interrupts.
    ///
    /// # Errors
    ///
    /// Never fails on this platform; registration happens on first wait.
    #[cfg(not(unix))]
    pub fn register() -> io::Result<Self> {
        Ok(Self {})
    }
}

impl Interrupts for OsInterrupts {
    #[cfg(unix)]
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send {
        self.inner.recv()
    }

    #[cfg(not(unix))]
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send {
        async { tokio::signal::ctrl_c().await.ok() }
    }
}

impl Interrupts for tokio::sync::mpsc::UnboundedReceiver<()> {
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send {
        tokio::sync::mpsc::UnboundedReceiver::recv(self)
    }
}

/// How the interrupt listener finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerExit {
    /// The bridge was torn down; no hard exit is due.
    TornDown,
    /// A second interrupt arrived; the process must end now.
    SecondInterrupt,
}

/// Runs the interrupt listener until teardown or a second interrupt.
///
/// The first interrupt prints [`SHUTDOWN_NOTICE`] and cancels `cancel`.
/// Whichever way the first phase ends, the listener then waits for another
/// interrupt, bailing out as soon as `teardown` is cancelled.
pub async fn listen<I: Interrupts>(
    mut interrupts: I,
    cancel: CancellationToken,
    teardown: CancellationToken,
) -> ListenerExit {
    tokio::select! {
        biased;
        () = teardown.cancelled() => return ListenerExit::TornDown,
        received = interrupts.recv() => {
            if received.is_none() {
                teardown.cancelled().await;
                return ListenerExit::TornDown;
            }
            tracing::info!("interrupt received, cancelling generation");
            eprintln!("{SHUTDOWN_NOTICE}");
            cancel.cancel();
        }
    }

    tokio::select! {
        biased;
        () = teardown.cancelled() => ListenerExit::TornDown,
        received = interrupts.recv() => match received {
            Some(()) => ListenerExit::SecondInterrupt,
            None => {
                teardown.cancelled().await;
                ListenerExit::TornDown
            }
        },
    }
}

/// Owns the background interrupt listener and the cancellation token it
/// drives.
///
/// Call [`SignalBridge::shutdown`] once the main flow finishes. Dropping the
/// bridge tears it down as well, but without waiting for the listener task.
pub struct SignalBridge {
    cancel: CancellationToken,
    teardown: CancellationToken,
    listener: Option<JoinHandle<()>>,
}

impl SignalBridge {
    /// Listens for operating-system interrupts.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the interrupt handler cannot be installed.
    pub fn install() -> io::Result<Self> {
        Ok(Self::spawn(OsInterrupts::register()?))
    }

    /// Spawns the listener over an arbitrary interrupt stream.
    ///
    /// A second interrupt from `interrupts` terminates the process.
    pub fn spawn<I: Interrupts>(interrupts: I) -> Self {
        let cancel = CancellationToken::new();
        let teardown = CancellationToken::new();

        let listener = tokio::spawn({
            let cancel = cancel.clone();
            let teardown = teardown.clone();
            async move {
                match listen(interrupts, cancel, teardown).await {
                    ListenerExit::TornDown => tracing::debug!("interrupt listener released"),
                    ListenerExit::SecondInterrupt => hard_exit(),
                }
            }
        });

        Self { cancel, teardown, listener: Some(listener) }
    }

    /// Returns a handle to the cancellation token the loops observe.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tears the bridge down and waits for the listener task to finish.
    ///
    /// Dropping the returned future early is harmless; the bridge's drop
    /// still releases the listener.
    pub async fn shutdown(mut self) {
        self.release();
        if let Some(listener) = self.listener.take() {
            if let Err(err) = listener.await {
                tracing::warn!(%err, "interrupt listener ended abnormally");
            }
        }
    }

    fn release(&self) {
        self.teardown.cancel();
        self.cancel.cancel();
    }
}

impl Drop for SignalBridge {
    fn drop(&mut self) {
        self.release();
    }
}

fn hard_exit() -> ! {
    tracing::warn!("second interrupt received, terminating");
    eprintln!("{HARD_EXIT_NOTICE}");
    std::process::exit(HARD_EXIT_STATUS);
}
