//! Command dispatch and the generation loops.

pub mod generate;
pub mod infinite;

use std::io::Write;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Error;

/// Dispatch a parsed command to its generation loop.
///
/// The bounded loop never yields, so it runs on the blocking pool. That keeps
/// the runtime free for the interrupt listener even on a current-thread
/// runtime.
///
/// # Errors
///
/// Returns the error that aborted the selected loop.
pub async fn dispatch(command: &Command, mut ctx: ServiceContext) -> Result<(), Error> {
    match command {
        Command::Generate { count } => {
            let count = generate::effective_count(count.as_deref());
            tokio::task::spawn_blocking(move || generate::run(&mut ctx, count)).await??;
        }
        Command::Infinite(args) => {
            infinite::run(&mut ctx, args.refresh).await?;
        }
    }
    Ok(())
}

/// Requests one identifier and writes it as a single line.
fn emit_one(ctx: &mut ServiceContext) -> Result<(), Error> {
    let id = ctx.id_source.next_id()?;
    writeln!(ctx.out, "{}", id.hyphenated()).map_err(Error::Output)?;
    ctx.out.flush().map_err(Error::Output)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the loop tests.

    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use tokio_util::sync::CancellationToken;
    use uuid::Uuid;

    use crate::adapters::live::id_source::PooledIdSource;
    use crate::context::ServiceContext;
    use crate::error::Error;
    use crate::ports::IdSource;

    /// Output sink whose contents stay readable after it is boxed.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Source that succeeds `remaining` times, then reports exhausted entropy.
    pub struct FailingSource {
        pub remaining: usize,
    }

    impl IdSource for FailingSource {
        fn next_id(&mut self) -> Result<Uuid, Error> {
            if self.remaining == 0 {
                return Err(Error::generation(io::Error::other("entropy exhausted")));
            }
            self.remaining -= 1;
            Ok(Uuid::new_v4())
        }
    }

    /// Source that cancels `cancel` after handing out `after` identifiers.
    pub struct CancellingSource {
        pub after: usize,
        pub cancel: CancellationToken,
    }

    impl IdSource for CancellingSource {
        fn next_id(&mut self) -> Result<Uuid, Error> {
            self.after = self.after.saturating_sub(1);
            if self.after == 0 {
                self.cancel.cancel();
            }
            Ok(Uuid::new_v4())
        }
    }

    pub fn context_with(source: Box<dyn IdSource>) -> (ServiceContext, SharedBuffer) {
        let out = SharedBuffer::default();
        let ctx = ServiceContext::new(source, Box::new(out.clone()), CancellationToken::new());
        (ctx, out)
    }

    pub fn live_context() -> (ServiceContext, SharedBuffer) {
        context_with(Box::new(PooledIdSource::new()))
    }
}
