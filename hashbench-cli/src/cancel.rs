//! Sweep Cancellation
//!
//! A [`CancelToken`] is polled by the runner while it waits on the
//! executable. Tokens can be cancelled directly or, once
//! [`CancelToken::watch_sigint`] has been called, by Ctrl-C.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGINT handler.
static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a SIGINT handler that sets `SIGINT_RECEIVED`.
/// The handler is async-signal-safe (only sets an atomic).
#[cfg(unix)]
fn install_sigint_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    SIGINT_RECEIVED.store(true, Ordering::Relaxed);
}

/// No-op on non-Unix.
#[cfg(not(unix))]
fn install_sigint_handler() {}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    sigint: bool,
}

impl CancelToken {
    /// Token that is only cancelled through [`CancelToken::cancel`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that is also cancelled by SIGINT
    ///
    /// Replaces the default Ctrl-C behavior for the whole process: the sweep
    /// stops its current run and still writes its report.
    pub fn watch_sigint() -> Self {
        install_sigint_handler();
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            sigint: true,
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || (self.sigint && SIGINT_RECEIVED.load(Ordering::Relaxed))
    }
}
