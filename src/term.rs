//! Terminal initialization and interrogation.
//!
//! This module provides functions to put the terminal in raw mode such that keys
//! can be read without blocking indefinitely, to restore its original mode, and to
//! query and track its size.

use crate::error::{Error, Result};
use crate::size::Size;
use libc::{c_int, c_void, sigaction, sighandler_t, siginfo_t, termios, winsize};
use libc::{SA_SIGINFO, SIGWINCH, STDIN_FILENO, STDOUT_FILENO, TCSAFLUSH, TIOCGWINSZ, VMIN, VTIME};
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Original terminal configuration captured by the first call to [`init`].
static DEFAULT_TERM: OnceLock<termios> = OnceLock::new();

/// Used by signal handler to convey that the terminal size changed.
static WINSIZE_CHANGED: AtomicBool = AtomicBool::new(false);

/// Ensures that signal handler is registered at most once.
static WINSIZE_HANDLER: AtomicBool = AtomicBool::new(false);

/// Puts the terminal into raw mode.
///
/// Raw mode is configured such that reads do not block indefinitely when no bytes
/// are available. In this case, the underlying driver waits `1/10` second before
/// returning with nothing.
///
/// # Errors
///
/// Returns [`Err`] if the terminal mode could not be queried or changed.
pub fn init() -> Result<()> {
    register_winsize_handler()?;
    let mut term = match DEFAULT_TERM.get() {
        Some(term) => *term,
        None => {
            let term = query_term()?;
            let _ = DEFAULT_TERM.set(term);
            term
        }
    };
    unsafe {
        libc::cfmakeraw(&mut term);
        term.c_cc[VMIN] = 0;
        term.c_cc[VTIME] = 1;
        check_err(libc::tcsetattr(STDIN_FILENO, TCSAFLUSH, &term))
    }
}

/// Restores the terminal to its original configuration, which does nothing if
/// [`init`] was never called.
pub fn restore() -> Result<()> {
    match DEFAULT_TERM.get() {
        Some(term) => unsafe { check_err(libc::tcsetattr(STDIN_FILENO, TCSAFLUSH, term)) },
        None => Ok(()),
    }
}

/// Returns the size of the terminal.
///
/// Calls to this function always query the underlying driver, as the terminal size may
/// have changed since the prior request.
///
/// # Errors
///
/// Returns [`Err`] if the size could not be queried.
pub fn size() -> Result<Size> {
    let win = unsafe {
        let mut win = MaybeUninit::<winsize>::uninit();
        check_err(libc::ioctl(STDOUT_FILENO, TIOCGWINSZ, win.as_mut_ptr()))?;
        win.assume_init()
    };
    Ok(Size::new(win.ws_row as u32, win.ws_col as u32))
}

/// Returns `true` if the terminal size changed.
///
/// If this function returns `true`, all subsequent calls will return `false` until the
/// terminal size once again changes.
pub fn size_changed() -> bool {
    WINSIZE_CHANGED.swap(false, Ordering::Relaxed)
}

fn check_err(err: c_int) -> Result<()> {
    if err < 0 { Err(Error::os()) } else { Ok(()) }
}

fn query_term() -> Result<termios> {
    unsafe {
        let mut term = MaybeUninit::<termios>::uninit();
        check_err(libc::tcgetattr(STDIN_FILENO, term.as_mut_ptr()))?;
        Ok(term.assume_init())
    }
}

/// Signal handler that gets invoked when the terminal size changes.
extern "C" fn winsize_handler(_: c_int, _: *mut siginfo_t, _: *mut c_void) {
    WINSIZE_CHANGED.store(true, Ordering::Relaxed);
}

/// Registers the signal handler to capture changes in terminal size.
fn register_winsize_handler() -> Result<()> {
    if WINSIZE_HANDLER.swap(true, Ordering::Relaxed) {
        return Ok(());
    }
    unsafe {
        let mut sigact = MaybeUninit::<sigaction>::zeroed();
        let sigact_ptr = sigact.as_mut_ptr();
        check_err(libc::sigemptyset(&mut (*sigact_ptr).sa_mask))?;
        (*sigact_ptr).sa_flags = SA_SIGINFO;
        (*sigact_ptr).sa_sigaction = winsize_handler as *const () as sighandler_t;
        check_err(libc::sigaction(SIGWINCH, sigact_ptr, ptr::null_mut()))
    }
}
