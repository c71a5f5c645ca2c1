//! Ctrl+C handling for the board.
//!
//! The handler only sets a flag; the board loop polls [`requested`] and
//! exits cleanly, restoring the terminal and stopping the ticker.
//!
//! # Example
//!
//! ```ignore
//! use focus135::shutdown;
//!
//! shutdown::register_handler()?;
//!
//! if shutdown::requested() {
//!     // leave the event loop
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Global flag indicating shutdown has been requested.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// How many times Ctrl+C was pressed (for force-quit on repeated presses).
static INTERRUPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Maximum number of interrupts before force-quitting.
const MAX_INTERRUPTS: usize = 3;

/// Register the Ctrl+C handler. Call once at startup.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        let count = INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= MAX_INTERRUPTS {
            eprintln!("\nForce quit (received {} interrupts)", count);
            std::process::exit(130);
        }

        if count == 1 {
            SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        }
    })
    .map_err(|e| format!("failed to register Ctrl+C handler: {}", e))
}

/// Whether the user pressed Ctrl+C or [`request`] was called.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Programmatically request shutdown.
pub fn request() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Clear the flag and interrupt counter. Primarily for testing.
pub fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
    INTERRUPT_COUNT.store(0, Ordering::SeqCst);
}

/// Number of interrupts received.
pub fn interrupt_count() -> usize {
    INTERRUPT_COUNT.load(Ordering::SeqCst)
}
