//! Periodic day-check ticks for the board.
//!
//! Posts [`TuiMessage::Tick`] on a channel at a fixed interval until the
//! guard is dropped or stopped.

use std::sync::mpsc::Sender;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::tui::TuiMessage;

/// A guard that sends ticks until dropped or stopped.
pub struct TickerGuard {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TickerGuard {
    /// Start ticking. A zero interval starts nothing.
    pub fn start(tx: Sender<TuiMessage>, interval: Duration) -> Self {
        if interval.is_zero() {
            return Self {
                stop: Arc::new(AtomicBool::new(true)),
                handle: None,
            };
        }

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut next_tick = interval;
            let poll = interval.min(Duration::from_millis(100));

            loop {
                if stop_clone.load(Ordering::SeqCst) {
                    break;
                }

                if start.elapsed() >= next_tick {
                    if tx.send(TuiMessage::Tick).is_err() {
                        debug!("board closed, ticker exiting");
                        break;
                    }
                    next_tick += interval;
                }

                thread::sleep(poll);
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Whether the ticker thread is running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some() && !self.stop.load(Ordering::SeqCst)
    }

    /// Stop ticking and wait for the thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}
