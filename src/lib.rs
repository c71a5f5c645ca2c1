//! Focus135: a daily 1 major / 3 medium / 5 small task board.
//!
//! Today's tasks live in a fixed-shape main tier; a smaller overflow tier
//! opens once every main slot is done. When the calendar day changes the
//! day is archived, the streak and stats are updated, and unfinished tasks
//! are carried into the new day.
//!
//! ## Layout
//!
//! - [`slots`], [`state`], [`stats`] - the task model and derived numbers
//! - [`rollover`] - the pure day-boundary transition
//! - [`codec`], [`store`] - the persisted JSON blob
//! - [`tracker`] - the single owner tying state, store and clock together
//! - [`tui`], [`ticker`] - the interactive board and its day-check timer

pub mod clock;
pub mod codec;
pub mod color;
pub mod config;
pub mod log;
pub mod rollover;
pub mod shutdown;
pub mod slots;
pub mod state;
pub mod stats;
pub mod store;
#[doc(hidden)]
pub mod testutil;
pub mod ticker;
pub mod tracker;
pub mod tui;
