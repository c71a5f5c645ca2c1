//! Completion rate, overflow unlock and stat accrual.

use crate::slots::{TaskSet, Tier};
use crate::state::{AppState, Stats};

/// Main-tier completion as a rounded percentage of all 9 slots.
///
/// Empty slots count against the rate; the denominator never shrinks.
pub fn completion_rate(main: &TaskSet) -> u8 {
    let total = Tier::Main.total_slots();
    let done = main.completed_count().min(total);
    ((done * 200 + total) / (total * 2)) as u8
}

/// Whether every main slot is completed and has non-blank text.
///
/// This gates the overflow tier and is recomputed on every read.
pub fn all_main_tasks_complete(main: &TaskSet) -> bool {
    main.slots().all(|(_, _, slot)| slot.completed && slot.has_text())
}

/// Completed slots across both tiers, the amount accrued at rollover.
pub fn completed_today(state: &AppState) -> u32 {
    (state.main.completed_count() + state.overflow.completed_count()) as u32
}

/// Stats after accruing a day's completions.
pub fn accrue(stats: Stats, completed: u32) -> Stats {
    Stats {
        week_completed: stats.week_completed.saturating_add(completed),
        total_completed: stats.total_completed.saturating_add(completed),
    }
}
