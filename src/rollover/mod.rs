//! Day rollover engine.
//!
//! When the wall clock moves past the stored day, the outgoing day is
//! archived, the streak and stats are updated, and every incomplete task
//! from both tiers is carried into the new day's main slots. The whole
//! transition is computed by [`rollover`] into a fresh [`AppState`] so
//! callers can swap it in with a single assignment.

use crate::clock::parse_day_key;
use crate::slots::{Priority, TaskSet, TaskSlot, Tier};
use crate::state::{AppState, ArchivedDay};
use crate::stats::{accrue, completed_today, completion_rate};

#[cfg(test)]
mod tests;

/// An incomplete task lifted out of the outgoing day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedTask {
    pub text: String,
    pub priority: Priority,
    /// Rollover count after this boundary (old count + 1).
    pub rollover_count: u32,
}

/// Summary of one rollover, for logging and the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverReport {
    /// Day key that was archived.
    pub from: String,
    /// Day key that became current.
    pub to: String,
    pub archived_rate: u8,
    pub streak: u32,
    /// Completed slots accrued into stats (both tiers).
    pub completed: u32,
    /// Incomplete tasks placed into the new day.
    pub carried: usize,
    /// Incomplete tasks lost to the fixed slot capacity.
    pub dropped: usize,
}

/// Whether the day check should roll `stored` over to `today`.
///
/// When both keys parse as dates only a strictly later day fires, so an
/// older date seen again after advancing never re-fires. Unparseable keys
/// fall back to plain inequality.
pub fn should_roll(stored: &str, today: &str) -> bool {
    if stored == today {
        return false;
    }
    match (parse_day_key(stored), parse_day_key(today)) {
        (Some(stored), Some(today)) => today > stored,
        _ => true,
    }
}

/// Whether `today` is strictly earlier than the stored day.
///
/// The day check stays idle until the clock catches up again.
pub fn clock_behind(stored: &str, today: &str) -> bool {
    match (parse_day_key(stored), parse_day_key(today)) {
        (Some(stored), Some(today)) => today < stored,
        _ => false,
    }
}

/// Streak and last-completion date after closing out `day`.
///
/// A day with any completed main slot extends the streak when the previous
/// completion day is at most one day away, and restarts it at 1 otherwise.
/// A day with no completions breaks the streak and leaves the last
/// completion date untouched.
pub fn next_streak(
    streak: u32,
    last_completion_date: Option<&str>,
    day: &str,
    has_completions: bool,
) -> (u32, Option<String>) {
    if !has_completions {
        return (0, last_completion_date.map(str::to_string));
    }

    let continues = match (last_completion_date.and_then(parse_day_key), parse_day_key(day)) {
        (Some(last), Some(day)) => (day - last).num_days().abs() <= 1,
        _ => false,
    };
    let streak = if continues {
        streak.saturating_add(1)
    } else {
        1
    };
    (streak, Some(day.to_string()))
}

/// Collect every incomplete, non-blank slot of both tiers.
///
/// Order: main major, main medium, main small, then the same for overflow.
pub fn harvest(main: &TaskSet, overflow: &TaskSet) -> Vec<HarvestedTask> {
    main.slots()
        .chain(overflow.slots())
        .filter(|(_, _, slot)| slot.is_pending())
        .map(|(priority, _, slot)| HarvestedTask {
            text: slot.text.clone(),
            priority,
            rollover_count: slot.rollover_count.saturating_add(1),
        })
        .collect()
}

/// Build the new day's main slots from harvested tasks.
///
/// - major: first major task
/// - medium[0]: second major task, else first medium task
/// - medium[1], medium[2]: second and third medium tasks
/// - small[0..5]: first five small tasks
///
/// Anything that does not fit is dropped. Returns the task set and the
/// number of dropped tasks.
pub fn reseed(harvested: &[HarvestedTask]) -> (TaskSet, usize) {
    let of = |priority: Priority| -> Vec<&HarvestedTask> {
        harvested.iter().filter(|t| t.priority == priority).collect()
    };
    let majors = of(Priority::Major);
    let mediums = of(Priority::Medium);
    let smalls = of(Priority::Small);

    let mut set = TaskSet::empty(Tier::Main);
    let mut placed = 0usize;
    let mut put = |set: &mut TaskSet, priority: Priority, index: usize, task: Option<&&HarvestedTask>| {
        if let Some(task) = task {
            set.place(priority, index, TaskSlot::carried(task.text.clone(), task.rollover_count));
            placed += 1;
        }
    };

    put(&mut set, Priority::Major, 0, majors.first());
    put(&mut set, Priority::Medium, 0, majors.get(1).or(mediums.first()));
    put(&mut set, Priority::Medium, 1, mediums.get(1));
    put(&mut set, Priority::Medium, 2, mediums.get(2));
    for index in 0..Tier::Main.arity(Priority::Small) {
        put(&mut set, Priority::Small, index, smalls.get(index));
    }

    (set, harvested.len() - placed)
}

/// Compute the state for `today` from the state of the outgoing day.
pub fn rollover(state: &AppState, today: &str) -> (AppState, RolloverReport) {
    let day = state.current_date.as_str();
    let archived_rate = completion_rate(&state.main);
    let archived = ArchivedDay {
        date: day.to_string(),
        main: snapshot(&state.main),
        overflow: snapshot(&state.overflow),
        completion_rate: archived_rate,
    };

    let (streak, last_completion_date) = next_streak(
        state.streak,
        state.last_completion_date.as_deref(),
        day,
        state.main.any_completed(),
    );

    let completed = completed_today(state);
    let harvested = harvest(&state.main, &state.overflow);
    let (main, dropped) = reseed(&harvested);

    let mut next = AppState {
        current_date: today.to_string(),
        main,
        overflow: TaskSet::empty(Tier::Overflow),
        streak,
        last_completion_date,
        history: state.history.clone(),
        stats: accrue(state.stats, completed),
    };
    next.push_history(archived);

    let report = RolloverReport {
        from: day.to_string(),
        to: today.to_string(),
        archived_rate,
        streak,
        completed,
        carried: harvested.len() - dropped,
        dropped,
    };
    (next, report)
}

/// Archive copy of a task set: text and completion only.
fn snapshot(set: &TaskSet) -> TaskSet {
    let mut copy = TaskSet::empty(set.tier());
    for (priority, index, slot) in set.slots() {
        let mut slot = slot.clone();
        slot.rollover_count = 0;
        copy.place(priority, index, slot);
    }
    copy
}
