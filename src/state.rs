//! Application state: today's two task sets plus streak, stats and archive.

use crate::slots::{Priority, SlotAddr, TaskSet, TaskSlot, Tier};

/// Number of archived days kept, most recent first.
pub const HISTORY_LIMIT: usize = 30;

/// Running completion counters, accrued at rollover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Running total despite the name; never reset on a weekly boundary.
    pub week_completed: u32,
    pub total_completed: u32,
}

/// Snapshot of a finished day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedDay {
    /// Day key of the archived day.
    pub date: String,
    pub main: TaskSet,
    pub overflow: TaskSet,
    /// Main-tier completion percentage at rollover time.
    pub completion_rate: u8,
}

impl ArchivedDay {
    /// Number of completed slots in one bucket of one tier.
    pub fn completed_in(&self, tier: Tier, priority: Priority) -> usize {
        let set = match tier {
            Tier::Main => &self.main,
            Tier::Overflow => &self.overflow,
        };
        set.bucket(priority).iter().filter(|s| s.completed).count()
    }

    /// Whether any overflow slot was completed that day.
    pub fn has_overflow(&self) -> bool {
        self.overflow.any_completed()
    }

    /// Main-tier completions, e.g. `✓ Major · 2 Medium · 3 Small`.
    /// Buckets with nothing done are left out.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.completed_in(Tier::Main, Priority::Major) > 0 {
            parts.push("✓ Major".to_string());
        }
        for (priority, name) in [(Priority::Medium, "Medium"), (Priority::Small, "Small")] {
            let n = self.completed_in(Tier::Main, priority);
            if n > 0 {
                parts.push(format!("{} {}", n, name));
            }
        }
        parts.join(" · ")
    }

    /// Overflow completions, e.g. `+1 Major +2 Med`, when there were any.
    pub fn overflow_summary(&self) -> Option<String> {
        if !self.has_overflow() {
            return None;
        }
        let parts: Vec<String> = [
            (Priority::Major, "Major"),
            (Priority::Medium, "Med"),
            (Priority::Small, "Small"),
        ]
        .into_iter()
        .filter_map(|(priority, name)| {
            let n = self.completed_in(Tier::Overflow, priority);
            (n > 0).then(|| format!("+{} {}", n, name))
        })
        .collect();
        Some(parts.join(" "))
    }
}

/// The persisted root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Day key the task sets belong to.
    pub current_date: String,
    pub main: TaskSet,
    pub overflow: TaskSet,
    pub streak: u32,
    pub last_completion_date: Option<String>,
    /// Most recent first, at most [`HISTORY_LIMIT`] entries.
    pub history: Vec<ArchivedDay>,
    pub stats: Stats,
}

impl AppState {
    /// First-run state for the given day.
    pub fn new(today_key: impl Into<String>) -> Self {
        Self {
            current_date: today_key.into(),
            main: TaskSet::empty(Tier::Main),
            overflow: TaskSet::empty(Tier::Overflow),
            streak: 0,
            last_completion_date: None,
            history: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn tier(&self, tier: Tier) -> &TaskSet {
        match tier {
            Tier::Main => &self.main,
            Tier::Overflow => &self.overflow,
        }
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut TaskSet {
        match tier {
            Tier::Main => &mut self.main,
            Tier::Overflow => &mut self.overflow,
        }
    }

    pub fn slot(&self, addr: SlotAddr) -> &TaskSlot {
        self.tier(addr.tier).slot(addr.priority, addr.index)
    }

    /// Set a slot's text; see [`TaskSet::set_text`].
    pub fn set_text(&mut self, addr: SlotAddr, value: &str) -> bool {
        self.tier_mut(addr.tier)
            .set_text(addr.priority, addr.index, value)
    }

    /// Toggle a slot's completion flag; returns the new value.
    pub fn toggle(&mut self, addr: SlotAddr) -> bool {
        self.tier_mut(addr.tier)
            .toggle_completed(addr.priority, addr.index)
    }

    /// Clear today's main and overflow slots. History, streak and stats stay.
    pub fn reset_day(&mut self) {
        self.main.clear();
        self.overflow.clear();
    }

    /// Prepend an archived day, dropping the oldest past the limit.
    pub fn push_history(&mut self, day: ArchivedDay) {
        self.history.insert(0, day);
        self.history.truncate(HISTORY_LIMIT);
    }
}
