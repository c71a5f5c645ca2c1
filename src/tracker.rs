//! The single owner of the task state.
//!
//! A [`Tracker`] holds the [`AppState`] together with the blob store it is
//! persisted to and the clock that decides the current day. Every mutation
//! is written through immediately.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::rollover::{self, RolloverReport};
use crate::slots::SlotAddr;
use crate::state::AppState;
use crate::stats;
use crate::store::{self, BlobStore, StoreError};

pub struct Tracker<S: BlobStore, C: Clock> {
    state: AppState,
    store: S,
    clock: C,
    /// Day key last reported as behind the stored day, so the warning
    /// is logged once rather than on every tick.
    behind_warned: Option<String>,
}

impl<S: BlobStore, C: Clock> Tracker<S, C> {
    /// Load the stored state. Does not run the day check.
    pub fn open(store: S, clock: C) -> Result<Self, StoreError> {
        let state = store::load(&store, &clock.today_key())?;
        debug!(
            "opened state for {} (streak {}, {} archived days)",
            state.current_date,
            state.streak,
            state.history.len()
        );
        Ok(Self {
            state,
            store,
            clock,
            behind_warned: None,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Today's date according to the clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the overflow tier is open. Recomputed on every call.
    pub fn overflow_unlocked(&self) -> bool {
        stats::all_main_tasks_complete(&self.state.main)
    }

    /// Set a slot's text. Returns whether the text changed.
    ///
    /// The change is kept in memory even when persisting fails.
    pub fn set_text(&mut self, addr: SlotAddr, text: &str) -> Result<bool, StoreError> {
        let changed = self.state.set_text(addr, text);
        if !changed {
            return Ok(false);
        }
        debug!("set {} to {:?}", addr, text);
        self.persist()?;
        Ok(true)
    }

    /// Flip a slot's completion flag. Returns the new flag.
    pub fn toggle(&mut self, addr: SlotAddr) -> Result<bool, StoreError> {
        let done = self.state.toggle(addr);
        debug!("{} marked {}", addr, if done { "done" } else { "not done" });
        self.persist()?;
        Ok(done)
    }

    /// Clear today's slots of both tiers.
    pub fn reset_day(&mut self) -> Result<(), StoreError> {
        self.state.reset_day();
        info!("reset day {}", self.state.current_date);
        self.persist()
    }

    /// Roll over to the clock's day if it has moved past the stored one.
    ///
    /// Returns the report when a rollover happened. Persists only then.
    pub fn check_day(&mut self) -> Result<Option<RolloverReport>, StoreError> {
        let today = self.clock.today_key();
        if !rollover::should_roll(&self.state.current_date, &today) {
            if rollover::clock_behind(&self.state.current_date, &today)
                && self.behind_warned.as_deref() != Some(today.as_str())
            {
                warn!(
                    "clock reads {} but state is for {}; day check paused until the clock catches up",
                    today, self.state.current_date
                );
                self.behind_warned = Some(today);
            }
            return Ok(None);
        }
        self.behind_warned = None;

        let (next, report) = rollover::rollover(&self.state, &today);
        self.state = next;
        info!(
            "rolled over {} -> {}: {}% done, streak {}, {} completed, {} carried, {} dropped",
            report.from,
            report.to,
            report.archived_rate,
            report.streak,
            report.completed,
            report.carried,
            report.dropped
        );
        self.persist()?;
        Ok(Some(report))
    }

    fn persist(&self) -> Result<(), StoreError> {
        store::save(&self.store, &self.state).map_err(|e| {
            warn!("failed to save state: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::slots::{Priority, Tier};
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> Tracker<MemoryStore, FixedClock> {
        Tracker::open(MemoryStore::new(), FixedClock::new(date(2026, 10, 19))).unwrap()
    }

    #[test]
    fn test_open_uses_today_for_first_run() {
        let t = tracker();
        assert_eq!(t.state().current_date, "Mon Oct 19 2026");
        assert_eq!(t.store().writes(), 0);
    }

    #[test]
    fn test_each_mutation_persists() {
        let mut t = tracker();
        let addr = SlotAddr::major(Tier::Main);

        assert!(t.set_text(addr, "Ship it").unwrap());
        assert_eq!(t.store().writes(), 1);

        assert!(t.toggle(addr).unwrap());
        assert_eq!(t.store().writes(), 2);

        t.reset_day().unwrap();
        assert_eq!(t.store().writes(), 3);
        assert!(!t.state().slot(addr).has_text());
    }

    #[test]
    fn test_unchanged_text_is_not_written() {
        let mut t = tracker();
        let addr = SlotAddr::new(Tier::Main, Priority::Small, 2);
        t.set_text(addr, "walk").unwrap();
        assert!(!t.set_text(addr, "walk").unwrap());
        assert_eq!(t.store().writes(), 1);
    }

    #[test]
    fn test_check_day_same_day_does_nothing() {
        let mut t = tracker();
        assert_eq!(t.check_day().unwrap(), None);
        assert_eq!(t.store().writes(), 0);
    }

    #[test]
    fn test_check_day_rolls_once() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(date(2026, 10, 19));
        let mut t = Tracker::open(&store, &clock).unwrap();
        t.set_text(SlotAddr::major(Tier::Main), "carry me").unwrap();

        clock.advance_days(1);
        let report = t.check_day().unwrap().unwrap();
        assert_eq!(report.from, "Mon Oct 19 2026");
        assert_eq!(report.to, "Tue Oct 20 2026");
        assert_eq!(report.carried, 1);
        assert_eq!(t.state().main.slot(Priority::Major, 0).rollover_count, 1);

        assert_eq!(t.check_day().unwrap(), None);
        assert_eq!(t.state().history.len(), 1);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_check_day_with_clock_behind_stays_put() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(date(2026, 10, 19));
        let mut t = Tracker::open(&store, &clock).unwrap();
        t.set_text(SlotAddr::major(Tier::Main), "keep").unwrap();

        clock.set(date(2026, 10, 17));
        assert_eq!(t.check_day().unwrap(), None);
        assert_eq!(t.behind_warned.as_deref(), Some("Sat Oct 17 2026"));
        assert_eq!(t.check_day().unwrap(), None);
        assert_eq!(t.state().current_date, "Mon Oct 19 2026");
        assert_eq!(t.state().main.slot(Priority::Major, 0).text, "keep");
        assert_eq!(store.writes(), 1);

        // Back to normal: the next real day rolls over and clears the marker.
        clock.set(date(2026, 10, 20));
        assert!(t.check_day().unwrap().is_some());
        assert_eq!(t.behind_warned, None);
    }

    #[test]
    fn test_failed_write_keeps_change_in_memory() {
        let mut t = tracker();
        t.store().fail_writes(true);
        let addr = SlotAddr::new(Tier::Main, Priority::Medium, 0);

        assert!(t.set_text(addr, "unsaved").is_err());
        assert_eq!(t.state().slot(addr).text, "unsaved");
        assert_eq!(t.store().blob(), None);
    }

    #[test]
    fn test_overflow_unlocked_tracks_main_tier() {
        let mut t = tracker();
        assert!(!t.overflow_unlocked());

        for addr in SlotAddr::all(Tier::Main) {
            t.set_text(addr, &format!("task {}", addr)).unwrap();
            t.toggle(addr).unwrap();
        }
        assert!(t.overflow_unlocked());

        t.set_text(SlotAddr::new(Tier::Main, Priority::Small, 4), "").unwrap();
        assert!(!t.overflow_unlocked());
    }
}
