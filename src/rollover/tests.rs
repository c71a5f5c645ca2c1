use super::*;
use crate::slots::SlotAddr;
use crate::state::{Stats, HISTORY_LIMIT};

const DAY1: &str = "Mon Oct 19 2026";
const DAY2: &str = "Tue Oct 20 2026";

fn task(text: &str, priority: Priority, rollover_count: u32) -> HarvestedTask {
    HarvestedTask {
        text: text.to_string(),
        priority,
        rollover_count,
    }
}

fn set_slot(state: &mut AppState, addr: SlotAddr, text: &str, done: bool) {
    state.set_text(addr, text);
    if done != state.slot(addr).completed {
        state.toggle(addr);
    }
}

fn main_addr(priority: Priority, index: usize) -> SlotAddr {
    SlotAddr::new(Tier::Main, priority, index)
}

fn overflow_addr(priority: Priority, index: usize) -> SlotAddr {
    SlotAddr::new(Tier::Overflow, priority, index)
}

#[test]
fn test_should_roll_only_forward() {
    assert!(!should_roll(DAY1, DAY1));
    assert!(should_roll(DAY1, DAY2));
    assert!(!should_roll(DAY2, DAY1));
    assert!(should_roll(DAY1, "Sat Oct 24 2026"));
}

#[test]
fn test_clock_behind_needs_both_dates() {
    assert!(clock_behind(DAY2, DAY1));
    assert!(!clock_behind(DAY1, DAY1));
    assert!(!clock_behind(DAY1, DAY2));
    assert!(!clock_behind("garbage", DAY1));
    assert!(!clock_behind(DAY2, "garbage"));
}

#[test]
fn test_should_roll_unparseable_falls_back_to_inequality() {
    assert!(should_roll("10/19/2026 (legacy)", DAY1));
    assert!(!should_roll("garbage", "garbage"));
}

#[test]
fn test_streak_extends_from_yesterday() {
    let (streak, last) = next_streak(4, Some("Sun Oct 18 2026"), DAY1, true);
    assert_eq!(streak, 5);
    assert_eq!(last.as_deref(), Some(DAY1));
}

#[test]
fn test_streak_restarts_after_gap() {
    let (streak, last) = next_streak(9, Some("Wed Oct 14 2026"), DAY1, true);
    assert_eq!(streak, 1);
    assert_eq!(last.as_deref(), Some(DAY1));
}

#[test]
fn test_streak_starts_without_previous_completion() {
    let (streak, _) = next_streak(0, None, DAY1, true);
    assert_eq!(streak, 1);
}

#[test]
fn test_streak_breaks_without_completions() {
    let (streak, last) = next_streak(7, Some("Sun Oct 18 2026"), DAY1, false);
    assert_eq!(streak, 0);
    assert_eq!(last.as_deref(), Some("Sun Oct 18 2026"));
}

#[test]
fn test_streak_unparseable_last_date_restarts() {
    let (streak, _) = next_streak(3, Some("not a date"), DAY1, true);
    assert_eq!(streak, 1);
}

#[test]
fn test_harvest_order_and_counts() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Small, 1), "main small", false);
    set_slot(&mut state, main_addr(Priority::Major, 0), "main major", false);
    set_slot(&mut state, main_addr(Priority::Medium, 2), "main medium", false);
    set_slot(&mut state, overflow_addr(Priority::Major, 0), "bonus major", false);
    set_slot(&mut state, overflow_addr(Priority::Small, 2), "bonus small", false);
    state.main.place(
        Priority::Medium,
        0,
        TaskSlot::carried("old medium", 2),
    );

    let harvested = harvest(&state.main, &state.overflow);
    assert_eq!(
        harvested,
        vec![
            task("main major", Priority::Major, 1),
            task("old medium", Priority::Medium, 3),
            task("main medium", Priority::Medium, 1),
            task("main small", Priority::Small, 1),
            task("bonus major", Priority::Major, 1),
            task("bonus small", Priority::Small, 1),
        ]
    );
}

#[test]
fn test_harvest_skips_completed_and_blank() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Major, 0), "done", true);
    set_slot(&mut state, main_addr(Priority::Medium, 0), "   ", false);
    set_slot(&mut state, main_addr(Priority::Small, 0), "", true);
    assert!(harvest(&state.main, &state.overflow).is_empty());
}

#[test]
fn test_reseed_second_major_spills_into_first_medium() {
    let harvested = vec![
        task("A", Priority::Major, 1),
        task("B", Priority::Medium, 2),
        task("C", Priority::Medium, 1),
        task("D", Priority::Major, 4),
        task("E", Priority::Medium, 1),
    ];
    let (set, dropped) = reseed(&harvested);

    assert_eq!(set.slot(Priority::Major, 0), &TaskSlot::carried("A", 1));
    assert_eq!(set.slot(Priority::Medium, 0), &TaskSlot::carried("D", 4));
    // The first medium task loses its slot to the spilled major.
    assert_eq!(set.slot(Priority::Medium, 1), &TaskSlot::carried("C", 1));
    assert_eq!(set.slot(Priority::Medium, 2), &TaskSlot::carried("E", 1));
    assert_eq!(dropped, 1);
}

#[test]
fn test_reseed_third_major_is_dropped() {
    let harvested = vec![
        task("A", Priority::Major, 1),
        task("B", Priority::Major, 1),
        task("C", Priority::Major, 1),
    ];
    let (set, dropped) = reseed(&harvested);
    assert_eq!(set.slot(Priority::Major, 0).text, "A");
    assert_eq!(set.slot(Priority::Medium, 0).text, "B");
    assert_eq!(set.slot(Priority::Medium, 1), &TaskSlot::default());
    assert_eq!(dropped, 1);
}

#[test]
fn test_reseed_caps_small_tasks_at_five() {
    let harvested: Vec<HarvestedTask> = (1..=7)
        .map(|i| task(&format!("s{}", i), Priority::Small, 1))
        .collect();
    let (set, dropped) = reseed(&harvested);

    let texts: Vec<&str> = set
        .bucket(Priority::Small)
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(texts, vec!["s1", "s2", "s3", "s4", "s5"]);
    assert_eq!(dropped, 2);
    assert!(set.slots().all(|(_, _, s)| s.text != "s6" && s.text != "s7"));
    assert_eq!(set.slot(Priority::Major, 0), &TaskSlot::default());
}

#[test]
fn test_reseed_empty_slots_have_zero_count() {
    let (set, dropped) = reseed(&[task("only", Priority::Small, 3)]);
    assert_eq!(dropped, 0);
    for (priority, index, slot) in set.slots() {
        if priority == Priority::Small && index == 0 {
            assert_eq!(slot, &TaskSlot::carried("only", 3));
        } else {
            assert_eq!(slot, &TaskSlot::default());
        }
    }
}

#[test]
fn test_rollover_medium_scenario() {
    // Day 1: major done, medium ["B", "", "C"] with only C done.
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Major, 0), "A", true);
    set_slot(&mut state, main_addr(Priority::Medium, 0), "B", false);
    set_slot(&mut state, main_addr(Priority::Medium, 2), "C", true);

    let (next, report) = rollover(&state, DAY2);

    assert_eq!(next.main.slot(Priority::Major, 0), &TaskSlot::default());
    assert_eq!(next.main.slot(Priority::Medium, 0), &TaskSlot::carried("B", 1));
    assert_eq!(next.main.slot(Priority::Medium, 1), &TaskSlot::default());
    assert_eq!(next.main.slot(Priority::Medium, 2), &TaskSlot::default());
    assert_eq!(next.current_date, DAY2);
    assert_eq!(report.carried, 1);
    assert_eq!(report.dropped, 0);
}

#[test]
fn test_rollover_archives_outgoing_day() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Major, 0), "Ship", true);
    set_slot(&mut state, main_addr(Priority::Small, 4), "Email", false);
    state.main.place(Priority::Small, 3, TaskSlot::carried("Old", 5));
    set_slot(&mut state, overflow_addr(Priority::Medium, 1), "Bonus", true);

    let (next, report) = rollover(&state, DAY2);

    assert_eq!(next.history.len(), 1);
    let day = &next.history[0];
    assert_eq!(day.date, DAY1);
    assert_eq!(day.completion_rate, 11);
    assert_eq!(report.archived_rate, 11);
    assert_eq!(day.main.slot(Priority::Major, 0).text, "Ship");
    assert!(day.main.slot(Priority::Major, 0).completed);
    assert_eq!(day.main.slot(Priority::Small, 3).rollover_count, 0);
    assert!(day.overflow.slot(Priority::Medium, 1).completed);
    assert!(day.has_overflow());
}

#[test]
fn test_rollover_accrues_both_tiers_into_stats() {
    let mut state = AppState::new(DAY1);
    state.stats = Stats {
        week_completed: 10,
        total_completed: 100,
    };
    set_slot(&mut state, main_addr(Priority::Major, 0), "A", true);
    set_slot(&mut state, main_addr(Priority::Medium, 1), "B", true);
    set_slot(&mut state, overflow_addr(Priority::Small, 0), "C", true);
    // An empty slot marked done still counts.
    state.toggle(overflow_addr(Priority::Small, 2));

    let (next, report) = rollover(&state, DAY2);
    assert_eq!(report.completed, 4);
    assert_eq!(next.stats.week_completed, 14);
    assert_eq!(next.stats.total_completed, 104);
}

#[test]
fn test_rollover_clears_overflow_and_completion() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Medium, 0), "M", false);
    set_slot(&mut state, overflow_addr(Priority::Major, 0), "X", false);
    set_slot(&mut state, overflow_addr(Priority::Small, 1), "Y", true);

    let (next, _) = rollover(&state, DAY2);
    assert_eq!(next.overflow, TaskSet::empty(Tier::Overflow));
    assert_eq!(next.main.completed_count(), 0);
    // The overflow major lands in the main major slot.
    assert_eq!(next.main.slot(Priority::Major, 0), &TaskSlot::carried("X", 1));
    assert_eq!(next.main.slot(Priority::Medium, 0), &TaskSlot::carried("M", 1));
}

#[test]
fn test_rollover_streak_uses_main_tier_only() {
    let mut state = AppState::new(DAY1);
    state.streak = 3;
    state.last_completion_date = Some("Sun Oct 18 2026".to_string());
    set_slot(&mut state, overflow_addr(Priority::Major, 0), "bonus", true);

    let (next, report) = rollover(&state, DAY2);
    assert_eq!(next.streak, 0);
    assert_eq!(report.streak, 0);
    assert_eq!(next.last_completion_date.as_deref(), Some("Sun Oct 18 2026"));
}

#[test]
fn test_rollover_streak_over_consecutive_days() {
    let mut state = AppState::new(DAY1);
    state.streak = 2;
    state.last_completion_date = Some("Sun Oct 18 2026".to_string());
    set_slot(&mut state, main_addr(Priority::Small, 0), "walk", true);

    let (next, _) = rollover(&state, DAY2);
    assert_eq!(next.streak, 3);
    assert_eq!(next.last_completion_date.as_deref(), Some(DAY1));
}

#[test]
fn test_rollover_history_is_capped() {
    let mut state = AppState::new(DAY1);
    for i in 0..HISTORY_LIMIT {
        state.push_history(ArchivedDay {
            date: format!("old-{}", i),
            main: TaskSet::empty(Tier::Main),
            overflow: TaskSet::empty(Tier::Overflow),
            completion_rate: 0,
        });
    }
    let (next, _) = rollover(&state, DAY2);
    assert_eq!(next.history.len(), HISTORY_LIMIT);
    assert_eq!(next.history[0].date, DAY1);
    assert_eq!(next.history[1].date, format!("old-{}", HISTORY_LIMIT - 1));
    assert!(next.history.iter().all(|d| d.date != "old-0"));
}

#[test]
fn test_rollover_counts_accumulate_across_days() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Major, 0), "Taxes", false);

    let (day2, _) = rollover(&state, DAY2);
    let (day3, _) = rollover(&day2, "Wed Oct 21 2026");
    let (day4, _) = rollover(&day3, "Thu Oct 22 2026");
    assert_eq!(day4.main.slot(Priority::Major, 0), &TaskSlot::carried("Taxes", 3));
    assert_eq!(day4.history.len(), 3);
}

#[test]
fn test_rollover_does_not_touch_input() {
    let mut state = AppState::new(DAY1);
    set_slot(&mut state, main_addr(Priority::Major, 0), "A", false);
    let before = state.clone();
    let _ = rollover(&state, DAY2);
    assert_eq!(state, before);
}
