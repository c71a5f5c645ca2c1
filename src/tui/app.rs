use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

use super::message::TuiMessage;
use crate::clock::Clock;
use crate::slots::{Priority, SlotAddr, Tier};
use crate::store::{BlobStore, StoreError};
use crate::tracker::Tracker;

/// Input mode for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InputMode {
    /// Normal mode - navigation and commands
    Normal,
    /// Editing the selected slot's text
    Edit,
    /// Reset confirmation modal is showing
    ConfirmReset,
}

/// Slots shown on the board, top to bottom.
///
/// Overflow rows appear only while unlocked; focus mode keeps just the
/// major row of each tier.
pub fn visible_rows(overflow_unlocked: bool, focus_mode: bool) -> Vec<SlotAddr> {
    let tiers: &[Tier] = if overflow_unlocked {
        &[Tier::Main, Tier::Overflow]
    } else {
        &[Tier::Main]
    };
    tiers
        .iter()
        .flat_map(|&tier| SlotAddr::all(tier))
        .filter(|addr| !focus_mode || addr.priority == Priority::Major)
        .collect()
}

/// Board application state
pub struct TuiApp<S: BlobStore, C: Clock> {
    pub(super) tracker: Tracker<S, C>,
    /// Channel receiver for ticks
    rx: Receiver<TuiMessage>,
    /// Index into the visible rows
    pub(super) selected: usize,
    pub(super) input_mode: InputMode,
    /// Text being edited
    pub(super) edit_buffer: String,
    /// Hide medium and small rows
    pub(super) focus_mode: bool,
    pub(super) show_archive: bool,
    /// Last notice for the status line
    pub(super) status: Option<String>,
    /// Whether the user asked to quit
    pub(super) should_quit: bool,
}

impl<S: BlobStore, C: Clock> TuiApp<S, C> {
    /// Create a board over a tracker with a tick receiver.
    pub fn new(tracker: Tracker<S, C>, rx: Receiver<TuiMessage>, focus_mode: bool) -> Self {
        Self {
            tracker,
            rx,
            selected: 0,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            focus_mode,
            show_archive: false,
            status: None,
            should_quit: false,
        }
    }

    pub fn tracker(&self) -> &Tracker<S, C> {
        &self.tracker
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Rows currently on screen.
    pub fn rows(&self) -> Vec<SlotAddr> {
        visible_rows(self.tracker.overflow_unlocked(), self.focus_mode)
    }

    /// The slot under the cursor.
    pub fn selected_addr(&self) -> Option<SlotAddr> {
        self.rows().get(self.selected).copied()
    }

    /// Process any pending messages from the channel.
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                TuiMessage::Tick => self.check_day(),
            }
        }
    }

    /// Run the day check and note a rollover on the status line.
    pub fn check_day(&mut self) {
        match self.tracker.check_day() {
            Ok(Some(report)) => {
                let mut notice = format!(
                    "New day: {} task(s) carried over from {}",
                    report.carried, report.from
                );
                if report.dropped > 0 {
                    notice.push_str(&format!(", {} dropped", report.dropped));
                }
                self.status = Some(notice);
                if self.input_mode == InputMode::Edit {
                    self.input_mode = InputMode::Normal;
                    self.edit_buffer.clear();
                }
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
        self.clamp_selection();
    }

    fn report(&mut self, e: StoreError) {
        warn!("board: {}", e);
        self.status = Some(format!("warning: {}", e));
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(len - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    fn start_edit(&mut self) {
        if let Some(addr) = self.selected_addr() {
            self.edit_buffer = self.tracker.state().slot(addr).text.clone();
            self.input_mode = InputMode::Edit;
        }
    }

    fn commit_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        let text = std::mem::take(&mut self.edit_buffer);
        if let Some(addr) = self.selected_addr() {
            if let Err(e) = self.tracker.set_text(addr, &text) {
                self.report(e);
            }
        }
        self.clamp_selection();
    }

    fn toggle_selected(&mut self) {
        if let Some(addr) = self.selected_addr() {
            if let Err(e) = self.tracker.toggle(addr) {
                self.report(e);
            }
        }
        self.clamp_selection();
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::ConfirmReset => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.input_mode = InputMode::Normal;
                    match self.tracker.reset_day() {
                        Ok(()) => self.status = Some("Day reset".to_string()),
                        Err(e) => self.report(e),
                    }
                    self.clamp_selection();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                }
                _ => {}
            },
            InputMode::Edit => match key {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    self.edit_buffer.clear();
                }
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Backspace => {
                    self.edit_buffer.pop();
                }
                KeyCode::Char(c) => self.edit_buffer.push(c),
                _ => {}
            },
            InputMode::Normal => match key {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
                KeyCode::Enter | KeyCode::Char('e') => self.start_edit(),
                KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
                KeyCode::Char('f') => {
                    self.focus_mode = !self.focus_mode;
                    self.clamp_selection();
                }
                KeyCode::Char('a') => self.show_archive = !self.show_archive,
                KeyCode::Char('R') => self.input_mode = InputMode::ConfirmReset,
                KeyCode::Esc => self.status = None,
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::NaiveDate;

    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    type App<'a> = TuiApp<&'a MemoryStore, &'a FixedClock>;

    fn board<'a>(store: &'a MemoryStore, clock: &'a FixedClock) -> (App<'a>, mpsc::Sender<TuiMessage>) {
        let (tx, rx) = mpsc::channel();
        let tracker = Tracker::open(store, clock).unwrap();
        (TuiApp::new(tracker, rx, false), tx)
    }

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn press(app: &mut App<'_>, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key, KeyModifiers::NONE);
        }
    }

    fn type_text(app: &mut App<'_>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_visible_rows_locked() {
        let rows = visible_rows(false, false);
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(|a| a.tier == Tier::Main));
    }

    #[test]
    fn test_visible_rows_unlocked() {
        let rows = visible_rows(true, false);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[9], SlotAddr::major(Tier::Overflow));
    }

    #[test]
    fn test_visible_rows_focus_mode() {
        assert_eq!(visible_rows(false, true), vec![SlotAddr::major(Tier::Main)]);
        assert_eq!(
            visible_rows(true, true),
            vec![SlotAddr::major(Tier::Main), SlotAddr::major(Tier::Overflow)]
        );
    }

    #[test]
    fn test_edit_commit_and_cancel() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Down, KeyCode::Char('e')]);
        assert_eq!(app.input_mode, InputMode::Edit);
        type_text(&mut app, "Review PR");
        press(&mut app, &[KeyCode::Enter]);

        let addr = SlotAddr::new(Tier::Main, Priority::Medium, 0);
        assert_eq!(app.tracker().state().slot(addr).text, "Review PR");
        assert_eq!(store.writes(), 1);

        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, " later");
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.tracker().state().slot(addr).text, "Review PR");
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_keys_in_edit_mode_are_text() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "quick fix");
        press(&mut app, &[KeyCode::Enter]);

        assert!(!app.should_quit());
        assert_eq!(
            app.tracker().state().slot(SlotAddr::major(Tier::Main)).text,
            "quick fix"
        );
    }

    #[test]
    fn test_toggle_selected() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Char('x')]);
        assert!(app.tracker().state().slot(SlotAddr::major(Tier::Main)).completed);
        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(!app.tracker().state().slot(SlotAddr::major(Tier::Main)).completed);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.selected, 0);
        for _ in 0..20 {
            press(&mut app, &[KeyCode::Char('j')]);
        }
        assert_eq!(app.selected, 8);

        press(&mut app, &[KeyCode::Char('f')]);
        assert_eq!(app.selected, 0);
        assert_eq!(app.rows().len(), 1);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "keep me");
        press(&mut app, &[KeyCode::Enter]);

        press(&mut app, &[KeyCode::Char('R'), KeyCode::Char('n')]);
        assert!(app.tracker().state().slot(SlotAddr::major(Tier::Main)).has_text());

        press(&mut app, &[KeyCode::Char('R'), KeyCode::Char('y')]);
        assert!(!app.tracker().state().slot(SlotAddr::major(Tier::Main)).has_text());
        assert_eq!(app.status.as_deref(), Some("Day reset"));
    }

    #[test]
    fn test_tick_rolls_over_and_reports() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, tx) = board(&store, &clock);

        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "carry");
        press(&mut app, &[KeyCode::Enter]);

        clock.advance_days(1);
        tx.send(TuiMessage::Tick).unwrap();
        app.process_messages();

        assert_eq!(app.tracker().state().current_date, "Tue Oct 20 2026");
        let status = app.status.clone().unwrap();
        assert!(status.contains("1 task(s) carried"), "got {}", status);
    }

    #[test]
    fn test_storage_failure_shows_warning() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        store.fail_writes(true);
        press(&mut app, &[KeyCode::Char('x')]);

        assert!(app.tracker().state().slot(SlotAddr::major(Tier::Main)).completed);
        assert!(app.status.as_deref().unwrap().starts_with("warning:"));
    }

    #[test]
    fn test_overflow_rows_follow_unlock() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, _tx) = board(&store, &clock);

        for i in 0..9 {
            press(&mut app, &[KeyCode::Enter]);
            type_text(&mut app, &format!("t{}", i));
            press(&mut app, &[KeyCode::Enter, KeyCode::Char('x'), KeyCode::Down]);
        }
        assert!(app.tracker().overflow_unlocked());
        assert_eq!(app.rows().len(), 15);

        // Select the last overflow row, then relock by untoggling a main slot.
        for _ in 0..10 {
            press(&mut app, &[KeyCode::Down]);
        }
        assert_eq!(app.selected, 14);
        app.tracker.toggle(SlotAddr::major(Tier::Main)).unwrap();
        app.clamp_selection();
        assert_eq!(app.selected, 8);
    }

    #[test]
    fn test_quit_keys() {
        let store = MemoryStore::new();
        let clock = clock();
        let (mut app, tx) = board(&store, &clock);
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_quit());

        let (mut app2, _tx2) = board(&store, &clock);
        app2.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app2.should_quit());

        drop(tx);
    }
}
