use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::TuiApp;
use super::render::draw_ui;
use crate::clock::Clock;
use crate::shutdown;
use crate::store::BlobStore;
use crate::ticker::TickerGuard;
use crate::tracker::Tracker;

/// Run the interactive board until the user quits or Ctrl+C is pressed.
///
/// Runs one day check immediately, then one per `check_interval`.
pub fn run_tui<S: BlobStore, C: Clock>(
    tracker: Tracker<S, C>,
    focus_mode: bool,
    check_interval: Duration,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let ticker = TickerGuard::start(tx, check_interval);

    let mut app = TuiApp::new(tracker, rx, focus_mode);
    app.check_day();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;
    info!("board opened");

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    ticker.stop();
    info!("board closed");

    result
}

fn event_loop<S: BlobStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp<S, C>,
) -> io::Result<()> {
    loop {
        app.process_messages();

        terminal.draw(|f| draw_ui(f, app))?;

        // Handle events with a timeout so we can process ticks
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit() || shutdown::requested() {
            return Ok(());
        }
    }
}
