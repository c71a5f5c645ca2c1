use std::time::Duration;

use focus135::clock::SystemClock;
use focus135::color::{self, emoji};
use focus135::config::Config;
use focus135::shutdown;
use focus135::store::FileStore;
use focus135::tracker::Tracker;
use focus135::tui;

use super::open_and_announce;
use crate::output;

/// Default number of archived days printed by `focus archive`.
const DEFAULT_ARCHIVE_DAYS: usize = 10;

/// Open the interactive board.
pub fn cmd_run(config: &Config) -> Result<(), String> {
    if let Err(e) = shutdown::register_handler() {
        eprintln!("warning: {}", e);
    }

    // The board runs its own first day check so a rollover shows on its status line.
    let store = FileStore::new(&config.state_file);
    let tracker = Tracker::open(store, SystemClock)
        .map_err(|e| format!("failed to open {}: {}", config.state_file.display(), e))?;

    tui::run_tui(
        tracker,
        config.focus_mode,
        Duration::from_secs(config.check_interval_secs),
    )
    .map_err(|e| format!("terminal error: {}", e))
}

/// Print today's board, streak and stats.
pub fn cmd_status(config: &Config) -> Result<(), String> {
    let tracker = open_and_announce(config)?;
    for line in output::board_lines(tracker.state(), tracker.overflow_unlocked(), tracker.today()) {
        println!("{}", line);
    }
    Ok(())
}

/// Print the most recent archived days.
pub fn cmd_archive(config: &Config, args: &[String]) -> Result<(), String> {
    let limit = match args.first() {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| format!("invalid day count '{}'", n))?,
        None => DEFAULT_ARCHIVE_DAYS,
    };

    let tracker = open_and_announce(config)?;
    let history = &tracker.state().history;
    println!(
        "{} {} ({} of {}):",
        emoji::CALENDAR,
        color::label("Past Days"),
        color::number(limit.min(history.len())),
        color::number(history.len())
    );
    for line in output::archive_lines(history, limit) {
        println!("  {}", line);
    }
    Ok(())
}
