pub mod board;
pub mod day;
pub mod edit;

pub use board::{cmd_archive, cmd_run, cmd_status};
pub use day::{cmd_check, cmd_reset};
pub use edit::{cmd_set, cmd_toggle};

use focus135::clock::SystemClock;
use focus135::config::Config;
use focus135::rollover::RolloverReport;
use focus135::store::FileStore;
use focus135::tracker::Tracker;

use crate::output;

pub(crate) type FocusTracker = Tracker<FileStore, SystemClock>;

/// Open the state file and run the day check, the way the board does on start.
pub(crate) fn open_tracker(config: &Config) -> Result<(FocusTracker, Option<RolloverReport>), String> {
    let store = FileStore::new(&config.state_file);
    let mut tracker = Tracker::open(store, SystemClock)
        .map_err(|e| format!("failed to open {}: {}", config.state_file.display(), e))?;
    let report = tracker
        .check_day()
        .map_err(|e| format!("day check failed: {}", e))?;
    Ok((tracker, report))
}

/// Open the tracker and print a notice if the day rolled over.
pub(crate) fn open_and_announce(config: &Config) -> Result<FocusTracker, String> {
    let (tracker, report) = open_tracker(config)?;
    if let Some(ref report) = report {
        println!("{}", output::rollover_notice(report));
    }
    Ok(tracker)
}
