use focus135::color;
use focus135::config::Config;

use super::{open_and_announce, open_tracker};
use crate::output;

/// Run the day check once and report whether it rolled over.
pub fn cmd_check(config: &Config) -> Result<(), String> {
    let (tracker, report) = open_tracker(config)?;
    match report {
        Some(report) => println!("{}", output::rollover_notice(&report)),
        None => println!(
            "Still {}, nothing to roll over",
            color::info(&tracker.state().current_date)
        ),
    }
    Ok(())
}

/// Clear today's main and overflow slots. Needs `--yes`.
pub fn cmd_reset(config: &Config, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("reset clears every task for today; pass --yes to confirm".to_string());
    }

    let mut tracker = open_and_announce(config)?;
    tracker
        .reset_day()
        .map_err(|e| format!("failed to save: {}", e))?;
    let done = format!(
        "Reset {}. Streak, stats and archive kept.",
        tracker.state().current_date
    );
    println!("{}", color::success(&done));
    Ok(())
}
