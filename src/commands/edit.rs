use focus135::color::{self, emoji};
use focus135::config::Config;
use focus135::slots::{SlotAddr, Tier};

use super::{open_and_announce, FocusTracker};
use crate::output;

fn parse_slot(arg: Option<&String>) -> Result<SlotAddr, String> {
    let arg = arg.ok_or("missing SLOT (e.g. major, medium.2, overflow.small.1)")?;
    SlotAddr::parse(arg)
}

/// Overflow slots can only be written once every main slot is done.
fn ensure_writable(tracker: &FocusTracker, addr: SlotAddr) -> Result<(), String> {
    if addr.tier == Tier::Overflow && !tracker.overflow_unlocked() {
        return Err(format!(
            "{} is locked: complete every main task first",
            addr
        ));
    }
    Ok(())
}

/// Set a slot's text. Remaining words are joined; no text clears the slot.
pub fn cmd_set(config: &Config, args: &[String]) -> Result<(), String> {
    let addr = parse_slot(args.first())?;
    let text = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

    let mut tracker = open_and_announce(config)?;
    ensure_writable(&tracker, addr)?;

    let changed = tracker
        .set_text(addr, &text)
        .map_err(|e| format!("failed to save: {}", e))?;
    if !changed {
        println!("{} unchanged", addr);
    }
    println!("{}", output::slot_line(tracker.state(), addr));
    Ok(())
}

/// Toggle a slot's completion flag.
pub fn cmd_toggle(config: &Config, args: &[String]) -> Result<(), String> {
    let addr = parse_slot(args.first())?;

    let mut tracker = open_and_announce(config)?;
    ensure_writable(&tracker, addr)?;

    let was_unlocked = tracker.overflow_unlocked();
    tracker
        .toggle(addr)
        .map_err(|e| format!("failed to save: {}", e))?;
    println!("{}", output::slot_line(tracker.state(), addr));

    if !was_unlocked && tracker.overflow_unlocked() {
        println!(
            "{} {}",
            emoji::PARTY,
            color::success("All main tasks done: overflow mode unlocked")
        );
    }
    Ok(())
}
