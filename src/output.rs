use focus135::clock::long_date;
use focus135::color::{self, emoji};
use focus135::rollover::RolloverReport;
use focus135::slots::{SlotAddr, Tier};
use focus135::state::{AppState, ArchivedDay};
use focus135::stats::completion_rate;

use chrono::NaiveDate;

/// Lines for one slot: `medium.2  [x] text  [2 days]`.
pub(crate) fn slot_line(state: &AppState, addr: SlotAddr) -> String {
    let slot = state.slot(addr);
    let mark = if slot.completed { emoji::CHECK } else { emoji::EMPTY };
    let name = color::priority(addr.priority, &format!("{:<18}", addr.to_string()));
    let text = if !slot.has_text() {
        color::dim(&addr.placeholder())
    } else if slot.completed {
        color::done(&slot.text)
    } else {
        slot.text.clone()
    };
    let badge = slot
        .badge()
        .map(|b| format!("  {}", color::badge(b.level, &b.label())))
        .unwrap_or_default();
    format!("  {} {} {}{}", mark, name, text, badge)
}

/// The whole board as printed by `focus status`.
pub(crate) fn board_lines(state: &AppState, unlocked: bool, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {}  {} {} day streak",
            emoji::CALENDAR,
            color::label(&long_date(today)),
            emoji::FIRE,
            color::number(state.streak)
        ),
        format!(
            "  Today {}%   This week {}   All time {}",
            color::number(completion_rate(&state.main)),
            color::number(state.stats.week_completed),
            color::number(state.stats.total_completed)
        ),
        String::new(),
    ];

    for addr in SlotAddr::all(Tier::Main) {
        lines.push(slot_line(state, addr));
    }

    if unlocked {
        lines.push(String::new());
        lines.push(format!("{} {}", emoji::SPARKLES, color::overflow("Overflow Mode Unlocked")));
        for addr in SlotAddr::all(Tier::Overflow) {
            lines.push(slot_line(state, addr));
        }
    }

    lines
}

/// Archive listing, most recent first.
pub(crate) fn archive_lines(history: &[ArchivedDay], limit: usize) -> Vec<String> {
    if history.is_empty() {
        return vec![color::dim("No past days yet")];
    }

    let mut lines = Vec::new();
    for day in history.iter().take(limit) {
        let overflow = day.overflow_summary();
        let marker = if overflow.is_some() {
            format!("  {}", color::overflow("+Overflow"))
        } else {
            String::new()
        };
        lines.push(format!(
            "{:<16} {:>4}%{}",
            day.date,
            day.completion_rate,
            marker
        ));

        let mut detail = day.summary();
        if let Some(extra) = overflow {
            if !detail.is_empty() {
                detail.push(' ');
            }
            detail.push_str(&extra);
        }
        if !detail.is_empty() {
            lines.push(format!("  {}", color::dim(&detail)));
        }
    }
    lines
}

/// One-line notice after a rollover.
pub(crate) fn rollover_notice(report: &RolloverReport) -> String {
    let mut notice = format!(
        "{} New day {}: archived {} at {}%, streak {}, {} task(s) carried over",
        emoji::CLOCK,
        color::info(&report.to),
        report.from,
        report.archived_rate,
        report.streak,
        report.carried
    );
    if report.dropped > 0 {
        notice.push_str(&format!(
            ", {}",
            color::warning(&format!("{} dropped (no free slot)", report.dropped))
        ));
    }
    notice
}
