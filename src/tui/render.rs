use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{InputMode, TuiApp};
use crate::clock::{long_date, Clock};
use crate::slots::{BadgeLevel, Priority, SlotAddr, Tier};
use crate::state::ArchivedDay;
use crate::stats::completion_rate;
use crate::store::BlobStore;

/// Archived days shown in the archive panel.
const ARCHIVE_ROWS: usize = 10;

/// Padding inside content area (1 cell on each side)
const CONTENT_PADDING: u16 = 1;

/// Draw the board.
pub(super) fn draw_ui<S: BlobStore, C: Clock>(f: &mut Frame, app: &TuiApp<S, C>) {
    let size = f.area();

    f.render_widget(Clear, size);

    let unlocked = app.tracker.overflow_unlocked();
    let mut constraints = vec![
        Constraint::Length(4), // Header + stats
        Constraint::Min(0),    // Rows
    ];
    if app.show_archive {
        constraints.push(Constraint::Length(ARCHIVE_ROWS as u16 * 2 + 2));
    }
    constraints.push(Constraint::Length(2)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    draw_header(f, chunks[0], app, unlocked);
    draw_rows(f, chunks[1], app);
    if app.show_archive {
        draw_archive(f, chunks[2], &app.tracker.state().history);
    }
    draw_footer(f, chunks[chunks.len() - 1], app);

    if app.input_mode == InputMode::ConfirmReset {
        draw_reset_modal(f, size);
    }
}

/// Title, streak and the stats bar.
fn draw_header<S: BlobStore, C: Clock>(f: &mut Frame, area: Rect, app: &TuiApp<S, C>, unlocked: bool) {
    let state = app.tracker.state();
    let streak_style = if state.streak > 0 {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = Line::from(vec![
        Span::styled("Focus", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "135",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  1 Major · 3 Medium · 5 Small", Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(format!("🔥 {} day streak", state.streak), streak_style),
    ]);

    let stats = Line::from(vec![
        Span::styled(
            format!("{}%", completion_rate(&state.main)),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" today   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.stats.week_completed.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" this week   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.stats.total_completed.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" all time", Style::default().fg(Color::DarkGray)),
    ]);

    let banner = if unlocked {
        Line::from(Span::styled(
            "✨ Overflow Mode Unlocked",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("")
    };

    let header = Paragraph::new(vec![title, stats, banner])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(header, area);
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::Major => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Priority::Medium => Style::default().fg(Color::Blue),
        Priority::Small => Style::default().fg(Color::Gray),
    }
}

fn badge_style(level: BadgeLevel) -> Style {
    match level {
        BadgeLevel::Fresh => Style::default().fg(Color::Cyan),
        BadgeLevel::Stale => Style::default().fg(Color::Yellow),
        BadgeLevel::Overdue => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn row_label(addr: SlotAddr) -> String {
    match addr.priority {
        Priority::Major => "Major".to_string(),
        Priority::Medium => format!("Medium {}", addr.index + 1),
        Priority::Small => format!("Small {}", addr.index + 1),
    }
}

/// One line per visible slot, with a tier heading before the overflow rows.
fn draw_rows<S: BlobStore, C: Clock>(f: &mut Frame, area: Rect, app: &TuiApp<S, C>) {
    let state = app.tracker.state();
    let editing = app.input_mode == InputMode::Edit;
    let mut lines: Vec<Line> = Vec::new();

    for (i, addr) in app.rows().into_iter().enumerate() {
        if addr == SlotAddr::major(Tier::Overflow) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Overflow",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
        }

        let slot = state.slot(addr);
        let selected = i == app.selected;
        let marker = if selected { "▶ " } else { "  " };
        let check = if slot.completed { "[✓] " } else { "[ ] " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                check,
                Style::default().fg(if slot.completed { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(format!("{:<9} ", row_label(addr)), priority_style(addr.priority)),
        ];

        if selected && editing {
            spans.push(Span::styled(
                format!("{}_", app.edit_buffer),
                Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED),
            ));
        } else if slot.has_text() {
            let mut style = Style::default().fg(Color::White);
            if slot.completed {
                style = style
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT);
            }
            spans.push(Span::styled(slot.text.clone(), style));
        } else {
            spans.push(Span::styled(
                addr.placeholder(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }

        if let Some(badge) = slot.badge() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("↻ {}", badge.label()), badge_style(badge.level)));
        }

        let mut line = Line::from(spans);
        if selected {
            line = line.style(Style::default().bg(Color::Rgb(30, 30, 40)));
        }
        lines.push(line);
    }

    let title = match app.input_mode {
        InputMode::Edit => " Today [Enter save, Esc cancel] ",
        _ if app.focus_mode => " Today (focus) [↑↓ select, e edit, x done, f show all, a archive, R reset, q quit] ",
        _ => " Today [↑↓ select, e edit, x done, f focus, a archive, R reset, q quit] ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::White));
    f.render_widget(block, area);

    let inner_area = area.inner(Margin {
        horizontal: CONTENT_PADDING + 1,
        vertical: CONTENT_PADDING,
    });
    f.render_widget(Paragraph::new(lines), inner_area);
}

/// Two lines per archived day: date and rate, then the completion breakdown.
pub(super) fn archive_lines(history: &[ArchivedDay]) -> Vec<Line<'static>> {
    if history.is_empty() {
        return vec![Line::from(Span::styled(
            "No past days yet",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for day in history.iter().take(ARCHIVE_ROWS) {
        let mut head = vec![
            Span::styled(format!("{:<16}", day.date), Style::default().fg(Color::White)),
            Span::styled(
                format!("{:>4}%", day.completion_rate),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        let overflow = day.overflow_summary();
        if overflow.is_some() {
            head.push(Span::styled("  +Overflow", Style::default().fg(Color::Magenta)));
        }
        lines.push(Line::from(head));

        let mut detail = vec![Span::styled(
            format!("  {}", day.summary()),
            Style::default().fg(Color::DarkGray),
        )];
        if let Some(extra) = overflow {
            detail.push(Span::styled(format!(" {}", extra), Style::default().fg(Color::Magenta)));
        }
        lines.push(Line::from(detail));
    }
    lines
}

fn draw_archive(f: &mut Frame, area: Rect, history: &[ArchivedDay]) {
    let panel = Paragraph::new(archive_lines(history)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Past Days ")
            .title_style(Style::default().fg(Color::White)),
    );
    f.render_widget(panel, area);
}

/// Long date plus the status line.
fn draw_footer<S: BlobStore, C: Clock>(f: &mut Frame, area: Rect, app: &TuiApp<S, C>) {
    let date = Line::from(Span::styled(
        long_date(app.tracker.today()),
        Style::default().fg(Color::Gray),
    ));
    let status = match app.status {
        Some(ref msg) if msg.starts_with("warning:") => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)))
        }
        Some(ref msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan))),
        None => Line::from(""),
    };
    f.render_widget(
        Paragraph::new(vec![date, status]).alignment(Alignment::Center),
        area,
    );
}

/// Draw the reset confirmation modal.
fn draw_reset_modal(f: &mut Frame, area: Rect) {
    let modal_width = 40u16;
    let modal_height = 7u16;
    let x = (area.width.saturating_sub(modal_width)) / 2;
    let y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(
        x,
        y,
        modal_width.min(area.width),
        modal_height.min(area.height),
    );

    f.render_widget(Clear, modal_area);

    let modal_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Reset all tasks for today?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Streak, stats and archive are kept."),
        Line::from(""),
        Line::from(Span::styled(
            "[Y]es  [N]o",
            Style::default().fg(Color::Cyan),
        )),
    ];

    let modal = Paragraph::new(modal_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Reset? ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );

    f.render_widget(modal, modal_area);
}
