//! Plain-text rendering of desktop state for the headless shell.

use chat_session::{StreamOutcome, StreamState};
use webtop::{TaskbarEntry, WindowRecord};

/// One line per window, bottom of the stack first.
pub fn stacking_lines(stack: &[&WindowRecord]) -> Vec<String> {
    stack
        .iter()
        .map(|window| {
            let bounds = window.bounds();
            let mut line = format!(
                "z={:<3} {:<14} {:<16} {:>6.0}x{:<6.0} @ ({:.0}, {:.0})",
                window.z_index,
                window.app_kind,
                window.title,
                bounds.size.width,
                bounds.size.height,
                bounds.position.x,
                bounds.position.y,
            );
            if window.is_minimized {
                line.push_str(" [minimized]");
            }
            if window.is_maximized {
                line.push_str(" [maximized]");
            }
            line
        })
        .collect()
}

pub fn taskbar_line(entries: &[TaskbarEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            if entry.is_active {
                format!("[{}]", entry.title)
            } else if entry.is_minimized {
                format!("({})", entry.title)
            } else {
                entry.title.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn outcome_line(outcome: &StreamOutcome, state: &StreamState) -> String {
    match outcome {
        StreamOutcome::Completed => format!("reply: {}", state.current_message),
        StreamOutcome::Errored(message) => format!("error: {message}"),
        StreamOutcome::Aborted => format!("stopped after: {}", state.current_message),
    }
}
