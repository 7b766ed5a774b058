//! Plain-text rendering of a viewer frame.

use client_frontend_core::{DisplayFrame, DisplayRow};
use snapshot_protocol::WireState;

/// One line per row, acting rows marked with `>`.
pub fn frame_lines(frame: &DisplayFrame) -> Vec<String> {
    if !frame.running {
        return vec!["No combat in progress".to_string()];
    }

    let mut lines = Vec::with_capacity(frame.rows.len() + 1);
    lines.push(format!("Round {}", frame.round));
    lines.extend(frame.rows.iter().map(|row| row_line(row)));
    lines
}

fn row_line(row: &DisplayRow) -> String {
    let marker = if row.active { '>' } else { ' ' };
    let mut line = format!("{marker} {}", row.display_name);

    if let Some(hp) = row.hp_label() {
        line.push_str(&format!(" [{hp}]"));
    }
    if row.state != WireState::Alive {
        line.push_str(&format!(" ({})", state_label(row.state)));
    }
    if row.effects.concentration {
        line.push_str(" {concentrating}");
    }
    if !row.custom_effects.is_empty() {
        let effects: Vec<String> = row
            .custom_effects
            .iter()
            .map(|(name, duration)| match duration {
                Some(rounds) => format!("{name}:{rounds}"),
                None => name.clone(),
            })
            .collect();
        line.push_str(&format!(" <{}>", effects.join(", ")));
    }
    line
}

fn state_label(state: WireState) -> &'static str {
    match state {
        WireState::Alive => "alive",
        WireState::Unconscious => "unconscious",
        WireState::Dead => "dead",
        WireState::Left => "left",
    }
}
