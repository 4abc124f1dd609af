//! Dashboard controls panel and clear confirmation dialog

use super::super::state::DashboardState;
use super::super::utils::centered_rect;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

/// Render the simulation controls. Disabled actions are greyed out.
pub fn render_controls_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::DarkGray);
    let simulating = state.simulation_in_progress();
    let clearing = state.clear_in_progress();

    let simulate_label = if simulating {
        "Simulating...".to_string()
    } else {
        format!("Simulate ({})", state.simulate_count)
    };
    let clear_label = if clearing {
        "Clearing..."
    } else {
        "Clear all"
    };
    let action_style = |disabled: bool| if disabled { muted } else { key };

    let lines = vec![
        Line::from(vec![
            Span::raw("Count:    "),
            Span::styled(state.simulate_count.to_string(), value),
            Span::styled("  [+/-]", muted),
        ]),
        Line::from(vec![
            Span::raw("Interval: "),
            Span::styled(format!("{} ms", state.simulate_interval_ms), value),
            Span::styled("  [[/]]", muted),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[S] ", action_style(simulating)),
            Span::raw(simulate_label),
        ]),
        Line::from(vec![
            Span::styled("[D] ", action_style(simulating)),
            Span::raw(format!("Simulate direct ({})", state.simulate_count)),
        ]),
        Line::from(vec![
            Span::styled("[C] ", action_style(clearing)),
            Span::raw(clear_label),
        ]),
        Line::from(vec![Span::styled("[R] ", key), Span::raw("Refresh now")]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("CONTROLS")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(panel, area);
}

pub fn render_clear_confirmation(f: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(46, 5, area);
    let dialog = Paragraph::new(vec![
        Line::from(Span::styled(
            "Delete ALL transactions?",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Y] Yes    [N] No"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title("CONFIRM")
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::LightRed)),
    );

    f.render_widget(Clear, dialog_area);
    f.render_widget(dialog, dialog_area);
}
