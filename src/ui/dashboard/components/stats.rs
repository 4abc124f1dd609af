//! Dashboard stats row
//!
//! Counts over the whole cached list, not just the visible page

use super::super::state::DashboardState;
use super::super::utils::get_status_color;
use crate::transaction::StatusCategory;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_stats(f: &mut Frame, area: Rect, state: &DashboardState) {
    let stats = &state.view.stats;
    let boxes = [
        ("TOTAL", stats.total, Color::Cyan),
        (
            "APPROVED",
            stats.approved,
            get_status_color(StatusCategory::Success),
        ),
        (
            "REJECTED",
            stats.rejected,
            get_status_color(StatusCategory::Failure),
        ),
        (
            "PENDING",
            stats.pending,
            get_status_color(StatusCategory::Pending),
        ),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, color), chunk) in boxes.into_iter().zip(chunks.iter()) {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]);
        let widget = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(widget, *chunk);
    }
}
