//! Dashboard main renderer

use super::components::{controls, footer, header, logs, stats, table};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let error_height = if state.view.last_error.is_some() { 3 } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    stats::render_stats(f, main_chunks[1], state);
    if let Some(error) = &state.view.last_error {
        render_error_banner(f, main_chunks[2], error);
    }

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[3]);

    table::render_transactions_table(f, content_chunks[0], state);

    if state.controls_visible() {
        let side_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Fill(1)])
            .split(content_chunks[1]);
        controls::render_controls_panel(f, side_chunks[0], state);
        logs::render_logs_panel(f, side_chunks[1], state);
    } else {
        logs::render_logs_panel(f, content_chunks[1], state);
    }

    footer::render_footer(f, main_chunks[4]);

    if state.confirm_clear() {
        controls::render_clear_confirmation(f, f.area());
    }
}

fn render_error_banner(f: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(
            "ERROR ",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(error.to_string(), Style::default().fg(Color::LightRed)),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightRed)),
    );
    f.render_widget(banner, area);
}
