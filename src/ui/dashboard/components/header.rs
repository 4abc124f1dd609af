//! Dashboard header component
//!
//! Renders the title and refresh gauge

use super::super::state::DashboardState;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use std::time::Duration;

/// Render header with title and refresh/activity progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title_text = format!(
        "PAYMENTS DASHBOARD v{}  -  {}",
        version,
        state.environment.api_url()
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = gauge_status(state);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

/// Busy requests take priority over the refresh countdown.
fn gauge_status(state: &DashboardState) -> (String, Color, u16) {
    // Animated gauge - loops every 20 ticks
    let animated = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;

    if state.clear_in_progress() {
        return (
            "CLEARING - Deleting all transactions".to_string(),
            Color::LightRed,
            animated,
        );
    }
    if state.simulation_in_progress() {
        return (
            "SIMULATING - Generating transactions".to_string(),
            Color::LightGreen,
            animated,
        );
    }

    let Some(last_attempt) = state.view.last_attempt else {
        return (
            "CONNECTING - Waiting for the first response".to_string(),
            Color::LightBlue,
            animated,
        );
    };

    // Polls run on a fixed schedule whether or not the last one succeeded
    let (remaining_secs, progress) =
        refresh_countdown(last_attempt, Local::now(), state.poll_interval);
    let last_update = state
        .view
        .last_refreshed
        .map_or_else(|| "never".to_string(), |at| at.format("%H:%M:%S").to_string());

    if state.view.last_error.is_some() {
        return (
            format!(
                "OFFLINE - Last update {} - next attempt in {}s",
                last_update, remaining_secs
            ),
            Color::LightYellow,
            progress,
        );
    }
    (
        format!(
            "LIVE - Updated {} - next refresh in {}s",
            last_update, remaining_secs
        ),
        Color::LightBlue,
        progress,
    )
}

/// Seconds until the next poll and the share of the interval already elapsed.
fn refresh_countdown(
    last_attempt: DateTime<Local>,
    now: DateTime<Local>,
    poll_interval: Duration,
) -> (u64, u16) {
    let interval_ms = poll_interval.as_millis().max(1) as i64;
    let elapsed_ms = (now - last_attempt)
        .num_milliseconds()
        .clamp(0, interval_ms);
    let remaining_secs = ((interval_ms - elapsed_ms) as f64 / 1000.0).ceil() as u64;
    let progress = (elapsed_ms * 100 / interval_ms) as u16;
    (remaining_secs, progress.min(100))
}
