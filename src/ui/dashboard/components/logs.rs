//! Dashboard logs panel component
//!
//! Renders the activity log, newest first

use super::super::state::DashboardState;
use super::super::utils::{format_compact_timestamp, get_worker_color};
use crate::events::{Event as WorkerEvent, EventType, Worker};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn status_icon(event: &WorkerEvent) -> &'static str {
    match (event.event_type, event.log_level) {
        (EventType::Success, _) => "✅",
        (EventType::Error, LogLevel::Warn) => "⚠️",
        (EventType::Error, _) => "❌",
        (EventType::Refresh, _) => "🔄",
        (EventType::Waiting, _) => "⏳",
    }
}

fn worker_tag(worker: Worker) -> &'static str {
    match worker {
        Worker::Poller => "poll",
        Worker::Commands => "cmd",
        Worker::Ui => "ui",
    }
}

/// Render the activity log panel.
pub fn render_logs_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Account for borders and padding
    let log_count = (area.height.saturating_sub(3) as usize).max(1);

    let log_lines: Vec<Line> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let worker_color = get_worker_color(&event.worker);
            Line::from(vec![
                Span::raw(format!("{} ", status_icon(event))),
                Span::styled(
                    format!("{} ", format_compact_timestamp(&event.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<4} ", worker_tag(event.worker)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(event.msg.clone(), Style::default().fg(worker_color)),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Connecting to the payments API...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("ACTIVITY LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        log_paragraph.block(logs_block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::ui::app::UIConfig;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    // Command failures are shown as reported; they are never retried.
    fn test_error_messages_are_shown_verbatim() {
        let mut state = DashboardState::new(
            Environment::Local,
            UIConfig::new(false, 10, 500, 3_000),
        );
        state.add_to_activity_log(WorkerEvent::command_with_level(
            "Simulation failed: request timed out".to_string(),
            EventType::Error,
            LogLevel::Warn,
        ));

        let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
        terminal
            .draw(|f| render_logs_panel(f, f.area(), &state))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(text.contains("Simulation failed: request timed out"));
        assert!(!text.contains("retrying"));
    }
}
