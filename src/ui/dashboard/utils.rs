//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::transaction::StatusCategory;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Poller => Color::Cyan,
        Worker::Commands => Color::Yellow,
        Worker::Ui => Color::Magenta,
    }
}

/// Color used for a transaction status cell and its stat box
pub fn get_status_color(category: StatusCategory) -> Color {
    match category {
        StatusCategory::Success => Color::LightGreen,
        StatusCategory::Failure => Color::LightRed,
        StatusCategory::Pending => Color::LightYellow,
        StatusCategory::Other => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract MM-DD and HH:MM:SS from "YYYY-MM-DD HH:MM:SS"
    let mut parts = timestamp.split(' ');
    let month_day = parts.next().and_then(|date| date.get(5..10));
    let time = parts.next().and_then(|time| time.get(0..8));
    match (month_day, time) {
        (Some(month_day), Some(time)) => format!("{} {}", month_day, time),
        // Fallback to original timestamp if parsing fails
        _ => timestamp.to_string(),
    }
}

/// A rectangle of the given size centered in `area`, used for dialogs
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(
            format_compact_timestamp("2024-03-05 14:07:09"),
            "03-05 14:07:09"
        );
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(40, 5, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 5);
        assert_eq!(rect.x, 30);

        let small = centered_rect(200, 80, area);
        assert_eq!(small, area);
    }
}
