//! Dashboard transactions table
//!
//! Renders the visible page, the range summary and the page selector

use super::super::state::DashboardState;
use super::super::utils::get_status_color;
use crate::dashboard::{PageLink, Pagination, page_window};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState,
};

pub fn render_transactions_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("TRANSACTIONS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let pagination = &state.view.pagination;
    f.render_widget(
        Paragraph::new(range_summary(pagination)).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    if state.view.visible.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions yet",
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Transactions will appear here as they are processed",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(placeholder, chunks[1]);
    } else {
        render_rows(f, chunks[1], state);
    }

    f.render_widget(
        Paragraph::new(page_selector(pagination)).alignment(Alignment::Center),
        chunks[2],
    );
}

fn render_rows(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(["ID", "AMOUNT", "STATUS", "TIME"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.view.visible.iter().map(|transaction| {
        let id_cell = if state.copied_id() == Some(transaction.id.as_str()) {
            Cell::from(Line::from(vec![
                Span::raw(transaction.short_id()),
                Span::styled(" Copied!", Style::default().fg(Color::LightGreen)),
            ]))
        } else {
            Cell::from(transaction.short_id())
        };
        let status_color = get_status_color(transaction.status.category());

        Row::new(vec![
            id_cell,
            Cell::from(transaction.format_amount()),
            Cell::from(transaction.status.to_string().to_uppercase())
                .style(Style::default().fg(status_color)),
            Cell::from(transaction.format_timestamp()).style(Style::default().fg(Color::Gray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected_row()));
    f.render_stateful_widget(table, area, &mut table_state);
}

/// "Showing a-b of n transactions" plus the page position.
fn range_summary(pagination: &Pagination) -> String {
    if pagination.total_items == 0 {
        return format!("No transactions - Page 1 of {}", pagination.total_pages);
    }
    format!(
        "Showing {}-{} of {} transactions - Page {} of {}",
        pagination.start + 1,
        pagination.end,
        pagination.total_items,
        pagination.current_page,
        pagination.total_pages
    )
}

fn page_selector(pagination: &Pagination) -> Line<'static> {
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "< Prev ",
        if pagination.is_first_page() {
            disabled
        } else {
            enabled
        },
    )];
    for link in page_window(pagination.current_page, pagination.total_pages) {
        spans.push(match link {
            PageLink::Page(page) if page == pagination.current_page => Span::styled(
                format!(" [{}] ", page),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            PageLink::Page(page) => Span::styled(format!(" {} ", page), enabled),
            PageLink::Gap => Span::styled(" ... ", disabled),
        });
    }
    spans.push(Span::styled(
        " Next >",
        if pagination.is_last_page() {
            disabled
        } else {
            enabled
        },
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::pagination::compute_pagination;

    #[test]
    fn test_range_summary() {
        assert_eq!(
            range_summary(&compute_pagination(32, 3, 15)),
            "Showing 31-32 of 32 transactions - Page 3 of 3"
        );
        assert_eq!(
            range_summary(&compute_pagination(0, 1, 15)),
            "No transactions - Page 1 of 1"
        );
    }

    #[test]
    fn test_page_selector_marks_current_page() {
        let line = page_selector(&compute_pagination(150, 5, 15));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("[5]"));
        assert!(text.contains("..."));
        assert!(text.starts_with("< Prev"));
        assert!(text.ends_with("Next >"));
    }
}
