//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events, worker
//! snapshots and key presses

use super::state::DashboardState;

use crate::consts::cli_consts::{simulation, ui};
use crate::dashboard::DashboardView;
use crate::workers::core::DashboardCommand;
use crossterm::event::KeyCode;

use std::time::Instant;

/// What the app loop must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Send(DashboardCommand),
    Copy(String),
}

impl DashboardState {
    /// Update the dashboard state with new tick and queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }

        if self
            .copied_at()
            .is_some_and(|at| at.elapsed() >= ui::copy_feedback())
        {
            self.set_copied(None);
        }
    }

    /// Replace the worker snapshot, keeping the row selection on the same page.
    pub fn set_view(&mut self, view: DashboardView) {
        let page_changed = view.pagination.current_page != self.view.pagination.current_page;
        self.view = view;

        if page_changed {
            self.set_selected_row(0);
        } else {
            let last_row = self.view.visible.len().saturating_sub(1);
            self.set_selected_row(self.selected_row().min(last_row));
        }
        if self.view.busy.clearing {
            self.set_confirm_clear(false);
        }

        // A request is answered once the worker's finished counter moves past the
        // value seen when it was sent; counters survive coalesced snapshots.
        if self
            .pending_simulation()
            .is_some_and(|sent_at| self.view.simulations_finished > sent_at)
        {
            self.set_pending_simulation(None);
        }
        if self
            .pending_clear()
            .is_some_and(|sent_at| self.view.clears_finished > sent_at)
        {
            self.set_pending_clear(None);
        }
    }

    /// Release the pending flag of a command the worker never received.
    pub fn cancel_pending(&mut self, command: DashboardCommand) {
        match command {
            DashboardCommand::Simulate { .. } | DashboardCommand::SimulateDirect { .. } => {
                self.set_pending_simulation(None)
            }
            DashboardCommand::Clear => self.set_pending_clear(None),
            _ => {}
        }
    }

    /// Record a successful clipboard copy so the row can show "Copied!".
    pub fn mark_copied(&mut self, id: String) {
        self.set_copied(Some((id, Instant::now())));
    }

    /// Translate a key press into local state changes and an action for the app loop.
    pub fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        if self.confirm_clear() {
            self.set_confirm_clear(false);
            return match code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter
                    if !self.clear_in_progress() =>
                {
                    self.set_pending_clear(Some(self.view.clears_finished));
                    KeyAction::Send(DashboardCommand::Clear)
                }
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Esc if self.controls_visible() => {
                self.set_controls_visible(false);
                KeyAction::None
            }
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Left | KeyCode::Char('h') => KeyAction::Send(DashboardCommand::PreviousPage),
            KeyCode::Right | KeyCode::Char('l') => KeyAction::Send(DashboardCommand::NextPage),
            KeyCode::Home | KeyCode::Char('g') => KeyAction::Send(DashboardCommand::FirstPage),
            KeyCode::End | KeyCode::Char('G') => KeyAction::Send(DashboardCommand::LastPage),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c.to_digit(10).map_or(1, |d| d as usize);
                KeyAction::Send(DashboardCommand::GoToPage(page))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.set_selected_row(self.selected_row().saturating_sub(1));
                KeyAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last_row = self.view.visible.len().saturating_sub(1);
                self.set_selected_row((self.selected_row() + 1).min(last_row));
                KeyAction::None
            }
            KeyCode::Char('y') => match self.selected_transaction() {
                Some(transaction) => KeyAction::Copy(transaction.id.clone()),
                None => KeyAction::None,
            },
            KeyCode::Char('r') => KeyAction::Send(DashboardCommand::Refresh),
            KeyCode::Tab => {
                self.set_controls_visible(!self.controls_visible());
                KeyAction::None
            }
            KeyCode::Char('s') if !self.simulation_in_progress() => {
                self.set_pending_simulation(Some(self.view.simulations_finished));
                KeyAction::Send(DashboardCommand::Simulate {
                    count: self.simulate_count,
                    interval_ms: self.simulate_interval_ms,
                })
            }
            KeyCode::Char('d') if !self.simulation_in_progress() => {
                self.set_pending_simulation(Some(self.view.simulations_finished));
                KeyAction::Send(DashboardCommand::SimulateDirect {
                    count: self.simulate_count,
                })
            }
            KeyCode::Char('c') if !self.clear_in_progress() => {
                self.set_confirm_clear(true);
                KeyAction::None
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.simulate_count = (self.simulate_count + 1).min(simulation::MAX_COUNT);
                KeyAction::None
            }
            KeyCode::Char('-') => {
                self.simulate_count = self
                    .simulate_count
                    .saturating_sub(1)
                    .max(simulation::MIN_COUNT);
                KeyAction::None
            }
            KeyCode::Char(']') => {
                self.simulate_interval_ms = (self.simulate_interval_ms
                    + simulation::INTERVAL_STEP_MS)
                    .min(simulation::MAX_INTERVAL_MS);
                KeyAction::None
            }
            KeyCode::Char('[') => {
                self.simulate_interval_ms = self
                    .simulate_interval_ms
                    .saturating_sub(simulation::INTERVAL_STEP_MS);
                KeyAction::None
            }
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::BusyState;
    use crate::dashboard::pagination::compute_pagination;
    use crate::environment::Environment;
    use crate::events::{Event, EventType};
    use crate::logging::LogLevel;
    use crate::transaction::{Transaction, TransactionStatus};
    use crate::ui::app::UIConfig;
    use std::time::Duration;

    fn state() -> DashboardState {
        DashboardState::new(Environment::Local, UIConfig::new(false, 10, 500, 3_000))
    }

    fn view_on_page(page: usize, rows: usize) -> DashboardView {
        let visible = (0..rows)
            .map(|i| Transaction::new(format!("txn-{}-{}", page, i), 1.0, TransactionStatus::Pending))
            .collect();
        DashboardView {
            visible,
            pagination: compute_pagination(40, page, 15),
            ..DashboardView::default()
        }
    }

    #[test]
    fn test_arrow_keys_map_to_page_commands() {
        let mut state = state();
        assert_eq!(
            state.handle_key(KeyCode::Right),
            KeyAction::Send(DashboardCommand::NextPage)
        );
        assert_eq!(
            state.handle_key(KeyCode::Left),
            KeyAction::Send(DashboardCommand::PreviousPage)
        );
        assert_eq!(
            state.handle_key(KeyCode::End),
            KeyAction::Send(DashboardCommand::LastPage)
        );
        assert_eq!(
            state.handle_key(KeyCode::Char('3')),
            KeyAction::Send(DashboardCommand::GoToPage(3))
        );
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut state = state();
        assert_eq!(state.handle_key(KeyCode::Char('c')), KeyAction::None);
        assert!(state.confirm_clear());

        // Anything but yes cancels
        assert_eq!(state.handle_key(KeyCode::Char('n')), KeyAction::None);
        assert!(!state.confirm_clear());

        state.handle_key(KeyCode::Char('c'));
        assert_eq!(
            state.handle_key(KeyCode::Char('y')),
            KeyAction::Send(DashboardCommand::Clear)
        );
        assert!(!state.confirm_clear());
    }

    #[test]
    fn test_busy_controls_are_ignored() {
        let mut state = state();
        state.set_view(DashboardView {
            busy: BusyState {
                simulating: true,
                clearing: true,
            },
            ..DashboardView::default()
        });

        assert_eq!(state.handle_key(KeyCode::Char('s')), KeyAction::None);
        assert_eq!(state.handle_key(KeyCode::Char('d')), KeyAction::None);
        assert_eq!(state.handle_key(KeyCode::Char('c')), KeyAction::None);
        assert!(!state.confirm_clear());
    }

    #[test]
    fn test_simulate_uses_adjusted_inputs() {
        let mut state = state();
        state.handle_key(KeyCode::Char('+'));
        state.handle_key(KeyCode::Char(']'));
        assert_eq!(
            state.handle_key(KeyCode::Char('s')),
            KeyAction::Send(DashboardCommand::Simulate {
                count: 11,
                interval_ms: 600
            })
        );

        // The simulation finishes before the next one is requested
        state.set_view(DashboardView {
            simulations_finished: 1,
            ..DashboardView::default()
        });

        for _ in 0..50 {
            state.handle_key(KeyCode::Char('-'));
            state.handle_key(KeyCode::Char('['));
        }
        assert_eq!(state.simulate_count, simulation::MIN_COUNT);
        assert_eq!(state.simulate_interval_ms, 0);
        assert_eq!(
            state.handle_key(KeyCode::Char('d')),
            KeyAction::Send(DashboardCommand::SimulateDirect { count: 1 })
        );
    }

    #[test]
    // Repeated presses before the worker answers send a single request.
    fn test_repeated_presses_send_one_request_until_answered() {
        let mut state = state();
        let simulate = DashboardCommand::Simulate {
            count: 10,
            interval_ms: 500,
        };
        assert_eq!(state.handle_key(KeyCode::Char('s')), KeyAction::Send(simulate));
        assert_eq!(state.handle_key(KeyCode::Char('s')), KeyAction::None);
        assert_eq!(state.handle_key(KeyCode::Char('d')), KeyAction::None);

        state.handle_key(KeyCode::Char('c'));
        assert_eq!(
            state.handle_key(KeyCode::Char('y')),
            KeyAction::Send(DashboardCommand::Clear)
        );
        assert_eq!(state.handle_key(KeyCode::Char('c')), KeyAction::None);
        assert!(!state.confirm_clear());
        assert_eq!(state.handle_key(KeyCode::Char('y')), KeyAction::None);

        // Unrelated snapshots (e.g. a poll) do not release the flags
        state.set_view(view_on_page(1, 3));
        assert_eq!(state.handle_key(KeyCode::Char('s')), KeyAction::None);

        // The worker finished both, even though no busy=true snapshot was seen
        state.set_view(DashboardView {
            simulations_finished: 1,
            clears_finished: 1,
            ..DashboardView::default()
        });
        assert_eq!(state.handle_key(KeyCode::Char('s')), KeyAction::Send(simulate));
        state.handle_key(KeyCode::Char('c'));
        assert!(state.confirm_clear());
    }

    #[test]
    fn test_cancel_pending_after_failed_send() {
        let mut state = state();
        let KeyAction::Send(command) = state.handle_key(KeyCode::Char('d')) else {
            panic!("direct simulate should be sent");
        };
        assert!(state.simulation_in_progress());

        state.cancel_pending(command);
        assert!(!state.simulation_in_progress());
    }

    #[test]
    fn test_selection_moves_within_page_and_resets_on_page_change() {
        let mut state = state();
        state.set_view(view_on_page(1, 3));

        for _ in 0..5 {
            state.handle_key(KeyCode::Down);
        }
        assert_eq!(state.selected_row(), 2);
        assert_eq!(
            state.handle_key(KeyCode::Char('y')),
            KeyAction::Copy("txn-1-2".to_string())
        );

        state.set_view(view_on_page(2, 15));
        assert_eq!(state.selected_row(), 0);
    }

    #[test]
    fn test_copy_on_empty_page_does_nothing() {
        let mut state = state();
        assert_eq!(state.handle_key(KeyCode::Char('y')), KeyAction::None);
    }

    #[test]
    fn test_escape_closes_controls_before_quitting() {
        let mut state = state();
        state.handle_key(KeyCode::Tab);
        assert!(state.controls_visible());
        assert_eq!(state.handle_key(KeyCode::Esc), KeyAction::None);
        assert!(!state.controls_visible());
        assert_eq!(state.handle_key(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_update_moves_events_to_activity_log_and_expires_copied_marker() {
        let mut state = state();
        state.add_event(Event::poller_with_level(
            "Fetched 3 transactions".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ));
        state.set_copied(Some((
            "txn-1".to_string(),
            Instant::now() - Duration::from_secs(5),
        )));

        state.update();

        assert_eq!(state.activity_logs.len(), 1);
        assert!(state.pending_events.is_empty());
        assert!(state.copied_id().is_none());
        assert_eq!(state.tick, 1);
    }
}
