//! Dashboard logic independent of rendering
//!
//! Pagination math and the controller that keeps it in sync with the API.

pub mod controller;
pub mod pagination;

pub use controller::{BusyState, DashboardController, DashboardView};
pub use pagination::{PageLink, Pagination, page_window};
