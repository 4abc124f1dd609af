//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod controls;
pub mod footer;
pub mod header;
pub mod logs;
pub mod stats;
pub mod table;
