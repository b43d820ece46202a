//! Chorewheel
//!
//! Shared recurring-task tracking: task lists owned by groups of users,
//! categorized tasks with a nominal duration and a recurrence period, and a
//! log of completion events. The scheduling engine derives an overdue-first
//! priority ordering and workload statistics from that data.
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod db;
pub mod engine;
pub mod error;
pub mod format;
pub mod types;
