//! Taskboard: a team-scoped Kanban task board core.
//!
//! The crate keeps per-column task positions consistent under concurrent
//! moves, edits and creations, and derives the completion timestamp and
//! status-change signal from status transitions.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: positions, transitions, tags and the task aggregate
//! - **Ports**: the task store and team directory contracts
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: the board operations called by an HTTP layer
//!
//! # Modules
//!
//! - [`task`]: the board itself
//! - [`config`]: environment configuration and pool construction
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
