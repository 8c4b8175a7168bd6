//! Team task boards.
//!
//! A board has three columns (`todo`, `in_progress`, `done`) per team.
//! Tasks are ordered within a column by position and carry a completion
//! timestamp while they sit in `done`. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Wire envelopes in [`api`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
