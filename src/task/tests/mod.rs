//! Unit tests for the task board module.
//!
//! Domain rules are tested in isolation; service tests run over the
//! in-memory adapters, and store failures are injected through a mocked
//! repository.

mod support;
