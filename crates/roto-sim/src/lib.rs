// Library root: re-exports all modules so integration tests and the binary
// share the same public API.

pub mod config;
pub mod draft;
pub mod player;
pub mod report;
pub mod simulation;
pub mod standings;
pub mod valuation;
