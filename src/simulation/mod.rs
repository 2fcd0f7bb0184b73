//! Scenario generation for tests, benches, and the CLI.

pub mod scenario;
