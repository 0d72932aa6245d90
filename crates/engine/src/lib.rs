//! crudinit Engine library.
//!
//! Brings a fresh MongoDB database to the baseline state of the CRUD demo.
//!
//! ## Structure
//!
//! - `use_cases/` - The bootstrap procedure
//! - `infrastructure/` - External dependency implementations (ports + adapters)

pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

/// E2E integration tests using real MongoDB via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use use_cases::Bootstrap;
