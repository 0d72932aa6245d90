//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database administration (MongoDB in production, in-memory in tests)
//! - Clock (for testing)

mod admin;
mod error;
mod testing;

pub use admin::DatabaseAdmin;
pub use error::AdminError;
pub use testing::ClockPort;

#[cfg(test)]
pub use admin::MockDatabaseAdmin;
#[cfg(test)]
pub use testing::MockClockPort;
