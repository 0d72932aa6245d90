//! Use cases - orchestration over the infrastructure ports.

pub mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapReport, DatabaseSummary};
