//! Infrastructure layer - external dependency implementations.
//!
//! Structure:
//! - `ports` - Trait definitions for external dependencies
//! - `mongo` - MongoDB adapter for the admin port
//! - `config` - Environment-driven connection settings
//! - `clock` - Time source

pub mod clock;
pub mod config;
pub mod mongo;
pub mod ports;
