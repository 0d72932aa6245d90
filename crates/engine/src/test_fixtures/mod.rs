//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{fixed_now, InMemoryAdmin};
//!
//! #[tokio::test]
//! async fn test_bootstrap_runs() {
//!     let admin = Arc::new(InMemoryAdmin::new());
//!     // ... test logic
//! }
//! ```

pub mod memory_admin;

pub use memory_admin::InMemoryAdmin;

use chrono::{DateTime, TimeZone, Utc};
use crudinit_domain::bson::{doc, Bson, Document};

/// Deterministic timestamp for seeded documents.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixed timestamp")
}

/// A user document that satisfies the users validator.
pub fn valid_user(email: &str) -> Document {
    doc! {
        "nome": "Maria Silva",
        "email": email,
        "idade": Bson::Int32(34),
        "cidade": "Belo Horizonte",
        "ativo": true,
    }
}
