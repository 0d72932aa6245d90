//! E2E tests against a real MongoDB server.
//!
//! Every test starts its own container, so they need Docker and are
//! `#[ignore]`d by default. Run them with:
//!
//! ```text
//! cargo test -p crudinit-engine -- --ignored
//! ```
