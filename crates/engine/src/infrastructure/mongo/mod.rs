//! MongoDB adapter.

mod admin;
mod connection;
pub mod errors;

pub use admin::MongoAdmin;
pub use connection::{connect, APP_NAME, SERVER_SELECTION_TIMEOUT};
