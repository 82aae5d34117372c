//! Observability for flatdb: structured JSON logging.
//!
//! ```ignore
//! use flatdb::observability::Logger;
//!
//! Logger::info("RECORD_CREATED", &[("collection", "users"), ("id", "1")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
