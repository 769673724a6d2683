//! Tracing setup shared by the workspace binaries.

mod tracing;

pub use self::tracing::{LogFormat, init as init_tracing};
