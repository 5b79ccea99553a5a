//! Services.
//!
//! These contain the core business logic. A service that maps directly to HTTP routes has an
//! `http` module exposing a `router()` function.

pub mod records;
pub use records::RecordService;
