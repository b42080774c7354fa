//! Data models
//!
//! Plain records persisted by the front-house store and returned to the
//! presentation layer. All IDs are prefixed strings (`t…`, `d…`, `u…`, `o…`),
//! all timestamps are Unix millis.

pub mod bill;
pub mod dashboard;
pub mod dining_table;
pub mod dish;
pub mod ledger;
pub mod order;
pub mod role;
pub mod user;

// Re-exports
pub use bill::*;
pub use dashboard::*;
pub use dining_table::*;
pub use dish::*;
pub use ledger::*;
pub use order::*;
pub use role::*;
pub use user::*;
