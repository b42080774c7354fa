//! Shared types for the front-house engine
//!
//! Entity models, bill/ledger value types and the unified error-code system.
//! No storage and no business rules live here.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
