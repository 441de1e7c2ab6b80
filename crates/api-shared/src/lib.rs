//! # API Shared
//!
//! Shared definitions for the registry front ends.
//!
//! Contains:
//! - Request and response types used by the form server (`types` module)
//! - `Notice`, the success/warning/error message shown after every action
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `mtrh-cli` so both surfaces word their outcomes identically.

pub mod health;
pub mod notice;
pub mod types;

pub use health::HealthService;
pub use notice::{Notice, NoticeKind};
pub use types::*;
