//! # MTRH Types
//!
//! Validated value types shared by the registry crates.
//!
//! Each type can only be constructed from input that has already passed its own check, so code
//! holding one of these values never re-validates it.

mod age;
mod gender;
mod text;

pub use age::{Age, AgeError};
pub use gender::{Gender, GenderError};
pub use text::{NonEmptyText, TextError};
