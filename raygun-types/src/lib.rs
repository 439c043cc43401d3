//! This crate provides common types for working with the Raygun crash
//! reporting protocol.
//!
//! Most of these types are serializable in one form or another. This crate is
//! meant for integration and transport authors; regular users should instead
//! depend on the integration crates, which re-export the protocol under
//! `raygun_core::protocol`.
#![warn(missing_docs)]

pub mod protocol;
#[doc(hidden)]
pub mod utils;

pub use protocol::{Level, ParseLevelError};
