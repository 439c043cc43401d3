//! This crate provides the core of the Raygun SDK, which can be used to
//! capture crash reports and hand them off for delivery.
//!
//! `raygun-core` is meant for integration authors and third-party library
//! authors that want to instrument their code for Raygun. It intentionally
//! owns none of the delivery machinery: batching, retries and the actual
//! network transport belong to [`Transport`] implementations that are
//! injected through [`ClientOptions`].
//!
//! # Core Concepts
//!
//! The [`Client`] is constructed once at application startup from
//! [`ClientOptions`] and shared (usually behind an [`std::sync::Arc`]) with
//! every integration that produces [`protocol::Report`]s. Extension points
//! are the [`Transport`] trait for delivery and the [`Enrich`] trait for
//! attaching contextual data to reports before they are handed off.
//!
//! # Testing
//!
//! With the `test` feature enabled, the `test` module provides a transport
//! that collects reports instead of sending them, along with helpers to run
//! a closure against a freshly configured client.
#![warn(missing_docs)]

#[macro_use]
mod macros;

mod client;
mod clientoptions;
mod enrich;
mod transport;


/// The Raygun protocol.
pub mod protocol {
    pub use raygun_types::protocol::*;
}

pub use crate::client::Client;
pub use crate::clientoptions::ClientOptions;
pub use crate::enrich::Enrich;
pub use crate::transport::Transport;
pub use raygun_types::Level;
