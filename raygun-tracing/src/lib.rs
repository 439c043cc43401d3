//! Adds support for capturing Raygun reports from tracing events.
//!
//! The [`RaygunLayer`] plugs into a `tracing-subscriber` registry and writes
//! log events to the Raygun service. By default only events at the `error`
//! level and above are captured, as Raygun is mostly used for error
//! reporting; event fields and the log message travel as custom data, and
//! the level is included as a tag.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tracing_subscriber::prelude::*;
//!
//! let client = Arc::new(raygun_core::Client::new(
//!     raygun_core::ClientOptions::new("ABC123"),
//! ));
//!
//! tracing_subscriber::registry()
//!     .with(raygun_tracing::layer(client))
//!     .init();
//!
//! tracing::error!("this event is written to Raygun");
//! tracing::info!("this one is filtered out by the minimum level");
//! ```
//!
//! Special event fields are read into dedicated report fields, with the
//! property names configurable on the layer:
//!
//! ```
//! # use std::sync::Arc;
//! # let client = Arc::new(raygun_core::Client::new(raygun_core::ClientOptions::new("ABC123")));
//! let _layer = raygun_tracing::layer(client)
//!     .user_name_property(Some("User"))
//!     .tags(["backend"]);
//!
//! // With the layer installed, the following event carries the user "jane",
//! // the group key "checkout" and the tags "backend", "urgent" and "error":
//! // tracing::error!(User = "jane", GroupKey = "checkout", Tags = "urgent", "payment failed");
//! ```
#![warn(missing_docs)]

mod converters;
mod layer;

pub use converters::{convert_tracing_level, extract_event_data};
pub use layer::{layer, RaygunLayer};
