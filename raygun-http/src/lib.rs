//! Adds support for enriching Raygun reports with HTTP request data.
//!
//! The [`RaygunHttpEnricher`] attaches the request currently being served to
//! every report at or above its minimum level (`Error` by default). It reads
//! from a [`RequestContextAccessor`], a process-wide accessor for the
//! current request; [`RaygunSettings`] control which parts of the request
//! data are kept.
//!
//! # Examples
//!
//! ```
//! use raygun_core::ClientOptions;
//! use raygun_http::{RaygunHttpEnricher, RaygunSettings};
//!
//! let _options = ClientOptions::new("ABC123").add_enricher(
//!     RaygunHttpEnricher::new()
//!         .settings(RaygunSettings::new().ignore_form_field_names(["password"])),
//! );
//! ```
//!
//! With the `tower` feature, [`RaygunHttpLayer`] wires the accessor up as
//! middleware: every request passing through the wrapped service becomes the
//! current request while it is handled.
#![warn(missing_docs)]

mod accessor;
mod enricher;
mod settings;
#[cfg(feature = "tower")]
mod tower;

pub use accessor::{ContextGuard, RequestContextAccessor};
pub use enricher::RaygunHttpEnricher;
pub use settings::RaygunSettings;
#[cfg(feature = "tower")]
pub use crate::tower::{request_from_http, RaygunHttpFuture, RaygunHttpLayer, RaygunHttpService};
