use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Enrich, Transport};

/// Configuration settings for the client.
///
/// # Examples
///
/// ```
/// let options = raygun_core::ClientOptions::new("ABC123").add_tag("backend");
/// assert_eq!(options.api_key, "ABC123");
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    /// The application's API key, as found on the Raygun dashboard.
    ///
    /// The key is not validated here; an absent or malformed key surfaces
    /// from the transport at emission time.
    pub api_key: String,
    /// Enables debug mode.
    ///
    /// In debug mode, debug information is printed to stderr to help you
    /// understand what the SDK is doing.
    pub debug: bool,
    /// The application version to be sent with reports that do not carry
    /// their own.
    pub application_version: Option<Cow<'static, str>>,
    /// The machine name to be sent with reports that do not carry their own.
    ///
    /// Defaults to the host name at client construction.
    pub machine_name: Option<Cow<'static, str>>,
    /// Tags stamped on every report, ahead of any tags the report carries.
    pub tags: Vec<Cow<'static, str>>,
    /// Class names of outer errors that wrap a more meaningful inner error.
    ///
    /// While a report's outermost error matches one of these names, it is
    /// replaced by its inner error before grouping.
    pub wrapper_exceptions: Vec<Cow<'static, str>>,
    /// Enrichers to run for every captured report.
    pub enrichers: Vec<Arc<dyn Enrich>>,
    /// The transport to use.
    ///
    /// If not set, the client is effectively disabled and drops all reports.
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientOptions {
    /// Creates new options for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Adds a tag that is stamped on every report.
    #[must_use]
    pub fn add_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a wrapper exception class name to unwrap before grouping.
    #[must_use]
    pub fn add_wrapper_exception(mut self, class_name: impl Into<Cow<'static, str>>) -> Self {
        self.wrapper_exceptions.push(class_name.into());
        self
    }

    /// Adds a configured enricher to the options.
    #[must_use]
    pub fn add_enricher<E: Enrich>(mut self, enricher: E) -> Self {
        self.enrichers.push(Arc::new(enricher));
        self
    }

    /// Sets the transport to use.
    #[must_use]
    pub fn set_transport<T: Transport>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl Default for ClientOptions {
    fn default() -> ClientOptions {
        ClientOptions {
            api_key: String::new(),
            debug: false,
            application_version: None,
            machine_name: None,
            tags: vec![],
            wrapper_exceptions: vec![],
            enrichers: vec![],
            transport: None,
        }
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        struct Enrichers(usize);
        #[derive(Debug)]
        struct TransportDebug;
        let transport = self.transport.as_ref().map(|_| TransportDebug);

        f.debug_struct("ClientOptions")
            .field("api_key", &self.api_key)
            .field("debug", &self.debug)
            .field("application_version", &self.application_version)
            .field("machine_name", &self.machine_name)
            .field("tags", &self.tags)
            .field("wrapper_exceptions", &self.wrapper_exceptions)
            .field("enrichers", &Enrichers(self.enrichers.len()))
            .field("transport", &transport)
            .finish()
    }
}

impl From<&str> for ClientOptions {
    fn from(api_key: &str) -> ClientOptions {
        ClientOptions::new(api_key)
    }
}

impl From<String> for ClientOptions {
    fn from(api_key: String) -> ClientOptions {
        ClientOptions::new(api_key)
    }
}
