use std::borrow::Cow;
use std::fmt;

use crate::protocol::{Error, Report};
use crate::ClientOptions;

/// The Raygun client.
///
/// The client is the hand-off point between the integrations that produce
/// reports and the transport that delivers them. Integrations hold the
/// client behind an [`std::sync::Arc`] and call [`capture_report`] for every
/// log event they translate; the client finalizes the report and passes it
/// on.
///
/// [`capture_report`]: Client::capture_report
pub struct Client {
    options: ClientOptions,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .finish()
    }
}

impl From<ClientOptions> for Client {
    fn from(options: ClientOptions) -> Client {
        Client::new(options)
    }
}

impl Client {
    /// Creates a new client from the given options.
    ///
    /// If no machine name is configured, the host name of the machine is
    /// looked up once here and used for all reports.
    pub fn new(options: impl Into<ClientOptions>) -> Client {
        let mut options = options.into();
        if options.machine_name.is_none() {
            options.machine_name = hostname::get()
                .ok()
                .and_then(|name| name.into_string().ok())
                .map(Cow::Owned);
        }
        Client { options }
    }

    /// Returns the options of this client.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns whether the client is enabled.
    ///
    /// A client without a transport drops all reports.
    pub fn is_enabled(&self) -> bool {
        self.options.transport.is_some()
    }

    /// Captures a report and hands it to the transport.
    ///
    /// Before the hand-off the report is finalized: enrichers run in
    /// registration order, unset machine name and application version fall
    /// back to the configured defaults, the client's static tags are
    /// prepended, and wrapper exceptions are unwrapped.
    pub fn capture_report(&self, mut report: Report) {
        for enricher in &self.options.enrichers {
            enricher.enrich(&mut report);
        }

        if report.machine_name.is_none() {
            report.machine_name = self.options.machine_name.as_ref().map(|name| name.to_string());
        }
        if report.application_version.is_none() {
            report.application_version = self
                .options
                .application_version
                .as_ref()
                .map(|version| version.to_string());
        }

        if !self.options.tags.is_empty() {
            let event_tags = std::mem::take(&mut report.tags);
            for tag in &self.options.tags {
                report.add_tag(tag.to_string());
            }
            for tag in event_tags {
                report.add_tag(tag);
            }
        }

        if let Some(error) = report.error.take() {
            report.error = Some(self.unwrap_wrapper_exceptions(error));
        }

        match self.options.transport.as_ref() {
            Some(transport) => transport.send_report(report),
            None => raygun_debug!(self, "no transport configured, dropping report"),
        }
    }

    fn unwrap_wrapper_exceptions(&self, mut error: Error) -> Error {
        while self
            .options
            .wrapper_exceptions
            .iter()
            .any(|name| *name == error.class_name)
        {
            match error.inner_error.take() {
                Some(inner) => error = *inner,
                None => break,
            }
        }
        error
    }
}
