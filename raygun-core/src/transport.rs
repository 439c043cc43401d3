use crate::protocol::Report;

/// The trait for transports.
///
/// A transport is responsible for delivering finished reports to the Raygun
/// service. Everything beyond the hand-off is the transport's concern:
/// serialization to the wire format, authentication with the application's
/// API key, batching, retries and network failures are neither observed nor
/// translated by the rest of the SDK.
pub trait Transport: Send + Sync + 'static {
    /// Sends a report.
    fn send_report(&self, report: Report);
}
