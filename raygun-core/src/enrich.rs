use crate::protocol::Report;

/// The trait for report enrichers.
///
/// Enrichers registered on [`ClientOptions`](crate::ClientOptions) run for
/// every captured report, in registration order, before defaults are stamped
/// and the report is handed to the transport. An enricher decides for itself
/// which reports it applies to; enrichers restricted to a minimum level
/// simply leave reports below that level untouched.
pub trait Enrich: Send + Sync + 'static {
    /// Attaches contextual data to the given report.
    fn enrich(&self, report: &mut Report);
}

impl<F> Enrich for F
where
    F: Fn(&mut Report) + Send + Sync + 'static,
{
    fn enrich(&self, report: &mut Report) {
        self(report)
    }
}
