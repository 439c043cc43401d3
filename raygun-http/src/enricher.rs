use raygun_core::protocol::{Level, Report};
use raygun_core::Enrich;

use crate::accessor::RequestContextAccessor;
use crate::settings::RaygunSettings;

/// Enriches reports with the HTTP request currently being served.
///
/// Registered on [`raygun_core::ClientOptions`] via
/// [`add_enricher`](raygun_core::ClientOptions::add_enricher). Reports below
/// the restricted minimum level (`Error` by default) pass through untouched,
/// as do reports that already carry request data.
///
/// # Examples
///
/// ```
/// use raygun_core::ClientOptions;
/// use raygun_http::RaygunHttpEnricher;
///
/// let _options = ClientOptions::new("ABC123")
///     .add_enricher(RaygunHttpEnricher::new());
/// ```
#[derive(Debug, Default)]
pub struct RaygunHttpEnricher {
    accessor: RequestContextAccessor,
    minimum_level: Option<Level>,
    settings: RaygunSettings,
}

impl RaygunHttpEnricher {
    /// Creates an enricher using the process-wide request accessor, the
    /// `Error` minimum level and empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accessor that provides the current request.
    ///
    /// Defaults to the process-wide accessor.
    #[must_use]
    pub fn accessor(mut self, accessor: RequestContextAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Sets the minimum report level to enrich.
    ///
    /// Defaults to [`Level::Error`].
    #[must_use]
    pub fn restricted_to_minimum_level(mut self, level: Level) -> Self {
        self.minimum_level = Some(level);
        self
    }

    /// Sets the settings used to filter the attached request data.
    ///
    /// Defaults to empty settings, which keep everything.
    #[must_use]
    pub fn settings(mut self, settings: RaygunSettings) -> Self {
        self.settings = settings;
        self
    }

    fn minimum_level(&self) -> Level {
        self.minimum_level.unwrap_or(Level::Error)
    }
}

impl Enrich for RaygunHttpEnricher {
    fn enrich(&self, report: &mut Report) {
        if report.level < self.minimum_level() || report.request.is_some() {
            return;
        }
        if let Some(request) = self.accessor.current() {
            let mut request = (*request).clone();
            self.settings.apply(&mut request);
            report.request = Some(request);
        }
    }
}
