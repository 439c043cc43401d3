use std::borrow::Cow;

use raygun_core::protocol::{Map, Request};

/// Settings that control which parts of the HTTP request data are attached
/// to reports.
///
/// Name matching is case-insensitive. The single name `"*"` drops the whole
/// section it is configured for.
#[derive(Clone, Debug, Default)]
pub struct RaygunSettings {
    /// Form field names to strip from request data.
    pub ignored_form_field_names: Vec<Cow<'static, str>>,
    /// Header names to strip from request data.
    pub ignored_header_names: Vec<Cow<'static, str>>,
    /// Query parameter names to strip from request data.
    pub ignored_query_parameter_names: Vec<Cow<'static, str>>,
    /// Whether the raw request body is stripped.
    pub is_raw_data_ignored: bool,
}

impl RaygunSettings {
    /// Creates empty settings that keep all request data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds form field names to strip from request data.
    #[must_use]
    pub fn ignore_form_field_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.ignored_form_field_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds header names to strip from request data.
    #[must_use]
    pub fn ignore_header_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.ignored_header_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds query parameter names to strip from request data.
    #[must_use]
    pub fn ignore_query_parameter_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.ignored_query_parameter_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Strips the raw request body from request data.
    #[must_use]
    pub fn ignore_raw_data(mut self) -> Self {
        self.is_raw_data_ignored = true;
        self
    }

    pub(crate) fn apply(&self, request: &mut Request) {
        filter_names(&mut request.form, &self.ignored_form_field_names);
        filter_names(&mut request.headers, &self.ignored_header_names);
        filter_names(&mut request.query_string, &self.ignored_query_parameter_names);
        if self.is_raw_data_ignored {
            request.raw_data = None;
        }
    }
}

fn filter_names(section: &mut Map<String, String>, ignored: &[Cow<'static, str>]) {
    if ignored.iter().any(|name| name == "*") {
        section.clear();
        return;
    }
    section.retain(|key, _| !ignored.iter().any(|name| name.eq_ignore_ascii_case(key)));
}
