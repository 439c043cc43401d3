use std::collections::BTreeMap;
use std::error::Error;

use tracing_core::field::{Field, Visit};
use tracing_core::Event;

use raygun_core::protocol::{self, Identifier, Level, Report, Value};

use crate::layer::Properties;

/// Converts a [`tracing_core::Level`] to a Raygun [`Level`]
pub fn convert_tracing_level(level: &tracing_core::Level) -> Level {
    match level {
        &tracing_core::Level::TRACE | &tracing_core::Level::DEBUG => Level::Debug,
        &tracing_core::Level::INFO => Level::Info,
        &tracing_core::Level::WARN => Level::Warning,
        &tracing_core::Level::ERROR => Level::Error,
    }
}

/// Extracts the message, error details and remaining fields from an event.
pub fn extract_event_data(
    event: &Event,
) -> (
    Option<String>,
    Option<protocol::Error>,
    BTreeMap<String, Value>,
) {
    let mut recorder = FieldVisitor::default();
    event.record(&mut recorder);

    // Find the message of the event, if any
    let message = recorder
        .fields
        .remove("message")
        .and_then(|v| v.as_str().map(|s| s.to_owned()));

    (message, recorder.error, recorder.fields)
}

/// Records all fields of a [`tracing_core::Event`] for easy access
#[derive(Default)]
struct FieldVisitor {
    fields: BTreeMap<String, Value>,
    error: Option<protocol::Error>,
}

impl FieldVisitor {
    fn record<T: Into<Value>>(&mut self, field: &Field, value: T) {
        self.fields.insert(field.name().to_owned(), value.into());
    }
}

impl Visit for FieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        // The first recorded error wins, later ones stay in the custom data
        // as plain strings.
        if self.error.is_none() {
            self.error = Some(protocol::Error::from_std(value));
        }
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }
}

/// Creates a [`Report`] from a given [`tracing_core::Event`].
///
/// The configured special properties are read into their dedicated report
/// fields; all recorded fields, special or not, are attached as custom data.
pub(crate) fn report_from_event(event: &Event, properties: &Properties) -> Report {
    let (message, error, data) = extract_event_data(event);

    let mut report = Report {
        level: convert_tracing_level(event.metadata().level()),
        logger: Some(event.metadata().target().to_owned()),
        message,
        error,
        ..Default::default()
    };

    if let Some(name) = properties.user_info {
        // Tracing fields are scalar, so the identity structure usually
        // arrives as a JSON string.
        report.user = data.get(name).and_then(|value| match value {
            Value::String(json) => serde_json::from_str::<Identifier>(json).ok(),
            value => serde_json::from_value::<Identifier>(value.clone()).ok(),
        });
    }
    if report.user.is_none() {
        if let Some(name) = properties.user_name {
            report.user = data
                .get(name)
                .and_then(Value::as_str)
                .map(Identifier::new);
        }
    }

    if let Some(name) = properties.application_version {
        report.application_version = data
            .get(name)
            .and_then(Value::as_str)
            .map(|version| version.to_owned());
    }

    if let Some(name) = properties.machine_name {
        report.machine_name = data
            .get(name)
            .and_then(Value::as_str)
            .map(|machine| machine.to_owned());
    }

    report.group_key = data
        .get(properties.group_key)
        .and_then(Value::as_str)
        .map(|key| key.to_owned());

    for tag in extract_tags(data.get(properties.tags)) {
        report.add_tag(tag);
    }

    report.custom_data = data;
    report
}

/// Reads tags from the configured tags property.
///
/// Accepts either an array of strings or a single comma separated string.
fn extract_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(tags)) => tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect(),
        Some(Value::Array(tags)) => tags
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}
