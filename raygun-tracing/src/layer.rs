use std::borrow::Cow;
use std::sync::Arc;

use tracing_core::{Event, LevelFilter, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use raygun_core::Client;

use crate::converters::{convert_tracing_level, report_from_event};

/// The special event properties read into dedicated report fields.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Properties {
    pub(crate) user_name: Option<&'static str>,
    pub(crate) application_version: Option<&'static str>,
    pub(crate) group_key: &'static str,
    pub(crate) tags: &'static str,
    pub(crate) user_info: Option<&'static str>,
    pub(crate) machine_name: Option<&'static str>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            user_name: Some("UserName"),
            application_version: Some("ApplicationVersion"),
            group_key: "GroupKey",
            tags: "Tags",
            user_info: None,
            machine_name: None,
        }
    }
}

/// Provides a tracing layer that dispatches events to Raygun.
///
/// Events at or above the restricted minimum level (`ERROR` by default, as
/// Raygun is mostly used for error reporting) are converted into reports and
/// captured on the given client; everything below is ignored by this layer.
/// The event's fields and message are attached as custom data, and the level
/// is always included as a tag.
pub struct RaygunLayer {
    client: Arc<Client>,
    minimum_level: LevelFilter,
    event_filter: Option<Box<dyn Fn(&Metadata<'_>) -> bool + Send + Sync>>,
    tags: Vec<Cow<'static, str>>,
    properties: Properties,
}

impl RaygunLayer {
    /// Creates a new layer that captures reports on the given client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            minimum_level: LevelFilter::ERROR,
            event_filter: None,
            tags: vec![],
            properties: Properties::default(),
        }
    }

    /// Sets the minimum level required for an event to reach Raygun.
    ///
    /// Defaults to `ERROR`.
    #[must_use]
    pub fn restricted_to_minimum_level(mut self, level: LevelFilter) -> Self {
        self.minimum_level = level;
        self
    }

    /// Sets a custom event filter function.
    ///
    /// The filter runs after the minimum level check and decides whether the
    /// event is converted into a report based on its [`Metadata`].
    #[must_use]
    pub fn event_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Metadata<'_>) -> bool + Send + Sync + 'static,
    {
        self.event_filter = Some(Box::new(filter));
        self
    }

    /// Adds static tags to include with every report.
    #[must_use]
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the property to read the username from.
    ///
    /// Defaults to `"UserName"`. Pass `None` to disable this feature.
    #[must_use]
    pub fn user_name_property(mut self, name: Option<&'static str>) -> Self {
        self.properties.user_name = name;
        self
    }

    /// Sets the property to read the application version from.
    ///
    /// Defaults to `"ApplicationVersion"`. When the property is absent from
    /// an event, the version configured on the client applies. Pass `None`
    /// to disable this feature.
    #[must_use]
    pub fn application_version_property(mut self, name: Option<&'static str>) -> Self {
        self.properties.application_version = name;
        self
    }

    /// Sets the property containing the custom group key for the report.
    ///
    /// Defaults to `"GroupKey"`.
    #[must_use]
    pub fn group_key_property(mut self, name: &'static str) -> Self {
        self.properties.group_key = name;
        self
    }

    /// Sets the property where additional tags are stored on events.
    ///
    /// Defaults to `"Tags"`. The property accepts an array of strings or a
    /// single comma separated string.
    #[must_use]
    pub fn tags_property(mut self, name: &'static str) -> Self {
        self.properties.tags = name;
        self
    }

    /// Sets the property containing a full user identity structure.
    ///
    /// Disabled by default. When present on an event, it takes precedence
    /// over the username property.
    #[must_use]
    pub fn user_info_property(mut self, name: Option<&'static str>) -> Self {
        self.properties.user_info = name;
        self
    }

    /// Sets the property to read the machine name from.
    ///
    /// Disabled by default; the machine name configured on the client
    /// applies instead.
    #[must_use]
    pub fn machine_name_property(mut self, name: Option<&'static str>) -> Self {
        self.properties.machine_name = name;
        self
    }
}

impl<S: Subscriber> Layer<S> for RaygunLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.minimum_level {
            return;
        }
        if let Some(filter) = &self.event_filter {
            if !filter(metadata) {
                return;
            }
        }

        let mut report = report_from_event(event, &self.properties);

        if !self.tags.is_empty() {
            let event_tags = std::mem::take(&mut report.tags);
            for tag in &self.tags {
                report.add_tag(tag.to_string());
            }
            for tag in event_tags {
                report.add_tag(tag);
            }
        }
        // The level is always included as a tag.
        report.add_tag(convert_tracing_level(metadata.level()).to_string());

        self.client.capture_report(report);
    }
}

/// Creates a [`RaygunLayer`] with default options for the given client.
pub fn layer(client: Arc<Client>) -> RaygunLayer {
    RaygunLayer::new(client)
}
