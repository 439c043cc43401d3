//! The types that make up a Raygun crash report.
//!
//! The [`Report`] struct is the unit handed to a transport for delivery.
//! These types describe the boundary between the integration layers and the
//! transport, not the exact wire format of the Raygun API; transports are
//! free to re-shape the payload before sending it.

use std::fmt;
use std::str;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::utils::{parse_type_from_debug, ts_rfc3339};

/// An arbitrary (JSON) value.
pub mod value {
    pub use serde_json::value::{from_value, to_value, Index, Map, Number, Value};
}

/// The internally used arbitrary data map type.
pub mod map {
    pub use std::collections::btree_map::{BTreeMap as Map, *};
}

/// An arbitrary (JSON) value.
pub use self::value::Value;

/// The internally used map type.
pub use self::map::Map;

/// Represents the severity of a report.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Indicates very spammy debug information.
    Debug,
    /// Informational messages.
    #[default]
    Info,
    /// A warning.
    Warning,
    /// An error.
    Error,
}

impl str::FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(string: &str) -> Result<Level, Self::Err> {
        Ok(match string {
            "debug" => Level::Debug,
            "info" | "log" => Level::Info,
            "warning" => Level::Warning,
            "error" => Level::Error,
            _ => return Err(ParseLevelError),
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Raised if a level cannot be parsed from a string.
#[derive(Debug, ThisError)]
#[error("invalid level")]
pub struct ParseLevelError;

/// Represents the details of an error, including its source chain.
///
/// Raygun groups reports by the outermost error's class name; wrapper
/// exceptions configured on the client are unwrapped before grouping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// The class name of the error, used for grouping.
    pub class_name: String,
    /// The human readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The wrapped inner error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<Box<Error>>,
}

impl Error {
    /// Creates error details with the given class name.
    pub fn new(class_name: impl Into<String>) -> Error {
        Error {
            class_name: class_name.into(),
            message: None,
            inner_error: None,
        }
    }

    /// Creates error details from any [`std::error::Error`].
    ///
    /// The `source()` chain is resolved into nested inner errors, and class
    /// names are derived from each error's `Debug` representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use thiserror::Error;
    ///
    /// #[derive(Debug, Error)]
    /// #[error("inner")]
    /// struct InnerError;
    ///
    /// #[derive(Debug, Error)]
    /// #[error("outer")]
    /// struct OuterError(#[from] InnerError);
    ///
    /// let details = raygun_types::protocol::Error::from_std(&OuterError(InnerError));
    /// assert_eq!(&details.class_name, "OuterError");
    /// assert_eq!(details.inner_error.unwrap().class_name, "InnerError");
    /// ```
    pub fn from_std<E: std::error::Error + ?Sized>(err: &E) -> Error {
        let mut error = Error {
            class_name: parse_type_from_debug(err),
            message: Some(err.to_string()),
            inner_error: None,
        };

        if let Some(source) = err.source() {
            error.inner_error = Some(Box::new(Error::from_std(source)));
        }

        error
    }
}

/// Represents the identity of the affected user.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// The unique identifier of the user, such as a database id or email.
    pub identifier: String,
    /// Whether the user is logged in or otherwise identifiable.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_anonymous: bool,
    /// The email address of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The full name of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// The first name of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// A device or install id, for correlating anonymous users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Identifier {
    /// Creates a user identity from an identifier.
    pub fn new(identifier: impl Into<String>) -> Identifier {
        Identifier {
            identifier: identifier.into(),
            ..Default::default()
        }
    }
}

/// Represents HTTP request data attached to a report.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The URL of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The HTTP request method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    /// The host the request was addressed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    /// The decoded query string parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub query_string: Map<String, String>,
    /// HTTP request headers.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, String>,
    /// Submitted form fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub form: Map<String, String>,
    /// The raw request body, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
}

/// A full crash report as handed to a transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The timestamp of when the report was created.
    #[serde(with = "ts_rfc3339")]
    pub occurred_on: SystemTime,
    /// The severity of the report.
    pub level: Level,
    /// The message of the log event that produced the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The name of the logger or target that produced the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    /// The name of the machine the report originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    /// The version of the reporting application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_version: Option<String>,
    /// A custom key used to group related reports together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,
    /// Tags attached to the report.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Arbitrary custom data attached to the report.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_data: Map<String, Value>,
    /// The affected user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identifier>,
    /// The error details, if the report was produced from an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
    /// HTTP request data, if the report was produced while serving a request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
}

impl Default for Report {
    fn default() -> Report {
        Report {
            occurred_on: SystemTime::now(),
            level: Level::default(),
            message: None,
            logger: None,
            machine_name: None,
            application_version: None,
            group_key: None,
            tags: Vec::new(),
            custom_data: Map::new(),
            user: None,
            error: None,
            request: None,
        }
    }
}

impl Report {
    /// Creates a new report at the given level.
    pub fn new(level: Level) -> Report {
        Report {
            level,
            ..Default::default()
        }
    }

    /// Appends a tag unless an equal tag is already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}
