use std::sync::Arc;

use raygun_core::protocol::Report;
use raygun_core::test::with_captured_reports;
use raygun_core::{Client, ClientOptions};
use raygun_tracing::RaygunLayer;
use tracing_core::LevelFilter;
use tracing_subscriber::prelude::*;

fn capture_with_layer<L, F>(options: ClientOptions, layer: L, f: F) -> Vec<Report>
where
    L: FnOnce(Arc<Client>) -> RaygunLayer,
    F: FnOnce(),
{
    with_captured_reports(options, |client| {
        let subscriber = tracing_subscriber::registry().with(layer(client));
        tracing::subscriber::with_default(subscriber, f);
    })
}

#[test]
fn test_error_events_are_captured_once() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        raygun_tracing::layer,
        || {
            tracing::error!("shields failed at {}%", 5);
        },
    );

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.message.as_deref(), Some("shields failed at 5%"));
    assert_eq!(report.level, raygun_core::Level::Error);
    assert_eq!(report.tags, vec!["error"]);
    assert_eq!(
        report.logger.as_deref(),
        Some(module_path!())
    );
}

#[test]
fn test_events_below_minimum_level_are_ignored() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        raygun_tracing::layer,
        || {
            tracing::info!("routine maintenance");
            tracing::warn!("low fuel");
        },
    );

    assert!(reports.is_empty());
}

#[test]
fn test_minimum_level_can_be_lowered() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        |client| raygun_tracing::layer(client).restricted_to_minimum_level(LevelFilter::WARN),
        || {
            tracing::warn!("low fuel");
            tracing::info!("routine maintenance");
        },
    );

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].level, raygun_core::Level::Warning);
    assert_eq!(reports[0].tags, vec!["warning"]);
}

#[test]
fn test_default_properties_are_extracted() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        raygun_tracing::layer,
        || {
            tracing::error!(
                UserName = "jane",
                GroupKey = "checkout",
                Tags = "urgent,billing",
                order_id = 7,
                "payment failed"
            );
        },
    );

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.user.as_ref().unwrap().identifier, "jane");
    assert_eq!(report.group_key.as_deref(), Some("checkout"));
    assert_eq!(report.tags, vec!["urgent", "billing", "error"]);
    // Properties stay attached as custom data, special or not.
    assert_eq!(report.custom_data["UserName"], "jane");
    assert_eq!(report.custom_data["order_id"], 7);
}

#[test]
fn test_application_version_property_overrides_client_version() {
    let mut options = ClientOptions::new("ABC123");
    options.application_version = Some("9.9.9".into());

    let reports = capture_with_layer(options, raygun_tracing::layer, || {
        tracing::error!(ApplicationVersion = "1.2.3", "payment failed");
        tracing::error!("payment failed again");
    });

    assert_eq!(reports.len(), 2);
    // The event's version wins over the one configured on the client.
    assert_eq!(reports[0].application_version.as_deref(), Some("1.2.3"));
    assert_eq!(reports[0].custom_data["ApplicationVersion"], "1.2.3");
    assert_eq!(reports[1].application_version.as_deref(), Some("9.9.9"));
}

#[test]
fn test_machine_name_property_is_extracted() {
    let mut options = ClientOptions::new("ABC123");
    options.machine_name = Some("fallback-host".into());

    let reports = capture_with_layer(
        options,
        |client| raygun_tracing::layer(client).machine_name_property(Some("MachineName")),
        || {
            tracing::error!(MachineName = "web-7", "payment failed");
        },
    );

    assert_eq!(reports[0].machine_name.as_deref(), Some("web-7"));
    assert_eq!(reports[0].custom_data["MachineName"], "web-7");
}

#[test]
fn test_disabled_user_name_property() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        |client| raygun_tracing::layer(client).user_name_property(None),
        || {
            tracing::error!(UserName = "jane", "payment failed");
        },
    );

    assert!(reports[0].user.is_none());
    assert_eq!(reports[0].custom_data["UserName"], "jane");
}

#[test]
fn test_user_info_property_takes_precedence() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        |client| raygun_tracing::layer(client).user_info_property(Some("UserInfo")),
        || {
            tracing::error!(
                UserInfo = r#"{"identifier":"u-42","email":"jane@example.com"}"#,
                UserName = "jane",
                "payment failed"
            );
        },
    );

    let user = reports[0].user.as_ref().unwrap();
    assert_eq!(user.identifier, "u-42");
    assert_eq!(user.email.as_deref(), Some("jane@example.com"));
}

#[test]
fn test_static_tags_precede_event_tags() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        |client| raygun_tracing::layer(client).tags(["backend"]),
        || {
            tracing::error!(Tags = "urgent,backend", "payment failed");
        },
    );

    assert_eq!(reports[0].tags, vec!["backend", "urgent", "error"]);
}

#[test]
fn test_recorded_errors_are_unwrapped_by_the_client() {
    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestError(#[from] ConnectionReset);

    let reports = capture_with_layer(
        ClientOptions::new("ABC123").add_wrapper_exception("RequestError"),
        raygun_tracing::layer,
        || {
            let err = RequestError(ConnectionReset);
            tracing::error!(
                error = &err as &(dyn std::error::Error + 'static),
                "payment failed"
            );
        },
    );

    let error = reports[0].error.as_ref().unwrap();
    assert_eq!(error.class_name, "ConnectionReset");
    assert_eq!(error.message.as_deref(), Some("connection reset"));
    assert_eq!(
        reports[0].custom_data["error"],
        "request failed"
    );
}

#[test]
fn test_event_filter_is_applied() {
    let reports = capture_with_layer(
        ClientOptions::new("ABC123"),
        |client| {
            raygun_tracing::layer(client)
                .event_filter(|metadata| !metadata.target().starts_with("noisy"))
        },
        || {
            tracing::error!(target: "noisy::dependency", "ignored");
            tracing::error!("captured");
        },
    );

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message.as_deref(), Some("captured"));
}

#[test]
fn test_http_enricher_attaches_request_data() {
    use raygun_http::{RaygunHttpEnricher, RequestContextAccessor};

    let request = Arc::new(raygun_core::protocol::Request {
        url: Some("https://example.com/checkout".into()),
        http_method: Some("POST".into()),
        ..Default::default()
    });
    let _guard = RequestContextAccessor::new().enter(request);

    let reports = capture_with_layer(
        ClientOptions::new("ABC123").add_enricher(RaygunHttpEnricher::new()),
        raygun_tracing::layer,
        || {
            tracing::error!("payment failed");
            tracing::info!("not captured, not enriched");
        },
    );

    assert_eq!(reports.len(), 1);
    let request = reports[0].request.as_ref().unwrap();
    assert_eq!(request.http_method.as_deref(), Some("POST"));
}
