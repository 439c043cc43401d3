#![cfg(feature = "tower")]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::{Request, Response};
use raygun_core::protocol::{Level, Report};
use raygun_core::test::TestTransport;
use raygun_core::{Client, ClientOptions};
use raygun_http::{RaygunHttpEnricher, RaygunHttpLayer};
use tower_layer::Layer;
use tower_service::Service;

/// A service that captures a report while handling the request.
struct CaptureService {
    client: Arc<Client>,
}

impl Service<Request<()>> for CaptureService {
    type Response = Response<()>;
    type Error = std::convert::Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _request: Request<()>) -> Self::Future {
        let client = self.client.clone();
        Box::pin(std::future::poll_fn(move |_cx| {
            client.capture_report(Report::new(Level::Error));
            Poll::Ready(Ok(Response::new(())))
        }))
    }
}

#[tokio::test]
async fn test_reports_carry_the_request_being_served() {
    let transport = TestTransport::new();
    let mut options = ClientOptions::new("ABC123").add_enricher(RaygunHttpEnricher::new());
    options.transport = Some(transport.clone());
    let client = Arc::new(Client::new(options));

    let mut service = RaygunHttpLayer::new().layer(CaptureService { client });
    let request = Request::builder()
        .method("POST")
        .uri("https://example.com/checkout?coupon=WELCOME")
        .header("accept", "application/json")
        .body(())
        .unwrap();
    service.call(request).await.unwrap();

    let reports = transport.fetch_and_clear_reports();
    assert_eq!(reports.len(), 1);
    let request = reports[0].request.as_ref().expect("request data attached");
    assert_eq!(request.http_method.as_deref(), Some("POST"));
    assert_eq!(request.host_name.as_deref(), Some("example.com"));
    assert_eq!(request.query_string["coupon"], "WELCOME");
    assert_eq!(request.headers["accept"], "application/json");
}

#[tokio::test]
async fn test_no_request_data_outside_the_middleware() {
    let transport = TestTransport::new();
    let mut options = ClientOptions::new("ABC123").add_enricher(RaygunHttpEnricher::new());
    options.transport = Some(transport.clone());
    let client = Arc::new(Client::new(options));

    client.capture_report(Report::new(Level::Error));

    let reports = transport.fetch_and_clear_reports();
    assert!(reports[0].request.is_none());
}
