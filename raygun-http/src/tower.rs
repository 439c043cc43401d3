use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::Request as HttpRequest;
use raygun_core::protocol;
use tower_layer::Layer;
use tower_service::Service;

use crate::accessor::RequestContextAccessor;

/// Tower layer that makes each incoming HTTP request available to the
/// [`RaygunHttpEnricher`](crate::RaygunHttpEnricher).
///
/// The wrapped service captures method, URL, host, query string and headers
/// of every request and installs them in the request context accessor around
/// each poll of the inner future, so reports captured while handling the
/// request carry its data.
#[derive(Clone, Default)]
pub struct RaygunHttpLayer {
    _priv: (),
}

impl RaygunHttpLayer {
    /// Creates a new layer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for RaygunHttpLayer {
    type Service = RaygunHttpService<S>;

    fn layer(&self, service: S) -> Self::Service {
        Self::Service { service }
    }
}

/// Tower service produced by [`RaygunHttpLayer`].
#[derive(Clone)]
pub struct RaygunHttpService<S> {
    service: S,
}

/// The future returned from [`RaygunHttpService`].
#[pin_project::pin_project]
pub struct RaygunHttpFuture<F> {
    context: Arc<protocol::Request>,
    #[pin]
    future: F,
}

impl<F: Future> Future for RaygunHttpFuture<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let slf = self.project();
        // Installed around every poll rather than once, as the future may
        // move between worker threads.
        let _guard = RequestContextAccessor::new().enter(slf.context.clone());
        slf.future.poll(cx)
    }
}

impl<S, ReqBody> Service<HttpRequest<ReqBody>> for RaygunHttpService<S>
where
    S: Service<HttpRequest<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = RaygunHttpFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: HttpRequest<ReqBody>) -> Self::Future {
        RaygunHttpFuture {
            context: Arc::new(request_from_http(&request)),
            future: self.service.call(request),
        }
    }
}

/// Captures the reportable parts of an [`http::Request`].
///
/// The body is not read; form data and raw data stay empty here.
pub fn request_from_http<B>(request: &HttpRequest<B>) -> protocol::Request {
    let uri = request.uri();
    protocol::Request {
        url: Some(uri.to_string()),
        http_method: Some(request.method().to_string()),
        host_name: uri
            .host()
            .map(str::to_owned)
            .or_else(|| host_header(request)),
        query_string: uri
            .query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default(),
        headers: request
            .headers()
            .iter()
            .map(|(header, value)| {
                (
                    header.to_string(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect(),
        ..Default::default()
    }
}

fn host_header<B>(request: &HttpRequest<B>) -> Option<String> {
    request
        .headers()
        .get(http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
