//! Logs each HTTP request on arrival, then its status and latency once the
//! handler has answered.
//!
//! Events go to the `api` target. Completion is logged at `info` unless the
//! status is an error: 4xx at `warn`, 5xx at `error`.

use std::future::{Ready, ready};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use futures_util::future::LocalBoxFuture;
use tracing::{Level, error, info, warn};

/// Wraps an app so every request is logged.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggedService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggedService { inner: service }))
    }
}

pub struct LoggedService<S> {
    inner: S,
}

/// What is remembered about a request until its response is ready.
struct RequestLine {
    method: String,
    path: String,
    started: Instant,
}

impl RequestLine {
    fn begin(req: &ServiceRequest) -> Self {
        let line = RequestLine {
            method: req.method().to_string(),
            path: req.path().to_string(),
            started: Instant::now(),
        };

        let peer = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let agent = req
            .headers()
            .get(actix_web::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        info!(
            target: "api",
            method = %line.method,
            path = %line.path,
            query = %req.query_string(),
            remote_addr = %peer,
            user_agent = %agent,
            "request received"
        );
        line
    }

    fn finish(&self, status: StatusCode) {
        log_completion(&self.method, &self.path, status, self.started.elapsed());
    }
}

/// Log level for a finished request with `status`.
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn log_completion(method: &str, path: &str, status: StatusCode, elapsed: Duration) {
    let level = completion_level(status);
    let status = status.as_u16();
    let duration_ms = elapsed.as_millis() as u64;

    if level == Level::ERROR {
        error!(target: "api", method, path, status, duration_ms, "request failed");
    } else if level == Level::WARN {
        warn!(target: "api", method, path, status, duration_ms, "request rejected");
    } else {
        info!(target: "api", method, path, status, duration_ms, "request answered");
    }
}

impl<S, B> Service<ServiceRequest> for LoggedService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine::begin(&req);
        let response = self.inner.call(req);

        Box::pin(async move {
            let res = response.await?;
            line.finish(res.status());
            Ok(res)
        })
    }
}
