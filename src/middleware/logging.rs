use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::StatusCode;
use log::{debug, info};
use reqwest::{Request, Response, Url};
use tower::{Layer, Service};

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_PARAMS: &[&str] = &["access_token", "appsecret", "secret", "token"];

/// Logs one line per request and one per response through the `log` facade.
///
/// Query parameters carrying credentials are replaced with `[REDACTED]`
/// before anything is logged.
#[derive(Clone)]
pub struct LoggingMiddleware {
    verbose: bool,
    sensitive: Arc<Vec<String>>,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self {
            verbose: false,
            sensitive: Arc::new(SENSITIVE_PARAMS.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Log at `debug` instead of `info`, with status text.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Also redact the query parameter `name` (case-insensitive).
    pub fn redact_param(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.sensitive).push(name.into());
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
            sensitive: Arc::clone(&self.sensitive),
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
    sensitive: Arc<Vec<String>>,
}

fn redact_url(url: &Url, sensitive: &[String]) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if sensitive.iter().any(|s| key.eq_ignore_ascii_case(s)) {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

fn log_request(method: &str, url: &str, verbose: bool) {
    if verbose {
        debug!("[wxacode] >>> {} {}", method, url);
    } else {
        info!("[wxacode] {} {}", method, url);
    }
}

fn log_response(status: StatusCode, duration: Duration, verbose: bool) {
    if verbose {
        debug!(
            "[wxacode] <<< {} {} ({:?})",
            status.as_u16(),
            status_text(status),
            duration
        );
    } else {
        info!("[wxacode] {} ({:?})", status.as_u16(), duration);
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = redact_url(req.url(), &self.sensitive);
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            log_request(&method, &url, verbose);

            let start = Instant::now();
            let response = match inner.call(req).await {
                Ok(response) => response,
                Err(e) => {
                    info!("[wxacode] {} {} failed: {}", method, url, e);
                    return Err(e);
                }
            };

            log_response(response.status(), start.elapsed(), verbose);

            Ok(response)
        })
    }
}
