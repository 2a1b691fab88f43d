//! HTTP endpoint serving scrapes and the landing page.
//!
//! Every request to the configured metrics path triggers one collection. Any
//! other path serves a small HTML page linking to the metrics.

use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use prusa_connect_client::TelemetrySource;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, warn};

use crate::collector::TelemetryCollector;
use crate::render;

/// Errors that stop the metrics server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The listener stopped accepting connections.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
}

/// Bind the metrics listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serve scrapes on `listener` until accepting fails.
///
/// Each connection is handled on its own task, so scrapes may run
/// concurrently against the shared collector.
pub async fn serve<S>(
    listener: TcpListener,
    collector: Arc<TelemetryCollector<S>>,
    metrics_path: String,
) -> Result<(), ServeError>
where
    S: TelemetrySource + 'static,
{
    let metrics_path: Arc<str> = metrics_path.into();

    loop {
        let (stream, peer) = listener.accept().await.map_err(ServeError::Accept)?;
        let io = TokioIo::new(stream);

        let collector = collector.clone();
        let metrics_path = metrics_path.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let collector = collector.clone();
                let metrics_path = metrics_path.clone();

                async move { handle_request(req, &metrics_path, &collector).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%peer, error = %e, "metrics connection error");
            }
        });
    }
}

async fn handle_request<S: TelemetrySource>(
    req: Request<hyper::body::Incoming>,
    metrics_path: &str,
    collector: &TelemetryCollector<S>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();
    debug!(method = %req.method(), path, "http request");

    if path == metrics_path {
        let body = collector.scrape().await;
        Ok(response(render::CONTENT_TYPE, body))
    } else {
        Ok(response("text/html; charset=utf-8", landing_page(metrics_path)))
    }
}

fn response(content_type: &'static str, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// HTML served on every path other than the metrics path.
pub fn landing_page(metrics_path: &str) -> String {
    format!(
        r#"<html>
<head><title>Prusa Connect Exporter</title></head>
<body>
<h1>Prusa Connect Exporter</h1>
<p><a href="{}">Metrics</a></p>
</body>
</html>
"#,
        metrics_path
    )
}
