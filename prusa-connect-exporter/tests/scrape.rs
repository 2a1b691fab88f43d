//! End-to-end scrapes against a fake printer.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use prusa_connect_client::TelemetryClient;
use prusa_connect_exporter::{server, Samples, TelemetryCollector};

const TELEMETRY: &str = r#"{"temp_nozzle":210,"temp_bed":60,"pos_z_mm":12.5,"printing_speed":100,"flow_factor":95,"progress":42,"print_dur":"2h 5m","time_est":"1500"}"#;

/// Start a fake printer answering `/api/telemetry` with `body`.
async fn start_printer(status: StatusCode, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<hyper::body::Incoming>| async move {
                    let response = if req.uri().path() == "/api/telemetry" {
                        Response::builder()
                            .status(status)
                            .header("Content-Type", "application/json")
                            .body(Full::new(Bytes::from(body)))
                            .unwrap()
                    } else {
                        Response::builder()
                            .status(StatusCode::NOT_FOUND)
                            .body(Full::new(Bytes::new()))
                            .unwrap()
                    };
                    Ok::<_, Infallible>(response)
                });

                let _ = http1::Builder::new().serve_connection(io, service).await;
            });
        }
    });

    addr
}

/// Start the exporter pointed at `upstream` and return its address.
async fn start_exporter(upstream: &str, metrics_path: &str) -> SocketAddr {
    let client = TelemetryClient::builder().endpoint(upstream).build().unwrap();
    let collector = Arc::new(TelemetryCollector::new(client));

    let listener = server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let path = metrics_path.to_string();

    tokio::spawn(async move {
        let _ = server::serve(listener, collector, path).await;
    });

    addr
}

/// An address with nothing listening on it.
async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

#[tokio::test]
async fn collect_from_printer() {
    let printer = start_printer(StatusCode::OK, TELEMETRY).await;
    let client = TelemetryClient::builder()
        .endpoint(format!("http://{}", printer))
        .build()
        .unwrap();
    let collector = TelemetryCollector::new(client);

    let mut samples = Samples::new();
    assert_eq!(collector.collect(&mut samples).await, 8);

    let values: Vec<_> = samples.iter().map(|(d, v)| (d.name, *v)).collect();
    assert_eq!(
        values,
        vec![
            ("prusa_connect_temp_nozzle", 210.0),
            ("prusa_connect_temp_bed", 60.0),
            ("prusa_connect_z_pozition", 12.5),
            ("prusa_connect_printing_speed", 100.0),
            ("prusa_connect_flow_factor", 95.0),
            ("prusa_connect_progress", 42.0),
            ("prusa_connect_print_duration", 7500.0),
            ("prusa_connect_time_estimated", 1500.0),
        ]
    );
}

#[tokio::test]
async fn scrape_metrics_endpoint() {
    let printer = start_printer(StatusCode::OK, TELEMETRY).await;
    let exporter = start_exporter(&format!("http://{}", printer), "/metrics").await;

    let response = reqwest::get(format!("http://{}/metrics", exporter))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; version=0.0.4; charset=utf-8"
    );

    let body = response.text().await.unwrap();
    assert!(body.contains("# HELP prusa_connect_temp_nozzle Temperature of the print nozzle in celsius\n"));
    assert!(body.contains("# TYPE prusa_connect_temp_nozzle gauge\n"));
    assert!(body.contains("prusa_connect_temp_nozzle 210\n"));
    assert!(body.contains("prusa_connect_z_pozition 12.5\n"));
    assert!(body.contains("prusa_connect_print_duration 7500\n"));
    assert!(body.contains("prusa_connect_time_estimated 1500\n"));
}

#[tokio::test]
async fn scrape_with_malformed_duration() {
    let printer = start_printer(
        StatusCode::OK,
        r#"{"temp_nozzle":215,"print_dur":"1 hour","time_est":"60"}"#,
    )
    .await;
    let exporter = start_exporter(&format!("http://{}", printer), "/metrics").await;

    let body = reqwest::get(format!("http://{}/metrics", exporter))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("prusa_connect_temp_nozzle 215\n"));
    assert!(body.contains("prusa_connect_time_estimated 60\n"));
    assert!(!body.contains("prusa_connect_print_duration"));
}

#[tokio::test]
async fn scrape_during_printer_outage() {
    let upstream = dead_address().await;
    let exporter = start_exporter(&format!("http://{}", upstream), "/metrics").await;

    let response = reqwest::get(format!("http://{}/metrics", exporter))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn scrape_with_undecodable_telemetry() {
    let printer = start_printer(StatusCode::OK, "<html>login required</html>").await;
    let exporter = start_exporter(&format!("http://{}", printer), "/metrics").await;

    let response = reqwest::get(format!("http://{}/metrics", exporter))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn scrape_with_printer_error_status() {
    let printer = start_printer(StatusCode::INTERNAL_SERVER_ERROR, TELEMETRY).await;
    let exporter = start_exporter(&format!("http://{}", printer), "/metrics").await;

    let body = reqwest::get(format!("http://{}/metrics", exporter))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "");
}

#[tokio::test]
async fn custom_metrics_path_and_landing_page() {
    let printer = start_printer(StatusCode::OK, TELEMETRY).await;
    let exporter = start_exporter(&format!("http://{}", printer), "/prusa").await;

    let metrics = reqwest::get(format!("http://{}/prusa", exporter))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("prusa_connect_progress 42\n"));

    for path in ["/", "/metrics", "/anything/else"] {
        let response = reqwest::get(format!("http://{}{}", exporter, path))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );

        let page = response.text().await.unwrap();
        assert!(page.contains(r#"<a href="/prusa">Metrics</a>"#));
    }
}

#[tokio::test]
async fn concurrent_scrapes() {
    let printer = start_printer(StatusCode::OK, TELEMETRY).await;
    let exporter = start_exporter(&format!("http://{}", printer), "/metrics").await;
    let url = format!("http://{}/metrics", exporter);

    let scrapes: Vec<_> = (0..10)
        .map(|_| {
            let url = url.clone();
            tokio::spawn(async move { reqwest::get(url).await.unwrap().text().await.unwrap() })
        })
        .collect();

    for scrape in scrapes {
        let body = scrape.await.unwrap();
        assert!(body.contains("prusa_connect_flow_factor 95\n"));
    }
}
