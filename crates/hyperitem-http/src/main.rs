use std::net::SocketAddr;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use hyperitem_http::{CollectionHttp, MemoryCollection, ServerConfig};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};

async fn handle(
    req: Request<Incoming>,
    peer: SocketAddr,
    handler: Arc<CollectionHttp>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let (mut parts, body) = req.into_parts();
    let body = body.collect().await?.to_bytes().to_vec();
    parts.extensions.insert(peer);
    let resp = handler.handle(Request::from_parts(parts, body));
    let (parts, body) = resp.into_parts();
    Ok(Response::from_parts(parts, Full::new(Bytes::from(body))))
}

async fn shutdown_signal() {
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable, shutdown only by termination");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });

    let handler = Arc::new(CollectionHttp::new(
        config.collection.clone(),
        config.page_size,
        MemoryCollection::new(),
    ));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .unwrap_or_else(|e| {
            error!(addr = %config.addr, error = %e, "failed to bind");
            std::process::exit(1);
        });

    info!(
        addr = %config.addr,
        collection = %config.collection,
        page_size = config.page_size,
        "hyperitem-server listening"
    );

    let http = http1::Builder::new();
    let graceful = GracefulShutdown::new();
    let mut signal = pin!(shutdown_signal());

    loop {
        tokio::select! {
            Ok((stream, peer)) = listener.accept() => {
                let io = TokioIo::new(stream);
                let handler = Arc::clone(&handler);
                let conn = http.serve_connection(io, service_fn(move |req| {
                    handle(req, peer, Arc::clone(&handler))
                }));
                let fut = graceful.watch(conn);
                tokio::spawn(async move {
                    if let Err(e) = fut.await {
                        warn!(%peer, error = %e, "connection error");
                    }
                });
            }
            _ = &mut signal => {
                info!("shutdown signal received");
                drop(listener);
                break;
            }
        }
    }

    tokio::select! {
        _ = graceful.shutdown() => {
            info!("shutdown complete");
        }
        _ = tokio::time::sleep(Duration::from_secs(10)) => {
            warn!("shutdown timed out after 10s");
        }
    }
}
