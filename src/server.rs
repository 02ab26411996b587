//! HTTP server and graceful shutdown.
//!
//! The server owns nothing application-specific: it accepts connections,
//! hands each request's path to the [`App`], and writes back the one HTML
//! response the MVC chain produces.
//!
//! On SIGTERM or Ctrl-C it stops accepting, lets every in-flight
//! connection task run to completion, then returns from [`Server::serve`]
//! so `main` can exit cleanly.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::SiteConfig;
use crate::controller::Context;
use crate::error::Error;
use crate::model::Models;
use crate::response::Response;
use crate::router::Router;

/// The assembled application: router plus the site-wide collaborators every
/// request context is built from.
pub struct App {
    router: Router,
    site: Arc<SiteConfig>,
    models: Arc<Models>,
}

impl App {
    pub fn new(site: SiteConfig, models: Models, router: Router) -> Self {
        Self { router, site: Arc::new(site), models: Arc::new(models) }
    }

    /// Runs one request through the full chain: resolve, dispatch, render.
    ///
    /// Total like the router underneath it: every path produces a
    /// response. Public so the chain can be driven without a socket.
    pub async fn handle(&self, raw_path: &str) -> Response {
        let route = self.router.resolve(raw_path);
        let cx = Context::new(Arc::clone(&self.site), Arc::clone(&self.models));
        let errors = cx.errors().clone();

        let response = self.router.dispatch(route, cx).await;

        if !errors.is_empty() {
            tracing::warn!(
                path = raw_path,
                count = errors.len(),
                "request completed with recorded errors"
            );
        }
        response
    }
}

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `app`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, app: App) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // Arc so concurrent connection tasks share one routing table and
        // model registry.
        let app = Arc::new(app);

        info!(addr = %self.addr, "plinth listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` makes select! check arms top-to-bottom. Shutdown
                // is first so a SIGTERM immediately stops accepting new
                // connections, even if more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let app = Arc::clone(&app);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection, not
                        // once per connection.
                        let svc = service_fn(move |req| {
                            let app = Arc::clone(&app);
                            async move { route_request(app, req).await }
                        });

                        // `auto::Builder` handles both HTTP/1.1 and HTTP/2,
                        // whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not
                // grow without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection before returning.
        while tasks.join_next().await.is_some() {}

        info!("plinth stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Hot path: one request in, one response out.
///
/// The error type is [`Infallible`](std::convert::Infallible) — routing is
/// total and dispatch degrades internally, so hyper never sees an error.
async fn route_request(
    app: Arc<App>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    // The path alone drives routing; the method is deliberately ignored.
    // Every page action is a read.
    let path = req.uri().path().to_owned();
    Ok(app.handle(&path).await.into_http())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT (Ctrl-C, for local
/// dev). On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` never resolves — on non-Unix platforms the SIGTERM arm
    // is effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
