//! Minimal plinth site: home/about/contact pages assembled from fragments.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example site
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/page/about
//!   curl http://localhost:3000/page/contact
//!   curl http://localhost:3000/no-such-page      # deterministic 404 page
//!
//! Reads `plinth.toml` from the working directory when present; falls back
//! to defaults otherwise. Configure `[database]` to bring up the MySQL
//! wrapper; startup fails fast if the database is unreachable.

use plinth::{App, Config, Db, Models, PageController, Pages, Router, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::load("plinth.toml") {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("plinth.toml not loaded ({e}), using defaults");
            Config::default()
        }
    };

    let mut models = Models::new().register("page", Pages::new(&config.site));

    // The database is optional for a static site; when configured it must
    // actually be reachable before we accept traffic.
    if let Some(db_config) = &config.database {
        match Db::connect(db_config).await {
            Ok(db) => models = models.register("db", db),
            Err(e) => {
                eprintln!("cannot start: {e}");
                std::process::exit(1);
            }
        }
    }

    let router = Router::new(&config.site).mount("page", PageController::new());

    let app = App::new(config.site, models, router);
    Server::bind("0.0.0.0:3000").serve(app).await.expect("server error");
}
