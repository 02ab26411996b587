//! # plinth
//!
//! A minimal MVC page-serving scaffold. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! One inbound path maps to one linear call chain:
//!
//! ```text
//! path → Router::resolve → Controller action → Pages (model) → Localizations → View
//! ```
//!
//! The router is total: every path string — including the empty string —
//! resolves to exactly one `(controller, action)` pair. Unknown controllers
//! and uninvokable actions degrade to a deterministic not-found action.
//! Nothing in the routing layer ever returns an error to the caller.
//!
//! What plinth intentionally skips:
//!
//! - **Sessions, redirects, custom headers** — the core emits one HTML body
//! - **Caching** — fragments are read from disk per request
//! - **Schema management** — [`Db`] runs the SQL it is handed, nothing more
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use plinth::{App, Config, Models, PageController, Pages, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!
//!     let models = Models::new()
//!         .register("page", Pages::new(&config.site));
//!
//!     let router = Router::new(&config.site)
//!         .mount("page", PageController::new());
//!
//!     let app = App::new(config.site, models, router);
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//! ```

mod action;
mod config;
mod controller;
mod db;
mod error;
mod locale;
mod model;
mod page;
mod response;
mod router;
mod server;
mod template;
mod view;

pub use action::Action;
pub use config::{Assembly, Config, DbConfig, SiteConfig};
pub use controller::{Context, Controller};
pub use db::{Db, Row};
pub use error::{Error, ErrorList};
pub use locale::Localizations;
pub use model::Models;
pub use page::PageController;
pub use response::{ContentType, IntoResponse, Response, Status};
pub use router::{Route, Router};
pub use server::{App, Server};
pub use template::{PageContext, Pages};
pub use view::View;
