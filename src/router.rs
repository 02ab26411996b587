//! Segment router.
//!
//! The first path segment names a controller, the second an action, the rest
//! are positional parameters. Resolution is total: every input string —
//! including the empty one — yields exactly one [`Route`]. There is no
//! pattern tree and no registration-time path syntax; the routing table is
//! the controller registry itself.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::controller::{Context, Controller};
use crate::error::Error;
use crate::response::{Response, Status};

/// A resolved request target. Derived per request, never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    pub controller: String,
    pub action: String,
    pub params: Vec<String>,
}

/// The application router: a closed mapping from controller names to
/// controller instances, plus the configured fallbacks.
///
/// Build it once at startup; pass it to [`App::new`](crate::App::new).
/// Each [`Router::mount`] call returns `self` so registrations chain.
pub struct Router {
    controllers: HashMap<String, Arc<dyn Controller>>,
    default_controller: String,
    default_action: String,
    not_found_action: String,
    base_path: Option<String>,
}

impl Router {
    /// Creates a router with the defaults and base path from `site`.
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            controllers: HashMap::new(),
            default_controller: canonical(&site.default_controller),
            default_action: canonical(&site.default_action),
            not_found_action: canonical(&site.not_found_action),
            base_path: site.base_path.clone(),
        }
    }

    /// Mounts a controller under `name`. Returns `self` for chaining.
    ///
    /// The name is canonicalized (dashes become underscores) so it matches
    /// what [`resolve`](Router::resolve) produces from inbound paths.
    pub fn mount(mut self, name: &str, controller: impl Controller) -> Self {
        self.controllers.insert(canonical(name), Arc::new(controller));
        self
    }

    /// Resolves a raw URL path into a [`Route`]. Total and side-effect-free.
    ///
    /// - leading/trailing separators are stripped, the rest split on `/`;
    /// - segments up to and including the configured base-path segment are
    ///   discarded;
    /// - a `?query` suffix on any segment is stripped before use;
    /// - empty controller/action positions fall back to the configured
    ///   defaults;
    /// - an unmounted controller name resolves to the default controller
    ///   with the action forced to the not-found action, parameters kept.
    pub fn resolve(&self, raw_path: &str) -> Route {
        let mut segments: Vec<&str> = raw_path
            .trim_matches('/')
            .split('/')
            .map(|s| s.split('?').next().unwrap_or(""))
            .collect();

        if let Some(base) = &self.base_path {
            if let Some(pos) = segments.iter().position(|s| s == base) {
                segments.drain(..=pos);
            }
        }

        let controller = match segments.first() {
            Some(s) if !s.is_empty() => canonical(s),
            _ => self.default_controller.clone(),
        };
        let action = match segments.get(1) {
            Some(s) if !s.is_empty() => canonical(s),
            _ => self.default_action.clone(),
        };
        let params: Vec<String> =
            segments.iter().skip(2).map(|s| (*s).to_owned()).collect();

        if self.controllers.contains_key(&controller) {
            Route { controller, action, params }
        } else {
            Route {
                controller: self.default_controller.clone(),
                action: self.not_found_action.clone(),
                params,
            }
        }
    }

    /// Invokes the routed action.
    ///
    /// An action the controller does not expose falls back to the
    /// controller's not-found action with the same parameters; a controller
    /// missing from the registry (only possible when the configured default
    /// is not mounted) degrades to a bare 404. Dispatch never errors.
    pub async fn dispatch(&self, route: Route, mut cx: Context) -> Response {
        cx.params = route.params;

        let Some(controller) = self.controllers.get(&route.controller) else {
            tracing::error!(error = %Error::ControllerNotFound(route.controller), "dispatch failed");
            return Response::status(Status::NotFound);
        };

        let action = controller.action(&route.action).or_else(|| {
            tracing::debug!(
                error = %Error::ActionNotInvokable {
                    controller: route.controller.clone(),
                    action: route.action.clone(),
                },
                "falling back to not-found action"
            );
            controller.action(&self.not_found_action)
        });

        match action {
            Some(action) => action.call(cx).await,
            None => Response::status(Status::NotFound),
        }
    }
}

/// Canonical identifier form: dash-separated names become snake_case.
/// Applied to controller and action names at mount time and at resolve
/// time, so the two always agree.
fn canonical(name: &str) -> String {
    name.replace('-', "_")
}
