//! The controller contract and the request-scoped [`Context`].

use std::sync::Arc;

use crate::action::BoxedAction;
use crate::config::SiteConfig;
use crate::error::ErrorList;
use crate::model::Models;
use crate::view::View;

/// A named table of actions.
///
/// Controllers are mounted on the [`Router`](crate::Router) under a path
/// name; the second path segment selects an action from this table. The
/// table is closed: no reflective lookup, only what the controller chose to
/// expose. Returning `None` means "not invokable here", which the router
/// turns into a not-found fallback, never an error.
pub trait Controller: Send + Sync + 'static {
    fn action(&self, name: &str) -> Option<BoxedAction>;
}

/// Everything an action gets to see: its positional parameters plus the
/// site-wide collaborators.
///
/// One `Context` is built per request and moved into the dispatched action.
/// Page display state (titles and the like) lives in a
/// [`PageContext`](crate::PageContext) the action builds itself. It is
/// never stamped onto a shared model instance.
pub struct Context {
    pub(crate) params: Vec<String>,
    site: Arc<SiteConfig>,
    models: Arc<Models>,
    errors: ErrorList,
}

impl Context {
    pub(crate) fn new(site: Arc<SiteConfig>, models: Arc<Models>) -> Self {
        Self { params: Vec::new(), site, models, errors: ErrorList::new() }
    }

    /// Positional path parameters, in order of appearance.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the `i`-th positional parameter.
    pub fn param(&self, i: usize) -> Option<&str> {
        self.params.get(i).map(String::as_str)
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// The model registry, the `load_model` half of the controller base.
    pub fn models(&self) -> &Models {
        &self.models
    }

    /// The output view, the `get_view` half of the controller base.
    pub fn view(&self) -> View {
        View::new()
    }

    /// The request's user-facing error list.
    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }
}
