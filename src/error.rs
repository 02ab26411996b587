//! Error taxonomy and the request-scoped error list.

use std::sync::{Arc, Mutex};

/// The error type returned by plinth's fallible operations.
///
/// Routing never produces one of these: resolution is total and dispatch
/// degrades to a not-found action. What remains is infrastructure: loading
/// configuration, binding the listener, reaching the database, or asking the
/// model registry for something it does not hold.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolved controller name is not mounted on the router.
    #[error("unknown controller `{0}`")]
    ControllerNotFound(String),

    /// The controller exposes no action under this name.
    #[error("action `{action}` is not invokable on controller `{controller}`")]
    ActionNotInvokable { controller: String, action: String },

    /// No model is registered under this name (or it has a different type).
    #[error("no model registered as `{0}`")]
    ModelNotFound(String),

    /// The database pool could not be built or the health check failed.
    #[error("database connection failed: {0}")]
    DbConnection(#[source] sqlx::Error),

    /// A statement failed after the pool was known to be healthy.
    #[error("database query failed: {0}")]
    DbQuery(#[source] sqlx::Error),

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-scoped list of user-facing error messages.
///
/// Database and model failures do not abort page rendering; they are logged
/// server-side and recorded here so the controller can decide what, if
/// anything, to show. Cloning the handle shares the underlying list.
#[derive(Clone, Debug, Default)]
pub struct ErrorList(Arc<Mutex<Vec<String>>>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message.
    pub fn record(&self, message: impl Into<String>) {
        self.lock().push(message.into());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies out the recorded messages, leaving the list intact.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned list still holds every message recorded before the
        // panic; keep serving them.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}
