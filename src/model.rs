//! Model registry.
//!
//! Controllers do not construct their models; they ask the registry by name.
//! The registry is a closed mapping populated at startup, the moral
//! equivalent of dynamic class loading without the dynamism.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;

/// Named, typed model storage.
///
/// ```rust
/// use plinth::{Config, Models, Pages};
///
/// let config = Config::default();
/// let models = Models::new().register("page", Pages::new(&config.site));
///
/// let pages = models.get::<Pages>("page").unwrap();
/// assert!(models.get::<Pages>("missing").is_err());
/// ```
#[derive(Default)]
pub struct Models {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Models {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model under `name`. Returns `self` so registrations chain.
    ///
    /// Registering the same name twice replaces the earlier model.
    pub fn register<M: Send + Sync + 'static>(mut self, name: &str, model: M) -> Self {
        self.entries.insert(name.to_owned(), Arc::new(model));
        self
    }

    /// Looks up the model registered under `name`.
    ///
    /// An unknown name, or a name registered with a different type, yields
    /// [`Error::ModelNotFound`]. Callers degrade; they never abort the
    /// response over a missing model.
    pub fn get<M: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<M>, Error> {
        self.entries
            .get(name)
            .and_then(|entry| Arc::clone(entry).downcast::<M>().ok())
            .ok_or_else(|| Error::ModelNotFound(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        value: u32,
    }

    #[test]
    fn registered_model_is_returned() {
        let models = Models::new().register("fake", Fake { value: 7 });
        assert_eq!(models.get::<Fake>("fake").unwrap().value, 7);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let models = Models::new();
        assert!(matches!(
            models.get::<Fake>("fake"),
            Err(Error::ModelNotFound(name)) if name == "fake"
        ));
    }

    #[test]
    fn wrong_type_is_not_found() {
        struct Other;
        let models = Models::new().register("fake", Other);
        assert!(models.get::<Fake>("fake").is_err());
    }

    #[test]
    fn re_registration_replaces() {
        let models = Models::new()
            .register("fake", Fake { value: 1 })
            .register("fake", Fake { value: 2 });
        assert_eq!(models.get::<Fake>("fake").unwrap().value, 2);
    }
}
