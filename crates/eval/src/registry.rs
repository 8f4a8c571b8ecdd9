//! Operation registry: operation name → handler function.

use std::collections::HashMap;

use codescape_core::Value;

use crate::error::PlacementError;
use crate::handlers;
use crate::placement::Outcome;
use crate::world::World;

/// A placement handler. Arguments arrive in signature order.
pub type Handler = fn(&mut World, &[Value]) -> Result<Outcome, PlacementError>;

#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<String, Handler>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers for every operation in `Catalog::builtin()`.
    pub fn builtin() -> Self {
        let mut registry = Registry::new();
        registry.register("build_house", handlers::build_house);
        registry.register("build_park", handlers::build_park);
        registry.register("build_pool", handlers::build_pool);
        registry.register("build_library", handlers::build_library);
        registry.register("build_school", handlers::build_school);
        registry.register("build_hospital", handlers::build_hospital);
        registry.register("build_shop", handlers::build_shop);
        registry.register("build_road", handlers::build_road);
        registry.register("build_power_tower", handlers::build_power_tower);
        registry.register("build_fountain", handlers::build_fountain);
        registry.register("build_apartment", handlers::build_apartment);
        registry.register("clear_all", handlers::clear_all);
        registry
    }

    /// Bind `name` to `handler`, replacing any previous binding.
    pub fn register(&mut self, name: &str, handler: Handler) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
