use crate::{
    config::ElevatorConfig,
    error::{ElevatorError, Result},
    scheduler::{Elevator, Greedy, Noop},
};
use ahash::AHashMap as HashMap;
use tracing::debug;

/// Builds a fresh policy instance for one device.
pub type Constructor = fn(&ElevatorConfig) -> Result<Box<dyn Elevator + Send>>;

/// Host-owned table of scheduling policies, looked up by name at attach time.
/// Populate it at startup; nothing registers itself implicitly.
pub struct Registry {
    policies: HashMap<&'static str, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Registry holding every policy shipped by this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.policies.insert(Greedy::NAME, greedy);
        registry.policies.insert(Noop::NAME, noop);
        registry
    }

    pub fn register(&mut self, name: &'static str, constructor: Constructor) -> Result<()> {
        if self.policies.contains_key(name) {
            return Err(ElevatorError::DuplicatePolicy(name.to_string()));
        }
        self.policies.insert(name, constructor);
        debug!(policy = name, "registered elevator policy");
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.policies.remove(name).is_some();
        if removed {
            debug!(policy = name, "unregistered elevator policy");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.policies.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn create(&self, name: &str, config: &ElevatorConfig) -> Result<Box<dyn Elevator + Send>> {
        let Some(constructor) = self.policies.get(name) else {
            return Err(ElevatorError::UnknownPolicy(name.to_string()));
        };
        constructor(config)
    }
}

fn greedy(config: &ElevatorConfig) -> Result<Box<dyn Elevator + Send>> {
    Ok(Box::new(Greedy::with_config(config)?))
}

fn noop(config: &ElevatorConfig) -> Result<Box<dyn Elevator + Send>> {
    Ok(Box::new(Noop::with_config(config)?))
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
