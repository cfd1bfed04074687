//! Component factory registry

use super::component::{Component, ComponentKind, Domain};
use std::collections::BTreeMap;
use thiserror::Error;

/// Zero-argument constructor for one component kind
pub type ComponentConstructor = Box<dyn Fn() -> Box<dyn Component>>;

/// Registration errors, raised while a manager is being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The kind already has a constructor
    #[error("component type '{0}' is already registered")]
    Duplicate(ComponentKind),

    /// The kind belongs to another domain's manager
    #[error("component type '{kind}' belongs to the {expected} manager, not {actual}")]
    WrongDomain {
        /// Kind being registered
        kind: ComponentKind,
        /// Domain the kind belongs to
        expected: Domain,
        /// Domain of the registry it was offered to
        actual: Domain,
    },

    /// A manager for this domain already exists
    #[error("a {0} manager is already registered")]
    DuplicateManager(Domain),
}

/// Maps component kinds to constructors for one domain
pub struct ComponentRegistry {
    domain: Domain,
    constructors: BTreeMap<ComponentKind, ComponentConstructor>,
}

impl ComponentRegistry {
    /// Create an empty registry for `domain`
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            constructors: BTreeMap::new(),
        }
    }

    /// Domain this registry serves
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Record a constructor for `kind`
    pub fn register<F>(&mut self, kind: ComponentKind, constructor: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Component> + 'static,
    {
        if kind.domain() != self.domain {
            return Err(RegistryError::WrongDomain {
                kind,
                expected: kind.domain(),
                actual: self.domain,
            });
        }
        if self.constructors.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }
        self.constructors.insert(kind, Box::new(constructor));
        Ok(())
    }

    /// Whether `kind` has a constructor
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.constructors.keys().copied()
    }

    /// Construct a new component of `kind`, if registered
    pub fn create(&self, kind: ComponentKind) -> Option<Box<dyn Component>> {
        self.constructors.get(&kind).map(|constructor| constructor())
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("domain", &self.domain)
            .field("kinds", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
