//! # Converter Registry
//!
//! A [`Registry`] maps a Rust type to the converter that handles it. Registries are persistent
//! values: [`Registry::register`] and [`Registry::merge`] return a new registry and leave their
//! inputs untouched, so a registry can be shared freely between facades and threads.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;
use tracing::debug;

use crate::converter::Converter;
use crate::descriptor::Descriptor;
use crate::error::WeftError;
use crate::polymorphic::Hierarchy;
use crate::type_key::TypeKey;

/// Type-erased view of a registered converter.
pub trait ErasedConverter: Send + Sync {
    fn type_key(&self) -> TypeKey;
    fn descriptor(&self) -> &Descriptor;
    fn hierarchy(&self) -> Option<Hierarchy>;
    fn as_any(&self) -> &dyn Any;
}

struct Registered<T: 'static> {
    key: TypeKey,
    converter: Arc<dyn Converter<Value = T>>,
}

impl<T: 'static> ErasedConverter for Registered<T> {
    fn type_key(&self) -> TypeKey {
        self.key
    }

    fn descriptor(&self) -> &Descriptor {
        self.converter.descriptor()
    }

    fn hierarchy(&self) -> Option<Hierarchy> {
        self.converter.hierarchy()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<FxHashMap<TypeId, Arc<dyn ErasedConverter>>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.type_key().name()).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("entries", &names).finish()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a registry where `converter` handles `C::Value`, replacing any earlier entry.
    #[must_use]
    pub fn register<C: Converter>(&self, converter: C) -> Self {
        self.register_shared::<C::Value>(Arc::new(converter))
    }

    /// [`Registry::register`] for a converter that is already shared.
    #[must_use]
    pub fn register_shared<T: 'static>(&self, converter: Arc<dyn Converter<Value = T>>) -> Self {
        let key = TypeKey::of::<T>();
        let mut entries = (*self.entries).clone();
        entries.insert(key.id(), Arc::new(Registered { key, converter }));
        Self { entries: Arc::new(entries) }
    }

    /// Union of both registries; on a key present in both, `other` wins.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut entries = (*self.entries).clone();
        for (id, entry) in other.entries.iter() {
            if entries.insert(*id, Arc::clone(entry)).is_some() {
                debug!(type_name = entry.type_key().name(), "Registry entry overridden by merge");
            }
        }
        Self { entries: Arc::new(entries) }
    }

    #[must_use]
    pub fn resolve<T: 'static>(&self) -> Option<Arc<dyn Converter<Value = T>>> {
        let entry = self.entries.get(&TypeId::of::<T>())?;
        entry
            .as_any()
            .downcast_ref::<Registered<T>>()
            .map(|registered| Arc::clone(&registered.converter))
    }

    /// Type-erased lookup by key.
    #[must_use]
    pub fn resolve_key(&self, key: &TypeKey) -> Option<&dyn ErasedConverter> {
        self.entries.get(&key.id()).map(|entry| &**entry)
    }

    /// Like [`Registry::resolve`], failing with the requested type name.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::NoConverterFound`] if no converter is registered for `T`.
    pub fn resolve_contextual_or_default<T: 'static>(
        &self,
    ) -> Result<Arc<dyn Converter<Value = T>>, WeftError> {
        self.resolve::<T>().ok_or_else(|| WeftError::NoConverterFound {
            type_name: TypeKey::of::<T>().name().into(),
            context: None,
        })
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &(dyn ErasedConverter + 'static)> {
        self.entries.values().map(|entry| &**entry)
    }

    /// Subtype tables of every registered polymorphic converter.
    pub fn hierarchies(&self) -> impl Iterator<Item = Hierarchy> + '_ {
        self.entries.values().filter_map(|entry| entry.hierarchy())
    }
}
