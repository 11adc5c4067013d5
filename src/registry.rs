use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::binding::{CompleterBinding, CompleterKind, canonical_id};
use crate::completion::AsyncCompleter;
use crate::error::RegistryError;

/// A resolved completer instance
pub type SharedCompleter<T> = Arc<dyn AsyncCompleter<T>>;

type Factory<T> = Arc<dyn Fn() -> anyhow::Result<SharedCompleter<T>> + Send + Sync>;

/// Registry of completer instances for target type T.
///
/// Maps a `(kind, identifier)` pair to a completer instance. A binding
/// that is not shared gets a freshly constructed instance on every
/// [`resolve`](Self::resolve); a shared binding gets the cached instance
/// for its normalized identifier, constructing and caching one on first
/// use. Construction goes through the factory registered for the kind, so
/// a kind that cannot be built surfaces a typed error instead of a silent
/// absence.
///
/// One registry is expected per framework instance, created at startup
/// and [`clear`](Self::clear)ed on reload.
pub struct CompleterRegistry<T = ()> {
    /// Construction capability per completer kind
    factories: RwLock<HashMap<CompleterKind, Factory<T>>>,

    /// Kind -> (canonical identifier -> shared instance)
    shared: RwLock<HashMap<CompleterKind, HashMap<String, SharedCompleter<T>>>>,
}

impl<T> CompleterRegistry<T> {
    /// Create a new empty completer registry
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            shared: RwLock::new(HashMap::new()),
        }
    }

    /// Register the factory used to construct instances of completer
    /// kind C, replacing any previous factory for that kind
    pub async fn register_factory<C, F>(&self, factory: F)
    where
        C: AsyncCompleter<T> + 'static,
        F: Fn() -> anyhow::Result<C> + Send + Sync + 'static,
    {
        let kind = CompleterKind::of::<C>();
        let factory: Factory<T> =
            Arc::new(move || factory().map(|completer| Arc::new(completer) as SharedCompleter<T>));
        self.factories.write().await.insert(kind, factory);
    }

    /// Register a factory that default-constructs completer kind C
    pub async fn register_default<C>(&self)
    where
        C: AsyncCompleter<T> + Default + 'static,
    {
        self.register_factory(|| Ok(C::default())).await;
    }

    /// Register a shared completer instance.
    ///
    /// The instance is stored under its own type and the normalized
    /// identifier (`None` means the default identifier), overwriting any
    /// prior entry at that key. Later shared resolutions for that key
    /// return this instance instead of constructing one.
    pub async fn register<C>(&self, completer: C, id: Option<&str>)
    where
        C: AsyncCompleter<T> + 'static,
    {
        self.register_arc(CompleterKind::of::<C>(), Arc::new(completer), id)
            .await;
    }

    /// Register an already-shared completer instance under an explicit kind
    pub async fn register_arc(
        &self,
        kind: CompleterKind,
        completer: SharedCompleter<T>,
        id: Option<&str>,
    ) {
        let id = canonical_id(id.unwrap_or(""));
        debug!(kind = %kind, id = %id, "registering shared completer");
        self.shared
            .write()
            .await
            .entry(kind)
            .or_default()
            .insert(id, completer);
    }

    /// Remove the shared instance at `(kind, id)` if present; no-op otherwise
    pub async fn unregister(&self, kind: CompleterKind, id: Option<&str>) {
        let id = canonical_id(id.unwrap_or(""));
        let mut shared = self.shared.write().await;
        if let Some(instances) = shared.get_mut(&kind) {
            instances.remove(&id);
        }
    }

    /// Drop every registered and cached shared instance, for all kinds.
    ///
    /// Registered factories are wiring, not cache, and survive.
    pub async fn clear(&self) {
        debug!("clearing shared completer instances");
        self.shared.write().await.clear();
    }

    /// Get a completer instance for the given binding, or create one if
    /// one is not already available to us.
    ///
    /// A non-shared binding always yields a fresh instance the registry
    /// does not retain. A shared binding yields the cached instance for
    /// `(kind, canonical identifier)`, constructing and caching one on
    /// first use; under concurrent first use of one key exactly one
    /// instance is constructed and every caller receives it.
    ///
    /// A failed construction leaves the cache untouched at that key, so a
    /// retry after fixing the factory can succeed.
    pub async fn resolve(
        &self,
        binding: &CompleterBinding,
    ) -> Result<SharedCompleter<T>, RegistryError> {
        let kind = binding.kind();

        if !binding.is_shared() {
            return self.construct(kind).await;
        }

        let id = canonical_id(binding.id());

        {
            let shared = self.shared.read().await;
            if let Some(instance) = shared.get(&kind).and_then(|m| m.get(&id)) {
                trace!(kind = %kind, id = %id, "shared completer cache hit");
                return Ok(Arc::clone(instance));
            }
        }

        // Re-check under the write lock: another task may have won the
        // race between our read and write acquisitions.
        let mut shared = self.shared.write().await;
        if let Some(instance) = shared.get(&kind).and_then(|m| m.get(&id)) {
            return Ok(Arc::clone(instance));
        }

        let instance = self.construct(kind).await?;
        shared
            .entry(kind)
            .or_default()
            .insert(id.clone(), Arc::clone(&instance));
        debug!(kind = %kind, id = %id, "constructed and cached shared completer");

        Ok(instance)
    }

    async fn construct(&self, kind: CompleterKind) -> Result<SharedCompleter<T>, RegistryError> {
        let factory = self
            .factories
            .read()
            .await
            .get(&kind)
            .cloned()
            .ok_or(RegistryError::UnknownKind(kind))?;

        (*factory)().map_err(|source| RegistryError::Construction { kind, source })
    }
}

impl<T> Default for CompleterRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
