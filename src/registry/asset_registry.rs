// ============================================================================
// Asset Registry
// Cached, de-duplicated resolution of asset identifiers to descriptors
// ============================================================================

use super::config::Network;
use crate::domain::{AssetDescriptor, AssetId, AssetRef};
use crate::error::{Error, Result};
use crate::interfaces::{AssetSource, NoOpEventHandler, RegistryEvent, RegistryEventHandler};
use crate::numeric::MAX_PRECISION;
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type FetchOutcome = Result<Arc<AssetDescriptor>>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

/// Mutable registry state. Never locked across an await point.
#[derive(Default)]
struct RegistryState {
    /// Resolved descriptors; first writer wins
    cache: HashMap<AssetId, Arc<AssetDescriptor>>,

    /// One pending fetch per unresolved identifier
    in_flight: HashMap<AssetId, SharedFetch>,
}

/// Resolves asset identifiers to descriptors.
///
/// Resolved descriptors are cached, so every caller asking for the same
/// identifier gets the same `Arc`. Concurrent requests for an identifier
/// that is not cached yet share a single fetch against the [`AssetSource`].
/// Failed fetches are not cached; the next request issues a fresh fetch.
pub struct AssetRegistry {
    /// Ledger network this registry serves
    network: Network,

    /// Largest precision accepted from any descriptor
    max_precision: u32,

    /// Backing lookup for cache misses
    source: Arc<dyn AssetSource>,

    /// Cache and in-flight fetches
    state: Arc<Mutex<RegistryState>>,

    /// Event handler for resolution events
    event_handler: Arc<dyn RegistryEventHandler>,

    /// Number of fetches issued to the source
    fetch_counter: AtomicU64,
}

impl AssetRegistry {
    /// Create a registry with an empty cache on the default network
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self::from_parts(
            Network::default(),
            MAX_PRECISION,
            source,
            Arc::new(NoOpEventHandler),
        )
    }

    pub(crate) fn from_parts(
        network: Network,
        max_precision: u32,
        source: Arc<dyn AssetSource>,
        event_handler: Arc<dyn RegistryEventHandler>,
    ) -> Self {
        tracing::debug!(
            network = ?network,
            source = source.name(),
            "creating asset registry"
        );

        Self {
            network,
            max_precision,
            source,
            state: Arc::new(Mutex::new(RegistryState::default())),
            event_handler,
            fetch_counter: AtomicU64::new(0),
        }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve an identifier or accept a caller-supplied descriptor.
    ///
    /// A descriptor is cached without contacting the source. If the
    /// identifier is already cached, the cached descriptor is returned
    /// instead.
    ///
    /// # Errors
    /// - `AssetNotFound` if the source does not know the identifier
    /// - `InvalidArgument` for an empty identifier or a precision above the
    ///   configured maximum
    /// - `Source` for any other source failure
    pub async fn resolve(&self, asset: impl Into<AssetRef>) -> Result<Arc<AssetDescriptor>> {
        match asset.into() {
            AssetRef::Descriptor(descriptor) => self.accept(descriptor),
            AssetRef::Identifier(id) => self.resolve_id(id).await,
        }
    }

    async fn resolve_id(&self, id: AssetId) -> Result<Arc<AssetDescriptor>> {
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "asset identifier cannot be empty".to_string(),
            ));
        }

        let (fetch, joined) = {
            let mut state = self.state.lock();

            if let Some(cached) = state.cache.get(&id) {
                let cached = Arc::clone(cached);
                drop(state);
                tracing::trace!(asset_id = %id, "asset cache hit");
                self.emit(RegistryEvent::CacheHit {
                    asset_id: id,
                    timestamp: Utc::now(),
                });
                return Ok(cached);
            }

            match state.in_flight.get(&id) {
                Some(pending) => (pending.clone(), true),
                None => {
                    let pending = self.start_fetch(id.clone());
                    state.in_flight.insert(id.clone(), pending.clone());
                    (pending, false)
                },
            }
        };

        if joined {
            tracing::debug!(asset_id = %id, "joining in-flight asset fetch");
            self.emit(RegistryEvent::FetchJoined {
                asset_id: id,
                timestamp: Utc::now(),
            });
        } else {
            self.fetch_counter.fetch_add(1, Ordering::AcqRel);
            tracing::debug!(asset_id = %id, source = self.source.name(), "fetching asset");
            self.emit(RegistryEvent::FetchStarted {
                asset_id: id,
                timestamp: Utc::now(),
            });
        }

        fetch.await
    }

    /// Build the shared fetch for `id`.
    ///
    /// The future settles the registry state itself, so the outcome is
    /// recorded exactly once no matter how many callers await it. It only
    /// holds a weak handle on the state that stores it; a fetch whose
    /// waiters all went away stays pending until the next `resolve` of the
    /// same identifier joins it, or is dropped with the registry.
    fn start_fetch(&self, id: AssetId) -> SharedFetch {
        let source = Arc::clone(&self.source);
        let state: Weak<Mutex<RegistryState>> = Arc::downgrade(&self.state);
        let handler = Arc::clone(&self.event_handler);
        let max_precision = self.max_precision;

        async move {
            let fetched = source
                .fetch(&id)
                .await
                .and_then(|descriptor| check_fetched(&id, descriptor, max_precision));

            let outcome = match state.upgrade() {
                Some(state) => {
                    let mut state = state.lock();
                    state.in_flight.remove(&id);
                    fetched.map(|descriptor| {
                        Arc::clone(
                            state
                                .cache
                                .entry(id.clone())
                                .or_insert_with(|| Arc::new(descriptor)),
                        )
                    })
                },
                // registry is gone; nothing left to settle
                None => fetched.map(Arc::new),
            };

            match &outcome {
                Ok(descriptor) => {
                    tracing::info!(
                        asset_id = %id,
                        precision = descriptor.precision(),
                        "asset resolved"
                    );
                    handler.on_event(RegistryEvent::Resolved {
                        asset_id: id,
                        precision: descriptor.precision(),
                        timestamp: Utc::now(),
                    });
                },
                Err(err) => {
                    tracing::warn!(asset_id = %id, error = %err, "asset fetch failed");
                    handler.on_event(RegistryEvent::FetchFailed {
                        asset_id: id,
                        reason: err.to_string(),
                        timestamp: Utc::now(),
                    });
                },
            }

            outcome
        }
        .boxed()
        .shared()
    }

    /// Cache a descriptor without a fetch, keeping any existing entry.
    fn accept(&self, descriptor: Arc<AssetDescriptor>) -> Result<Arc<AssetDescriptor>> {
        if descriptor.precision() > self.max_precision {
            return Err(Error::InvalidArgument(format!(
                "precision {} of asset {} exceeds {}",
                descriptor.precision(),
                descriptor.id(),
                self.max_precision
            )));
        }

        let (stored, inserted) = {
            let mut state = self.state.lock();
            match state.cache.get(descriptor.id()) {
                Some(existing) => (Arc::clone(existing), false),
                None => {
                    state
                        .cache
                        .insert(descriptor.id().clone(), Arc::clone(&descriptor));
                    (descriptor, true)
                },
            }
        };

        if inserted {
            tracing::debug!(asset_id = %stored.id(), "asset descriptor seeded");
            self.emit(RegistryEvent::Seeded {
                asset_id: stored.id().clone(),
                timestamp: Utc::now(),
            });
        }

        Ok(stored)
    }

    /// Seed the cache with a descriptor.
    ///
    /// Returns the cached descriptor, which is the existing one if the
    /// identifier was already known.
    pub fn insert(&self, descriptor: AssetDescriptor) -> Result<Arc<AssetDescriptor>> {
        self.accept(Arc::new(descriptor))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Cached descriptor for `id`, without fetching
    pub fn get_cached(&self, id: &AssetId) -> Option<Arc<AssetDescriptor>> {
        self.state.lock().cache.get(id).cloned()
    }

    pub fn is_cached(&self, id: &AssetId) -> bool {
        self.state.lock().cache.contains_key(id)
    }

    /// Number of cached descriptors
    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().cache.is_empty()
    }

    /// Number of fetches currently pending
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight.len()
    }

    /// Total fetches issued to the source since creation
    pub fn fetches_issued(&self) -> u64 {
        self.fetch_counter.load(Ordering::Acquire)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn max_precision(&self) -> u32 {
        self.max_precision
    }

    #[inline]
    fn emit(&self, event: RegistryEvent) {
        self.event_handler.on_event(event);
    }
}

/// Reject descriptors that do not answer the question that was asked.
fn check_fetched(
    requested: &AssetId,
    descriptor: AssetDescriptor,
    max_precision: u32,
) -> Result<AssetDescriptor> {
    if descriptor.id() != requested {
        return Err(Error::Source(format!(
            "source returned asset {} for {}",
            descriptor.id(),
            requested
        )));
    }
    if descriptor.precision() > max_precision {
        return Err(Error::Source(format!(
            "asset {} has precision {} above {}",
            requested,
            descriptor.precision(),
            max_precision
        )));
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::future::join_all;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Source whose table can be changed between fetches and that counts
    /// every fetch it serves.
    #[derive(Default)]
    struct CountingSource {
        assets: Mutex<HashMap<AssetId, AssetDescriptor>>,
        fetches: AtomicUsize,
        delay: Duration,
    }

    impl CountingSource {
        fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }

        fn add(&self, descriptor: AssetDescriptor) {
            self.assets
                .lock()
                .insert(descriptor.id().clone(), descriptor);
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssetSource for CountingSource {
        async fn fetch(&self, id: &AssetId) -> Result<AssetDescriptor> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.assets
                .lock()
                .get(id)
                .cloned()
                .ok_or_else(|| Error::AssetNotFound {
                    asset_id: id.clone(),
                })
        }
    }

    /// Source that never answers.
    struct StalledSource;

    #[async_trait]
    impl AssetSource for StalledSource {
        async fn fetch(&self, _id: &AssetId) -> Result<AssetDescriptor> {
            futures::future::pending::<Result<AssetDescriptor>>().await
        }
    }

    /// Source that answers every request with the native asset.
    struct WrongIdSource;

    #[async_trait]
    impl AssetSource for WrongIdSource {
        async fn fetch(&self, _id: &AssetId) -> Result<AssetDescriptor> {
            Ok(AssetDescriptor::native())
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<RegistryEvent>>,
    }

    impl RegistryEventHandler for RecordingHandler {
        fn on_event(&self, event: RegistryEvent) {
            self.events.lock().push(event);
        }
    }

    fn four() -> AssetDescriptor {
        AssetDescriptor::new("FOUR", "Four Precision Token", 4).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_caches_descriptor() {
        let source = Arc::new(CountingSource::default());
        source.add(four());
        let registry = AssetRegistry::new(source.clone());

        let first = registry.resolve("FOUR").await.unwrap();
        let second = registry.resolve("FOUR").await.unwrap();

        assert_eq!(first.precision(), 4);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetches(), 1);
        assert_eq!(registry.fetches_issued(), 1);
        assert!(registry.is_cached(&AssetId::from("FOUR")));
        assert_eq!(registry.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_fetch() {
        let source = Arc::new(CountingSource::with_delay(Duration::from_millis(20)));
        source.add(four());
        let registry = AssetRegistry::new(source.clone());

        let results = join_all((0..16).map(|_| registry.resolve("FOUR"))).await;

        assert_eq!(source.fetches(), 1);
        let first = results[0].as_ref().unwrap();
        for result in &results {
            assert!(Arc::ptr_eq(first, result.as_ref().unwrap()));
        }
        assert_eq!(registry.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_different_identifiers_fetch_independently() {
        let source = Arc::new(CountingSource::with_delay(Duration::from_millis(5)));
        source.add(four());
        source.add(AssetDescriptor::native());
        let registry = AssetRegistry::new(source.clone());

        let (a, b) = futures::join!(registry.resolve("FOUR"), registry.resolve("WAVES"));

        assert_eq!(a.unwrap().precision(), 4);
        assert_eq!(b.unwrap().precision(), 8);
        assert_eq!(source.fetches(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_shared_and_not_cached() {
        let source = Arc::new(CountingSource::with_delay(Duration::from_millis(10)));
        let registry = AssetRegistry::new(source.clone());

        let results = join_all((0..4).map(|_| registry.resolve("FOUR"))).await;
        assert_eq!(source.fetches(), 1);
        for result in results {
            assert_eq!(
                result.unwrap_err(),
                Error::AssetNotFound {
                    asset_id: AssetId::from("FOUR")
                }
            );
        }
        assert!(!registry.is_cached(&AssetId::from("FOUR")));
        assert_eq!(registry.in_flight(), 0);

        // the source catches up; a retry issues a fresh fetch
        source.add(four());
        let resolved = registry.resolve("FOUR").await.unwrap();
        assert_eq!(resolved.precision(), 4);
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_fetch_released_with_registry() {
        let registry = AssetRegistry::new(Arc::new(StalledSource));

        let mut waiter = Box::pin(registry.resolve("FOUR"));
        assert!(futures::poll!(waiter.as_mut()).is_pending());
        assert_eq!(registry.in_flight(), 1);

        let state = Arc::downgrade(&registry.state);
        drop(waiter);
        assert_eq!(registry.in_flight(), 1);

        drop(registry);
        assert!(state.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_descriptor_input_is_cached_without_fetch() {
        let source = Arc::new(CountingSource::default());
        let registry = AssetRegistry::new(source.clone());

        let seeded = registry.resolve(four()).await.unwrap();
        let resolved = registry.resolve("FOUR").await.unwrap();

        assert!(Arc::ptr_eq(&seeded, &resolved));
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn test_first_descriptor_wins() {
        let registry = AssetRegistry::new(Arc::new(CountingSource::default()));

        let first = registry.insert(four()).unwrap();
        let again = registry
            .resolve(AssetDescriptor::new("FOUR", "Impostor", 2).unwrap())
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.precision(), 4);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_mismatched_descriptor_rejected() {
        let registry = AssetRegistry::new(Arc::new(WrongIdSource));

        let err = registry.resolve("FOUR").await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_precision_above_maximum_rejected() {
        let source = Arc::new(CountingSource::default());
        source.add(AssetDescriptor::native());
        let registry =
            AssetRegistry::from_parts(Network::Testnet, 4, source, Arc::new(NoOpEventHandler));

        assert!(matches!(
            registry.resolve("WAVES").await,
            Err(Error::Source(_))
        ));
        assert!(matches!(
            registry.insert(AssetDescriptor::native()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(registry.insert(four()).is_ok());
    }

    #[tokio::test]
    async fn test_empty_identifier_rejected() {
        let source = Arc::new(CountingSource::default());
        let registry = AssetRegistry::new(source.clone());

        assert!(matches!(
            registry.resolve("").await,
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn test_events() {
        let source = Arc::new(CountingSource::with_delay(Duration::from_millis(5)));
        source.add(four());
        let handler = Arc::new(RecordingHandler::default());
        let registry = AssetRegistry::from_parts(
            Network::Testnet,
            MAX_PRECISION,
            source,
            handler.clone(),
        );

        let _ = futures::join!(registry.resolve("FOUR"), registry.resolve("FOUR"));
        registry.resolve("FOUR").await.unwrap();

        let events = handler.events.lock();
        assert!(matches!(events[0], RegistryEvent::FetchStarted { .. }));
        assert!(matches!(events[1], RegistryEvent::FetchJoined { .. }));
        assert!(matches!(
            events[2],
            RegistryEvent::Resolved { precision: 4, .. }
        ));
        assert!(matches!(events[3], RegistryEvent::CacheHit { .. }));
        assert!(events.iter().all(|e| e.asset_id().as_str() == "FOUR"));
    }
}
