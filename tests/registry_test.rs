use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use completion::async_trait::async_trait;
use completion::{
    AsyncCompleter, Completion, CompleterBinding, CompleterKind, CompleterRegistry,
    CompletionError, Context, RegistryError, filter_completions,
};

#[derive(Default)]
struct DirectionCompleter;

#[async_trait]
impl AsyncCompleter for DirectionCompleter {
    async fn complete(&self, ctx: &Context<'_, ()>) -> Result<Vec<Completion>, CompletionError> {
        let all = ["north", "south", "east", "west"]
            .into_iter()
            .map(Completion::simple)
            .collect();
        Ok(filter_completions(all, ctx.partial()))
    }
}

#[derive(Default)]
struct VerbCompleter;

#[async_trait]
impl AsyncCompleter for VerbCompleter {
    async fn complete(&self, _ctx: &Context<'_, ()>) -> Result<Vec<Completion>, CompletionError> {
        Ok(vec![Completion::simple("go"), Completion::simple("look")])
    }
}

/// Register a factory for DirectionCompleter that counts constructions
async fn register_counting_factory(
    registry: &CompleterRegistry,
) -> Arc<AtomicUsize> {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    registry
        .register_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(DirectionCompleter)
        })
        .await;
    constructed
}

#[tokio::test]
async fn test_non_shared_resolves_fresh_instances() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;

    let binding = CompleterBinding::of::<DirectionCompleter>();
    let first = registry.resolve(&binding).await.unwrap();
    let second = registry.resolve(&binding).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);

    // Non-shared resolution left nothing behind: the first shared
    // resolution still has to construct.
    let shared = binding.clone().shared();
    registry.resolve(&shared).await.unwrap();
    assert_eq!(constructed.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_shared_resolution_is_idempotent() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;

    let binding = CompleterBinding::of::<DirectionCompleter>().shared();
    let first = registry.resolve(&binding).await.unwrap();
    let second = registry.resolve(&binding).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shared_identifiers_are_distinct_slots() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;

    let left = CompleterBinding::of::<DirectionCompleter>().with_id("left").shared();
    let right = CompleterBinding::of::<DirectionCompleter>().with_id("right").shared();

    let left_instance = registry.resolve(&left).await.unwrap();
    let right_instance = registry.resolve(&right).await.unwrap();
    assert!(!Arc::ptr_eq(&left_instance, &right_instance));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);

    // Identifier matching is case- and whitespace-insensitive
    let left_again = CompleterBinding::of::<DirectionCompleter>().with_id(" LEFT ").shared();
    let instance = registry.resolve(&left_again).await.unwrap();
    assert!(Arc::ptr_eq(&left_instance, &instance));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_registered_instance_preempts_construction() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;

    let kind = CompleterKind::of::<DirectionCompleter>();
    let instance: Arc<dyn AsyncCompleter> = Arc::new(DirectionCompleter);
    registry.register_arc(kind, Arc::clone(&instance), Some(" Foo ")).await;

    let binding = CompleterBinding::of::<DirectionCompleter>().with_id("foo").shared();
    let resolved = registry.resolve(&binding).await.unwrap();

    assert!(Arc::ptr_eq(&instance, &resolved));
    assert_eq!(constructed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_register_by_value_uses_own_type_as_kind() {
    let registry = CompleterRegistry::new();
    registry.register(DirectionCompleter, None).await;

    // No factory registered at all: the cached instance is the only way
    // this resolution can succeed.
    let binding = CompleterBinding::of::<DirectionCompleter>().shared();
    let first = registry.resolve(&binding).await.unwrap();
    let second = registry.resolve(&binding).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_unregister_then_resolve_constructs_new_instance() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;

    let kind = CompleterKind::of::<DirectionCompleter>();
    let instance: Arc<dyn AsyncCompleter> = Arc::new(DirectionCompleter);
    registry.register_arc(kind, Arc::clone(&instance), Some("X")).await;

    registry.unregister(kind, Some("x")).await;

    let binding = CompleterBinding::of::<DirectionCompleter>().with_id("X").shared();
    let resolved = registry.resolve(&binding).await.unwrap();
    assert!(!Arc::ptr_eq(&instance, &resolved));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unregister_absent_entry_is_noop() {
    let registry: CompleterRegistry = CompleterRegistry::new();
    let kind = CompleterKind::of::<DirectionCompleter>();

    // Nothing registered under the kind, and nothing under the id
    registry.unregister(kind, None).await;
    registry.register(DirectionCompleter, Some("foo")).await;
    registry.unregister(kind, Some("bar")).await;

    let binding = CompleterBinding::of::<DirectionCompleter>().with_id("foo").shared();
    assert!(registry.resolve(&binding).await.is_ok());
}

#[tokio::test]
async fn test_clear_empties_every_kind() {
    let registry = CompleterRegistry::new();
    let constructed = register_counting_factory(&registry).await;
    registry.register_default::<VerbCompleter>().await;

    let direction = CompleterBinding::of::<DirectionCompleter>().shared();
    let verb = CompleterBinding::of::<VerbCompleter>().shared();

    let direction_before = registry.resolve(&direction).await.unwrap();
    let verb_before = registry.resolve(&verb).await.unwrap();

    registry.clear().await;

    let direction_after = registry.resolve(&direction).await.unwrap();
    let verb_after = registry.resolve(&verb).await.unwrap();

    assert!(!Arc::ptr_eq(&direction_before, &direction_after));
    assert!(!Arc::ptr_eq(&verb_before, &verb_after));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);

    // clear on an already-empty registry is fine
    registry.clear().await;
    registry.clear().await;
}

#[tokio::test]
async fn test_unknown_kind_is_an_error() {
    let registry: CompleterRegistry = CompleterRegistry::new();
    let binding = CompleterBinding::of::<DirectionCompleter>();

    let err = registry.resolve(&binding).await.unwrap_err();
    match err {
        RegistryError::UnknownKind(kind) => {
            assert_eq!(kind, CompleterKind::of::<DirectionCompleter>());
        }
        other => panic!("expected UnknownKind, got {:?}", other),
    }
}

#[tokio::test]
async fn test_construction_failure_carries_kind_and_leaves_cache_clean() {
    let registry = CompleterRegistry::new();
    registry
        .register_factory(|| -> anyhow::Result<DirectionCompleter> {
            Err(anyhow::anyhow!("wordlist not loaded"))
        })
        .await;

    let binding = CompleterBinding::of::<DirectionCompleter>().shared();
    let err = registry.resolve(&binding).await.unwrap_err();

    match &err {
        RegistryError::Construction { kind, source } => {
            assert_eq!(*kind, CompleterKind::of::<DirectionCompleter>());
            assert!(source.to_string().contains("wordlist not loaded"));
        }
        other => panic!("expected Construction, got {:?}", other),
    }
    assert_eq!(err.kind(), CompleterKind::of::<DirectionCompleter>());
    assert!(err.to_string().contains("DirectionCompleter"));

    // The failed attempt cached nothing: with a working factory the same
    // binding resolves and is then reused.
    let constructed = register_counting_factory(&registry).await;
    let first = registry.resolve(&binding).await.unwrap();
    let second = registry.resolve(&binding).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_resolution_constructs_once() {
    let registry = Arc::new(CompleterRegistry::new());
    let constructed = register_counting_factory(&registry).await;

    let binding = CompleterBinding::of::<DirectionCompleter>().shared();
    let mut handles = Vec::new();
    for _ in 0..16 {
        let registry = Arc::clone(&registry);
        let binding = binding.clone();
        handles.push(tokio::spawn(async move { registry.resolve(&binding).await.unwrap() }));
    }

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap());
    }

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
}
