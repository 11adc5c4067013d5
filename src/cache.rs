use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::completion::{AsyncCompleter, Completion, Context};
use crate::error::CompletionError;

/// Wrapper that adds suggestion-result caching to any AsyncCompleter
pub struct CachedCompleter<C> {
    inner: C,
    cache: RwLock<HashMap<String, CachedEntry>>,
    ttl: Duration,
}

struct CachedEntry {
    completions: Vec<Completion>,
    timestamp: Instant,
}

impl<C> CachedCompleter<C> {
    /// Create a new cached completer with the given TTL
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a cached completer with default 5 minute TTL
    pub fn with_default_ttl(inner: C) -> Self {
        Self::new(inner, Duration::from_secs(300))
    }

    /// Clear the cache
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Create cache key from the completion context
    fn cache_key<T>(ctx: &Context<'_, T>) -> String {
        format!("{}:{}", ctx.stream().input(), ctx.partial())
    }
}

#[async_trait]
impl<T, C> AsyncCompleter<T> for CachedCompleter<C>
where
    T: Sync,
    C: AsyncCompleter<T>,
{
    async fn complete(&self, ctx: &Context<'_, T>) -> Result<Vec<Completion>, CompletionError> {
        let cache_key = Self::cache_key(ctx);

        // Check cache
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&cache_key) {
                if entry.timestamp.elapsed() < self.ttl {
                    return Ok(entry.completions.clone());
                }
            }
        }

        // Cache miss or expired - fetch fresh
        let completions = self.inner.complete(ctx).await?;

        // Update cache
        {
            let mut cache = self.cache.write().await;
            cache.insert(
                cache_key,
                CachedEntry {
                    completions: completions.clone(),
                    timestamp: Instant::now(),
                },
            );
        }

        Ok(completions)
    }
}
