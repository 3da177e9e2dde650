/// Read-through caching on top of [`Cache`](crate::db::Cache).
///
/// Looks the key up first and returns the cached value on a hit. On a miss the
/// block is awaited, its value queued for a background write with the given TTL,
/// and returned. A failed cache read is logged and treated as a miss, so Redis
/// being down only costs latency.
///
/// # Arguments
/// * `$cache`: The cache instance. It must have `get_from_cache` and
///   `set_in_background` methods.
/// * `$key`: The key to use for caching the value.
/// * `$ttl`: The time-to-live (TTL) for the cached value in seconds.
/// * `$block`: A future computing the value when it is not cached. Its error
///   type must convert into the caller's error with `?`.
///
/// # Example
/// ```rust,ignore
/// let page: AppResult<ProductPage> = cached!(self.cache, key, PRODUCT_CACHE_TTL, async move {
///     fetch_page(&category).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache.get_from_cache(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                None
            }
        };

        if let Some(cached) = hit {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
