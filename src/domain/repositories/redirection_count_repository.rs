//! Counter storage backing the redirect limit.

/// Per-hash redirect counters.
///
/// Implementations must not lose updates when `increment_count` is called
/// concurrently for the same id.
#[cfg_attr(test, mockall::automock)]
pub trait RedirectionCountRepository: Send + Sync {
    /// Current count for `id`, `0` when never incremented.
    fn get_count(&self, id: &str) -> u64;

    /// Adds one to the count for `id` and returns the new value.
    fn increment_count(&self, id: &str) -> u64;
}
