use dashmap::DashMap;

use crate::domain::repositories::RedirectionCountRepository;

/// Counters kept in a sharded map. Lost on restart, never decayed.
#[derive(Debug, Default)]
pub struct InMemoryRedirectionCountRepository {
    counts: DashMap<String, u64>,
}

impl InMemoryRedirectionCountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RedirectionCountRepository for InMemoryRedirectionCountRepository {
    fn get_count(&self, id: &str) -> u64 {
        self.counts.get(id).map(|count| *count).unwrap_or(0)
    }

    fn increment_count(&self, id: &str) -> u64 {
        let mut count = self.counts.entry(id.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}
