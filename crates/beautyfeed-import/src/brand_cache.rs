use std::collections::HashMap;

/// Brand name → store id, for the lifetime of one import run.
///
/// Keys are trimmed names compared exactly, matching the store lookup.
#[derive(Debug, Default)]
pub struct BrandCache {
    ids: HashMap<String, i64>,
}

impl BrandCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: i64) {
        self.ids.insert(name.into(), id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
