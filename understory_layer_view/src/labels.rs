// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element labels: resource name lookup with a hexadecimal fallback.

use alloc::format;
use alloc::string::String;

use hashbrown::HashMap;
use tracing::debug;
use understory_layer_stack::ResourceId;

/// Failure to resolve a [`ResourceId`] to a name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The host has no entry for this identifier.
    #[error("no resource entry for {0:?}")]
    NotFound(ResourceId),
    /// The host's resource table cannot be queried right now.
    #[error("resource table unavailable")]
    Unavailable,
}

/// Host service mapping identifiers to human-readable names.
pub trait NameLookup {
    /// The entry name for `id`, such as `"toolbar"`.
    fn entry_name(&self, id: ResourceId) -> Result<String, LookupError>;
}

/// A lookup that never resolves anything; every label falls back to hex.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNames;

impl NameLookup for NoNames {
    fn entry_name(&self, id: ResourceId) -> Result<String, LookupError> {
        Err(LookupError::NotFound(id))
    }
}

impl<F> NameLookup for F
where
    F: Fn(ResourceId) -> Option<String>,
{
    fn entry_name(&self, id: ResourceId) -> Result<String, LookupError> {
        self(id).ok_or(LookupError::NotFound(id))
    }
}

/// Memoized label text per identifier.
///
/// Both resolved names and fallbacks are cached, so a failing lookup is only
/// attempted once per identifier until [`LabelCache::clear`].
#[derive(Clone, Debug, Default)]
pub struct LabelCache {
    names: HashMap<ResourceId, String>,
}

impl LabelCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `id`, resolving it through `lookup` on first use.
    pub fn label(&mut self, id: ResourceId, lookup: &dyn NameLookup) -> &str {
        self.names.entry(id).or_insert_with(|| match lookup.entry_name(id) {
            Ok(name) => name,
            Err(err) => {
                debug!(%err, "falling back to hex label");
                fallback_label(id)
            }
        })
    }

    /// Number of cached labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forget every cached label, e.g. after the host's resource table changed.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Fixed-width hexadecimal label: `0x`, then the value right-aligned in eight columns.
pub fn fallback_label(id: ResourceId) -> String {
    format!("0x{:8x}", id.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use core::cell::Cell;

    struct Counting<'a> {
        calls: &'a Cell<u32>,
    }

    impl NameLookup for Counting<'_> {
        fn entry_name(&self, id: ResourceId) -> Result<String, LookupError> {
            self.calls.set(self.calls.get() + 1);
            if id.0 == 1 {
                Ok("header".to_string())
            } else {
                Err(LookupError::Unavailable)
            }
        }
    }

    #[test]
    fn fallback_is_space_padded_hex() {
        assert_eq!(fallback_label(ResourceId(0x7f0a_0001)), "0x7f0a0001");
        assert_eq!(fallback_label(ResourceId(0xbeef)), "0x    beef");
    }

    #[test]
    fn resolves_and_caches_both_outcomes() {
        let calls = Cell::new(0);
        let lookup = Counting { calls: &calls };
        let mut cache = LabelCache::new();

        assert_eq!(cache.label(ResourceId(1), &lookup), "header");
        assert_eq!(cache.label(ResourceId(2), &lookup), "0x       2");
        assert_eq!(cache.label(ResourceId(1), &lookup), "header");
        assert_eq!(cache.label(ResourceId(2), &lookup), "0x       2");
        assert_eq!(calls.get(), 2, "each id is looked up once");
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn closures_are_lookups() {
        let lookup = |id: ResourceId| (id.0 == 5).then(|| "five".to_string());
        let mut cache = LabelCache::new();
        assert_eq!(cache.label(ResourceId(5), &lookup), "five");
        assert_eq!(cache.label(ResourceId(6), &NoNames), "0x       6");
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            LookupError::NotFound(ResourceId(3)).to_string(),
            "no resource entry for ResourceId(3)"
        );
    }
}
