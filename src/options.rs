/// How far search and delete follow the probe sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lookup {
    /// Search and delete only inspect the home slot, and delete doesn't
    /// compare keys there. Insert probes for the first empty slot without
    /// comparing keys past the home slot, so duplicates can pile up.
    #[default]
    HomeSlot,
    /// Every operation walks the probe sequence comparing keys, and delete
    /// shifts the rest of the cluster back so nothing becomes unreachable.
    Probe,
}

/// Behaviour switches for a [`HashTable`](crate::HashTable).
///
/// `Options::default()` keeps the home-slot semantics with expansion off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub lookup: Lookup,
    /// Reinsert every entry at its new home when the table grows
    pub rehash_on_expand: bool,
    /// Grow instead of failing an insert into a full table
    pub expand_when_full: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probing lookups, rehashing expansion, growth on full
    pub fn corrected() -> Self {
        Self {
            lookup: Lookup::Probe,
            rehash_on_expand: true,
            expand_when_full: true,
        }
    }

    pub fn lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn rehash_on_expand(mut self, yes: bool) -> Self {
        self.rehash_on_expand = yes;
        self
    }

    pub fn expand_when_full(mut self, yes: bool) -> Self {
        self.expand_when_full = yes;
        self
    }
}
