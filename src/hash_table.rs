use log::{debug, trace, warn};

use crate::{
    Entry, Lookup, Options, ProbeSequence, TableError,
    hash::{self, home_index_of},
};

/// Open-addressing table of string keys and byte values.
///
/// The capacity is fixed at creation and only changes through
/// [`HashTable::expand`] (or automatically, if
/// [`Options::expand_when_full`] is set).
///
/// With the default [`Lookup::HomeSlot`] mode the table keeps a few sharp
/// edges on purpose:
///
/// - [`get`](Self::get) and [`remove`](Self::remove) only look at the home
///   slot, so a key that was pushed further along by a collision can't be
///   found or removed.
/// - [`remove`](Self::remove) drops whatever sits at the home slot, even if
///   it belongs to another key.
/// - [`insert`](Self::insert) only recognizes an existing key at the home
///   slot, past it the same key can be stored twice.
/// - [`expand`](Self::expand) doesn't rehash unless
///   [`Options::rehash_on_expand`] is set, entries whose home moves under
///   the wider mask become unreachable.
#[derive(Debug)]
pub struct HashTable {
    slots: Vec<Option<Entry>>,
    items: usize,
    mask: usize,
    options: Options,
}

#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Option<Entry>>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self {
            slots: (0..Self::DEFAULT_CAPACITY).map(|_| None).collect(),
            items: 0,
            mask: Self::DEFAULT_CAPACITY - 1,
            options: Options::default(),
        }
    }
}

impl HashTable {
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Creates a table with `capacity` empty slots and default [`Options`]
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_options(capacity, Options::default())
    }

    /// Creates a table with `capacity` empty slots.
    ///
    /// `capacity` has to be a non-zero power of two, since slots are picked
    /// by masking the hash.
    pub fn with_options(capacity: usize, options: Options) -> Result<Self, TableError> {
        if !hash::is_valid_capacity(capacity) {
            return Err(TableError::InvalidCapacity { capacity });
        }

        let slots = Self::alloc_slots(capacity)?;
        debug!("created table with {capacity} slots, {options:?}");

        Ok(Self {
            slots,
            items: 0,
            mask: capacity - 1,
            options,
        })
    }

    /// Returns the number of occupied slots
    pub fn len(&self) -> usize {
        self.items
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots divided by the number of slots
    pub fn load_factor(&self) -> f32 {
        self.items as f32 / self.capacity() as f32
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Stores a copy of `key` and `value`.
    ///
    /// Fails with [`TableError::CapacityExhausted`] when every slot is taken
    /// and growing is turned off. With [`Lookup::HomeSlot`] this happens
    /// before any key is compared, so even updates fail on a full table.
    pub fn insert(&mut self, key: &str, value: &[u8]) -> Result<(), TableError> {
        if self.options.lookup == Lookup::Probe {
            if let Some(i) = self.probe_for(key) {
                let entry = Entry::try_new(key, value)?;
                trace!(target: "insert", "updating {key:?} in slot {i}");
                self.slots[i] = Some(entry);
                return Ok(());
            }
        }

        if self.items == self.capacity() {
            if !self.options.expand_when_full {
                warn!("Insertion failed: hash table is full (capacity: {})", self.capacity());
                return Err(TableError::CapacityExhausted {
                    capacity: self.capacity(),
                });
            }
            self.expand()?;
        }

        let entry = Entry::try_new(key, value)?;
        let home = self.idx(key);

        if self.options.lookup == Lookup::HomeSlot {
            if let Some(old) = &self.slots[home] {
                if old.key() == key {
                    trace!(target: "insert", "updating {key:?} in home slot {home}");
                    self.slots[home] = Some(entry);
                    return Ok(());
                }
            }
        }

        // Past the home slot only empty slots matter, keys are not compared.
        let Some(i) = Self::first_empty(&self.slots, home) else {
            return Err(TableError::CapacityExhausted {
                capacity: self.capacity(),
            });
        };
        trace!(target: "insert", "placing {key:?} in slot {i} (home {home})");
        self.slots[i] = Some(entry);
        self.items += 1;
        Ok(())
    }

    /// Returns the value stored for `key`.
    ///
    /// With [`Lookup::HomeSlot`] only the home slot is checked.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        let i = self.slot_of(key)?;
        trace!(target: "search", "found {key:?} in slot {i}");
        self.slots[i].as_ref().map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slot_of(key).is_some()
    }

    /// Index of the slot [`get`](Self::get) would read `key` from
    pub fn slot_of(&self, key: &str) -> Option<usize> {
        match self.options.lookup {
            Lookup::HomeSlot => {
                let home = self.idx(key);
                self.slots[home]
                    .as_ref()
                    .filter(|e| e.key() == key)
                    .map(|_| home)
            }
            Lookup::Probe => self.probe_for(key),
        }
    }

    /// Removes an entry and returns it.
    ///
    /// With [`Lookup::HomeSlot`] this empties the home slot of `key`
    /// regardless of which key occupies it.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        match self.options.lookup {
            Lookup::HomeSlot => {
                let home = self.idx(key);
                let removed = self.slots[home].take()?;
                self.items -= 1;
                if removed.key() != key {
                    trace!(
                        target: "remove",
                        "removing {:?} from home slot {home} of {key:?}",
                        removed.key()
                    );
                }
                Some(removed)
            }
            Lookup::Probe => {
                let i = self.probe_for(key)?;
                let removed = self.slots[i].take()?;
                self.items -= 1;
                trace!(target: "remove", "removed {key:?} from slot {i}");
                self.backward_shift(i);
                Some(removed)
            }
        }
    }

    /// Doubles the number of slots.
    ///
    /// Unless [`Options::rehash_on_expand`] is set, entries stay in the
    /// slot they were in, and lookups for keys whose home index changed
    /// will miss them. The table is left untouched on error.
    pub fn expand(&mut self) -> Result<(), TableError> {
        let old_cap = self.capacity();
        let new_cap = old_cap
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow { capacity: old_cap })?;

        if self.options.rehash_on_expand {
            let mut slots = Self::alloc_slots(new_cap)?;
            for entry in self.slots.drain(..).flatten() {
                let home = home_index_of(entry.key(), new_cap);
                if let Some(i) = Self::first_empty(&slots, home) {
                    slots[i] = Some(entry);
                }
            }
            self.slots = slots;
        } else {
            self.slots.try_reserve_exact(new_cap - old_cap)?;
            self.slots.resize_with(new_cap, || None);
        }

        self.mask = new_cap - 1;
        debug!(
            "expanded table {old_cap} -> {new_cap} slots (rehash: {})",
            self.options.rehash_on_expand
        );
        Ok(())
    }

    /// Drops every entry and the slot array.
    pub fn destroy(self) {
        debug!(
            "destroying table with {} slots, {} entries",
            self.capacity(),
            self.items
        );
        drop(self);
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    // [private]

    fn alloc_slots(n: usize) -> Result<Vec<Option<Entry>>, TableError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(n)?;
        slots.resize_with(n, || None);
        Ok(slots)
    }

    fn idx(&self, key: &str) -> usize {
        hash::fnv1a(key) as usize & self.mask
    }

    fn first_empty(slots: &[Option<Entry>], home: usize) -> Option<usize> {
        ProbeSequence::new(home, slots.len()).find(|&i| slots[i].is_none())
    }

    /// Walks the probe sequence until `key` or an empty slot
    fn probe_for(&self, key: &str) -> Option<usize> {
        for i in ProbeSequence::new(self.idx(key), self.capacity()) {
            match &self.slots[i] {
                Some(e) if e.key() == key => return Some(i),
                Some(_) => continue,
                None => return None,
            }
        }
        None
    }

    /// Pulls the entries after `gap` back into it, so every entry
    /// stays reachable from its home without crossing an empty slot.
    fn backward_shift(&mut self, mut gap: usize) {
        let mut j = (gap + 1) & self.mask;
        while let Some(e) = &self.slots[j] {
            let home = self.idx(e.key());
            let home_in_range = if gap < j {
                home > gap && home <= j
            } else {
                home > gap || home <= j
            };
            if !home_in_range {
                self.slots.swap(gap, j);
                gap = j;
            }
            j = (j + 1) & self.mask;
        }
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find_map(Option::as_ref)
            .map(|e| (e.key(), e.value()))
    }
}
