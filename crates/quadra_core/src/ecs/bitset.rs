//! # Presence Bitset
//!
//! Word-packed bitset indexed by entity slot. One bit per slot, 64 slots
//! per `u64`, so the default 128-entity capacity fits in two words.
//!
//! ## Performance
//!
//! - Insert / remove / contains: O(1)
//! - Count: O(n/64) popcounts
//! - Next set bit: amortized O(1), skips whole empty words

/// Bitset over entity slots `[0, capacity)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySet {
    /// 1 = present, 0 = absent. 64 slots per u64.
    words: Box<[u64]>,
    /// Capacity in slots.
    capacity: usize,
}

impl EntitySet {
    /// Creates an empty set able to hold slots `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let word_count = capacity.div_ceil(64);
        Self {
            words: vec![0u64; word_count].into_boxed_slice(),
            capacity,
        }
    }

    /// Creates a set with the given slots present.
    ///
    /// Indices at or past `capacity` are ignored.
    #[must_use]
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Slot capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets a slot. Returns `true` if it was previously clear.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let mask = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        let was_clear = *word & mask == 0;
        *word |= mask;
        was_clear
    }

    /// Clears a slot. Returns `true` if it was previously set.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let mask = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        let was_set = *word & mask != 0;
        *word &= !mask;
        was_set
    }

    /// Tests a slot. Out-of-range slots are never present.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Returns `true` if every slot set in `mask` is also set here.
    #[must_use]
    pub fn contains_all(&self, mask: &Self) -> bool {
        mask.words.iter().enumerate().all(|(i, &wanted)| {
            let have = self.words.get(i).copied().unwrap_or(0);
            wanted & !have == 0
        })
    }

    /// Number of set slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Clears every slot.
    pub fn clear(&mut self) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
    }

    /// First set slot at or after `start`.
    ///
    /// Shifts the word holding `start` right by the in-word offset. A
    /// nonzero remainder jumps straight to the set bit by its trailing-zero
    /// count; an empty remainder jumps to the next word boundary.
    #[inline]
    #[must_use]
    pub fn next_set_from(&self, start: usize) -> Option<usize> {
        let mut index = start;
        while index < self.capacity {
            let window = self.words[index / 64] >> (index % 64);
            if window != 0 {
                let found = index + window.trailing_zeros() as usize;
                return (found < self.capacity).then_some(found);
            }
            index = (index / 64 + 1) * 64;
        }
        None
    }

    /// Iterates set slots in ascending order.
    #[must_use]
    pub fn iter(&self) -> EntitySetIter<'_> {
        EntitySetIter { set: self, cursor: 0 }
    }
}

/// Iterator over the set slots of an [`EntitySet`].
pub struct EntitySetIter<'a> {
    set: &'a EntitySet,
    cursor: usize,
}

impl Iterator for EntitySetIter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.set.next_set_from(self.cursor)?;
        self.cursor = index + 1;
        Some(index)
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = usize;
    type IntoIter = EntitySetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
