//! # Component Pool
//!
//! Pre-allocated, bitset-indexed component storage with zero runtime
//! allocations.
//!
//! The pool is a parallel pair:
//! - A fixed array of component values, one slot per entity
//! - A presence bitset; a slot's value is only meaningful while its bit is set
//!
//! `remove` clears the bit and nothing else. The stale value stays in the
//! slot, so reads must be gated on [`ComponentPool::exists`] (or go through
//! iteration / the checked accessors).

use super::bitset::EntitySet;
use super::component::Component;
use super::entity::Entity;
use crate::error::{CoreError, CoreResult};

/// Fixed-capacity storage for a single component type.
///
/// This storage guarantees:
/// - Zero allocations after initialization
/// - O(1) exists / get / add / remove by entity index
/// - Ascending-id iteration over live slots only
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: ComponentPool<Velocity> = ComponentPool::new(128);
/// pool.add(entity, Velocity::new(1.0, 0.0));
/// for (entity, velocity) in pool.iter() { /* ... */ }
/// ```
pub struct ComponentPool<C: Component> {
    /// One slot per entity.
    data: Box<[C]>,
    /// Presence bits, parallel to `data`.
    present: EntitySet,
}

impl<C: Component> ComponentPool<C> {
    /// Creates a pool with the specified capacity.
    ///
    /// All slots are initialized to the component's default value.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let data = (0..capacity).map(|_| C::default()).collect::<Vec<_>>().into_boxed_slice();

        Self {
            data,
            present: EntitySet::new(capacity),
        }
    }

    /// Returns the capacity of this pool.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Tests whether `entity` has a component in this pool.
    #[inline]
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.present.contains(entity.index())
    }

    /// Tests every entity set in `mask` in one scan.
    #[inline]
    #[must_use]
    pub fn exists_all(&self, mask: &EntitySet) -> bool {
        self.present.contains_all(mask)
    }

    /// Gets the slot for `entity` without a presence check.
    ///
    /// For an absent entity this returns whatever the slot last held.
    ///
    /// # Panics
    ///
    /// Panics if the entity index is past capacity.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> &C {
        &self.data[entity.index()]
    }

    /// Mutable variant of [`ComponentPool::get`].
    ///
    /// # Panics
    ///
    /// Panics if the entity index is past capacity.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> &mut C {
        &mut self.data[entity.index()]
    }

    /// Presence-checked lookup.
    #[inline]
    #[must_use]
    pub fn try_get(&self, entity: Entity) -> Option<&C> {
        if self.exists(entity) {
            Some(&self.data[entity.index()])
        } else {
            None
        }
    }

    /// Presence-checked mutable lookup.
    #[inline]
    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        if self.exists(entity) {
            Some(&mut self.data[entity.index()])
        } else {
            None
        }
    }

    /// Presence-checked lookup that fails loudly.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`] if the entity has no component here.
    pub fn get_checked(&self, entity: Entity) -> CoreResult<&C> {
        self.try_get(entity).ok_or(CoreError::MissingComponent {
            entity,
            component: C::NAME,
        })
    }

    /// Mutable variant of [`ComponentPool::get_checked`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponent`] if the entity has no component here.
    pub fn get_checked_mut(&mut self, entity: Entity) -> CoreResult<&mut C> {
        self.try_get_mut(entity).ok_or(CoreError::MissingComponent {
            entity,
            component: C::NAME,
        })
    }

    /// Stores `value` for `entity`, overwriting any existing component.
    ///
    /// Writes the owner back-reference and sets presence.
    ///
    /// # Panics
    ///
    /// Panics if the entity index is past capacity (including [`Entity::NULL`]).
    #[inline]
    pub fn add(&mut self, entity: Entity, value: C) -> &mut C {
        let index = entity.index();
        let slot = &mut self.data[index];
        *slot = value;
        slot.set_owner(entity);
        self.present.insert(index);
        slot
    }

    /// Clears presence for `entity`. Idempotent; the value is not reset.
    #[inline]
    pub fn remove(&mut self, entity: Entity) {
        self.present.remove(entity.index());
    }

    /// Number of present components.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.present.len()
    }

    /// Returns `true` if no component is present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// Clears presence for every slot.
    pub fn clear(&mut self) {
        self.present.clear();
    }

    /// The presence bitset.
    #[inline]
    #[must_use]
    pub fn presence(&self) -> &EntitySet {
        &self.present
    }

    /// Iterates present entities in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.present.iter().map(Entity::from_index)
    }

    /// Iterates present components with their entities, ascending.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            data: &self.data,
            present: &self.present,
            cursor: 0,
        }
    }

    /// Iterates present components mutably, ascending.
    pub fn iter_mut(&mut self) -> IterMut<'_, C> {
        IterMut {
            rest: &mut self.data,
            present: &self.present,
            base: 0,
        }
    }
}

/// Iterator over present components.
pub struct Iter<'a, C> {
    data: &'a [C],
    present: &'a EntitySet,
    cursor: usize,
}

impl<'a, C> Iterator for Iter<'a, C> {
    type Item = (Entity, &'a C);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.present.next_set_from(self.cursor)?;
        self.cursor = index + 1;
        let data = self.data;
        Some((Entity::from_index(index), &data[index]))
    }
}

/// Mutable iterator over present components.
///
/// Holds the not-yet-visited tail of the slot array and splits off each
/// yielded slot, so skipping absent slots costs one jump, not one step per slot.
pub struct IterMut<'a, C> {
    rest: &'a mut [C],
    present: &'a EntitySet,
    /// Slot index of `rest[0]`.
    base: usize,
}

impl<'a, C> Iterator for IterMut<'a, C> {
    type Item = (Entity, &'a mut C);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.present.next_set_from(self.base)?;
        let rest = std::mem::take(&mut self.rest);
        let (_, tail) = rest.split_at_mut(index - self.base);
        let (slot, tail) = tail.split_first_mut()?;
        self.rest = tail;
        self.base = index + 1;
        Some((Entity::from_index(index), slot))
    }
}

impl<'a, C: Component> IntoIterator for &'a ComponentPool<C> {
    type Item = (Entity, &'a C);
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, C: Component> IntoIterator for &'a mut ComponentPool<C> {
    type Item = (Entity, &'a mut C);
    type IntoIter = IterMut<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
