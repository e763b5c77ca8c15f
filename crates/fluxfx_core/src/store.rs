//! # Particle Store
//!
//! Bounded, insertion-ordered particle collection.
//!
//! ## Capacity Policy
//!
//! The store never holds more than `capacity` particles. Before `k` new
//! particles are inserted, exactly as many of the *oldest* particles are
//! evicted as needed to make room (FIFO by insertion order, regardless of
//! type). If a single batch is larger than the whole store, the oldest
//! members of that batch are evicted too.
//!
//! Insertion order is also iteration order, which the lightning renderer
//! relies on to connect bolt samples.

use std::collections::{HashMap, VecDeque};

use crate::color::Color;
use crate::mode::EffectMode;
use crate::particle::Particle;

/// Running counters for the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Particles inserted since creation.
    pub spawned: u64,
    /// Particles evicted to respect capacity.
    pub evicted: u64,
    /// Particles removed by `remove_if`.
    pub removed: u64,
}

/// Render grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Effect type of every member.
    pub mode: EffectMode,
    /// Color of every member.
    pub color: Color,
}

/// Particles sharing an effect type and color, in insertion order.
#[derive(Debug, Clone)]
pub struct ParticleGroup<'a> {
    /// Shared key.
    pub key: GroupKey,
    /// Members in insertion order.
    pub members: Vec<&'a Particle>,
}

/// The bounded particle collection plus the active effect mode.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: VecDeque<Particle>,
    capacity: usize,
    mode: EffectMode,
    stats: StoreStats,
}

impl ParticleStore {
    /// Creates an empty store.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize, mode: EffectMode) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
            mode,
            stats: StoreStats::default(),
        }
    }

    /// Maximum live particles.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live particle count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Is the store empty?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Is the store at capacity?
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Active effect mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> EffectMode {
        self.mode
    }

    /// Running counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Switches the active mode and discards every particle.
    ///
    /// Populating the new mode is the engine's job.
    pub fn set_mode(&mut self, mode: EffectMode) {
        self.mode = mode;
        self.particles.clear();
    }

    /// Discards every particle, keeping the mode.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Inserts one particle, evicting the oldest if full.
    ///
    /// Returns the number of evicted particles.
    pub fn spawn(&mut self, particle: Particle) -> usize {
        self.spawn_batch(std::iter::once(particle))
    }

    /// Inserts a batch, first evicting just enough of the oldest particles.
    ///
    /// Returns the number of evicted particles.
    pub fn spawn_batch<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = Particle>,
        I::IntoIter: ExactSizeIterator,
    {
        let batch = batch.into_iter();
        let incoming = batch.len();

        let overflow = (self.particles.len() + incoming).saturating_sub(self.capacity);
        let from_existing = overflow.min(self.particles.len());
        self.particles.drain(..from_existing);

        self.particles.extend(batch);
        let mut evicted = from_existing;
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
            evicted += 1;
        }

        self.stats.spawned += incoming as u64;
        self.stats.evicted += evicted as u64;
        evicted
    }

    /// Removes every particle matching `predicate`, preserving order.
    ///
    /// Returns the number removed.
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Particle) -> bool,
    {
        let before = self.particles.len();
        self.particles.retain(|p| !predicate(p));
        let removed = before - self.particles.len();
        self.stats.removed += removed as u64;
        removed
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Particle> + ExactSizeIterator {
        self.particles.iter()
    }

    /// Iterates mutably oldest to newest.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Particle> + ExactSizeIterator {
        self.particles.iter_mut()
    }

    /// Contiguous mutable view, oldest first.
    ///
    /// For updates where one particle writes to its neighbors.
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        self.particles.make_contiguous()
    }

    /// Particle at insertion index `index` (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Groups particles by (effect type, color).
    ///
    /// Groups appear in order of their first member; members keep insertion
    /// order.
    #[must_use]
    pub fn groups(&self) -> Vec<ParticleGroup<'_>> {
        let mut groups: Vec<ParticleGroup<'_>> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();

        for particle in &self.particles {
            let key = GroupKey {
                mode: particle.mode(),
                color: particle.color,
            };
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(ParticleGroup {
                    key,
                    members: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].members.push(particle);
        }

        groups
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new(crate::config::MAX_PARTICLES, EffectMode::DEFAULT)
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::collections::vec_deque::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::particle::Kind;

    fn tagged(batch_id: u32) -> Particle {
        Particle::new(Kind::Sparkle, Vec2::ZERO).with_batch(batch_id)
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let mut store = ParticleStore::new(10, EffectMode::Sparkle);
        for i in 0..25 {
            store.spawn(tagged(i));
            assert!(store.len() <= 10);
        }
        assert_eq!(store.len(), 10);
        assert_eq!(store.stats().evicted, 15);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut store = ParticleStore::new(5, EffectMode::Sparkle);
        store.spawn_batch((0..5).map(tagged).collect::<Vec<_>>());

        let evicted = store.spawn_batch(vec![tagged(100), tagged(101)]);
        assert_eq!(evicted, 2);

        let ids: Vec<u32> = store.iter().map(|p| p.batch_id).collect();
        assert_eq!(ids, vec![2, 3, 4, 100, 101]);
    }

    #[test]
    fn test_no_eviction_with_room() {
        let mut store = ParticleStore::new(10, EffectMode::Sparkle);
        store.spawn_batch((0..4).map(tagged).collect::<Vec<_>>());
        assert_eq!(store.spawn_batch((4..8).map(tagged).collect::<Vec<_>>()), 0);
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_oversized_batch_keeps_newest() {
        let mut store = ParticleStore::new(3, EffectMode::Sparkle);
        store.spawn(tagged(0));
        let evicted = store.spawn_batch((10..15).map(tagged).collect::<Vec<_>>());
        assert_eq!(evicted, 3);
        let ids: Vec<u32> = store.iter().map(|p| p.batch_id).collect();
        assert_eq!(ids, vec![12, 13, 14]);
    }

    #[test]
    fn test_remove_if_preserves_order() {
        let mut store = ParticleStore::new(10, EffectMode::Sparkle);
        store.spawn_batch((0..6).map(tagged).collect::<Vec<_>>());
        let removed = store.remove_if(|p| p.batch_id % 2 == 0);
        assert_eq!(removed, 3);
        let ids: Vec<u32> = store.iter().map(|p| p.batch_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(store.stats().removed, 3);
    }

    #[test]
    fn test_set_mode_clears() {
        let mut store = ParticleStore::new(10, EffectMode::Sparkle);
        store.spawn(tagged(1));
        store.set_mode(EffectMode::Vortex);
        assert!(store.is_empty());
        assert_eq!(store.mode(), EffectMode::Vortex);
    }

    #[test]
    fn test_groups_by_type_and_color() {
        let mut store = ParticleStore::new(10, EffectMode::Sparkle);
        store.spawn(tagged(0).with_color(Color::CYAN));
        store.spawn(tagged(1).with_color(Color::YELLOW));
        store.spawn(tagged(2).with_color(Color::CYAN));
        store.spawn(Particle::new(Kind::Ripple, Vec2::ZERO).with_color(Color::CYAN));

        let groups = store.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key.color, Color::CYAN);
        assert_eq!(groups[0].key.mode, EffectMode::Sparkle);
        let ids: Vec<u32> = groups[0].members.iter().map(|p| p.batch_id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(groups[1].key.color, Color::YELLOW);
        assert_eq!(groups[2].key.mode, EffectMode::Ripple);
    }
}
