//! Sentinel anchored cyclic doubly linked lists stored inside of a [SlotMap].
//!
//! A ring is identified by its sentinel node: an ordinary arena entry that is never
//! yielded when iterating. Nodes link to one another through their [Links] so that
//! splicing in and out of a ring is constant time and never requires access to
//! anything other than the arena itself.
use crate::pure::Traversal;
use slotmap::{Key, SlotMap};

/// The `next` and `prev` neighbours of a node in a ring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Links<K> {
    /// The following node
    pub next: K,
    /// The preceding node
    pub prev: K,
}

impl<K: Copy> Links<K> {
    /// Links for a node that is the only member of its ring.
    pub fn looped(k: K) -> Self {
        Self { next: k, prev: k }
    }

    /// The neighbour in the given direction.
    pub fn get(&self, t: Traversal) -> K {
        match t {
            Traversal::Next => self.next,
            Traversal::Prev => self.prev,
        }
    }
}

/// Something that can be a member of a ring.
pub trait Linked<K> {
    /// The current ring neighbours of this node.
    fn links(&self) -> &Links<K>;
    /// Mutable access to the ring neighbours of this node.
    fn links_mut(&mut self) -> &mut Links<K>;
}

/// The neighbour of `k` in direction `t`.
pub fn step<K: Key, V: Linked<K>>(ring: &SlotMap<K, V>, k: K, t: Traversal) -> K {
    ring[k].links().get(t)
}

/// Remove `k` from whichever ring it is currently part of, leaving it looped to itself.
pub fn splice_out<K: Key, V: Linked<K>>(ring: &mut SlotMap<K, V>, k: K) {
    let Links { next, prev } = *ring[k].links();
    ring[next].links_mut().prev = prev;
    ring[prev].links_mut().next = next;
    *ring[k].links_mut() = Links::looped(k);
}

/// Link `k` into the ring containing `after`, directly following it.
///
/// `k` must not currently be a member of another ring: see [splice_out].
pub fn insert_after<K: Key, V: Linked<K>>(ring: &mut SlotMap<K, V>, k: K, after: K) {
    let next = ring[after].links().next;
    *ring[k].links_mut() = Links { next, prev: after };
    ring[next].links_mut().prev = k;
    ring[after].links_mut().next = k;
}

/// Swap `k` with its neighbour in direction `t`.
///
/// The sentinel is treated as an ordinary member here so nudging past either end of a
/// ring wraps around to the other.
pub fn nudge<K: Key, V: Linked<K>>(ring: &mut SlotMap<K, V>, k: K, t: Traversal) {
    let Links { next, prev } = *ring[k].links();
    if next == k {
        return;
    }

    splice_out(ring, k);
    let after = match t {
        Traversal::Next => next,
        Traversal::Prev => ring[prev].links().prev,
    };
    insert_after(ring, k, after);
}

/// Iterate over the members of the ring anchored at `sentinel`, skipping the sentinel itself.
pub fn iter<K: Key, V: Linked<K>>(ring: &SlotMap<K, V>, sentinel: K) -> RingIter<'_, K, V> {
    RingIter {
        ring,
        sentinel,
        cur: ring[sentinel].links().next,
    }
}

/// The `n`th member of the ring anchored at `sentinel` if there is one.
pub fn nth<K: Key, V: Linked<K>>(ring: &SlotMap<K, V>, sentinel: K, n: usize) -> Option<K> {
    iter(ring, sentinel).nth(n)
}

/// Whether or not the ring anchored at `sentinel` has no members.
pub fn is_empty<K: Key, V: Linked<K>>(ring: &SlotMap<K, V>, sentinel: K) -> bool {
    ring[sentinel].links().next == sentinel
}

/// An iterator over the members of a ring.
#[derive(Debug)]
pub struct RingIter<'a, K: Key, V> {
    ring: &'a SlotMap<K, V>,
    sentinel: K,
    cur: K,
}

impl<'a, K: Key, V: Linked<K>> Iterator for RingIter<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.cur == self.sentinel {
            return None;
        }
        let k = self.cur;
        self.cur = self.ring[k].links().next;

        Some(k)
    }
}
