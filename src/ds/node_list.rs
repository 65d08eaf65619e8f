//! Ordered node lists over a shared node arena.
//!
//! A [`NodePool`] owns nodes; an [`OrderedList`] is only a header (head, tail,
//! length) that links some of those nodes into a doubly linked chain. Many
//! lists can share one pool, and a node moves between them in O(1) by handle:
//! `pop` it from one list, `push_*` it onto another. Nothing is copied and the
//! node keeps its [`SlotId`] for its whole life.
//!
//! ## Architecture
//!
//! ```text
//!   pool (NodePool<T>)
//!   ┌────────┬──────────────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next, owner }                    │
//!   ├────────┼──────────────────────────────────────────────────────┤
//!   │ id_0   │ { A, prev: None,       next: Some(id_2), owner: L1 } │
//!   │ id_1   │ { X, prev: None,       next: None,       owner: L2 } │
//!   │ id_2   │ { B, prev: Some(id_0), next: None,       owner: L1 } │
//!   │ id_3   │ { C, prev: None,       next: None,       owner: -  } │  detached
//!   └────────┴──────────────────────────────────────────────────────┘
//!
//!   L1: head ─► [id_0] ◄──► [id_2] ◄── tail     (len 2)
//!   L2: head ─► [id_1] ◄── tail                 (len 1)
//! ```
//!
//! ## Rules
//!
//! - Every node records the tag of the list it is linked into. Pushing a node
//!   that is still linked somewhere panics; `pop` it first.
//! - `push_after` checks that the anchor belongs to the receiving list.
//! - A handle that is not live in the pool is an absent node. Every list
//!   operation panics on one.
//! - A list must only be used with the pool its nodes were inserted into.
//!
//! ## Performance
//! - `push_front` / `push_back` / `push_after` / `pop`: O(1)
//! - `pop_front` / `pop_back` / `head` / `tail` / `len`: O(1)
//! - `iter`: O(n), double-ended

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

static NEXT_LIST_TAG: AtomicU64 = AtomicU64::new(1);

/// Identity of an [`OrderedList`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListTag(u64);

impl ListTag {
    fn next() -> Self {
        Self(NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
    owner: Option<ListTag>,
}

/// Arena of list nodes addressed by [`SlotId`].
#[derive(Debug)]
pub struct NodePool<T> {
    nodes: SlotArena<Node<T>>,
}

impl<T> NodePool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
        }
    }

    /// Creates an empty pool with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
        }
    }

    /// Allocates a detached node holding `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.nodes.insert(Node {
            value,
            prev: None,
            next: None,
            owner: None,
        })
    }

    /// Frees a detached node and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is absent or still linked into a list.
    pub fn remove(&mut self, id: SlotId) -> T {
        if let Some(owner) = self.node(id).owner {
            panic!("cannot free node {id:?}: still linked into list {owner:?}");
        }
        match self.nodes.remove(id) {
            Some(node) => node.value,
            None => panic!("node {id:?} is not live in this pool"),
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns `true` if `id` is a live node in this pool.
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    /// Returns `true` if `id` is live and currently linked into some list.
    pub fn is_linked(&self, id: SlotId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.owner.is_some())
    }

    /// Number of live nodes, linked or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Frees every node. Lists built over this pool must be reset by the
    /// caller; their handles are dangling afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn node(&self, id: SlotId) -> &Node<T> {
        match self.nodes.get(id) {
            Some(node) => node,
            None => panic!("node {id:?} is not live in this pool"),
        }
    }

    fn node_mut(&mut self, id: SlotId) -> &mut Node<T> {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => panic!("node {id:?} is not live in this pool"),
        }
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Doubly linked list header over nodes stored in a [`NodePool`].
pub struct OrderedList<T> {
    tag: ListTag,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("tag", &self.tag)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> OrderedList<T> {
    /// Creates an empty list with a fresh tag.
    pub fn new() -> Self {
        Self {
            tag: ListTag::next(),
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn tag(&self) -> ListTag {
        self.tag
    }

    /// Handle of the first node, if any.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Handle of the last node, if any.
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` is live in `pool` and linked into this list.
    pub fn contains(&self, pool: &NodePool<T>, id: SlotId) -> bool {
        pool.nodes
            .get(id)
            .is_some_and(|node| node.owner == Some(self.tag))
    }

    /// Links a detached node in front of the current head.
    ///
    /// # Panics
    ///
    /// Panics if `id` is absent or already linked into a list.
    pub fn push_front(&mut self, pool: &mut NodePool<T>, id: SlotId) {
        self.claim(pool, id);
        let old_head = self.head;
        pool.node_mut(id).next = old_head;
        match old_head {
            Some(head) => pool.node_mut(head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Links a detached node behind the current tail.
    ///
    /// # Panics
    ///
    /// Panics if `id` is absent or already linked into a list.
    pub fn push_back(&mut self, pool: &mut NodePool<T>, id: SlotId) {
        self.claim(pool, id);
        let old_tail = self.tail;
        pool.node_mut(id).prev = old_tail;
        match old_tail {
            Some(tail) => pool.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Links a detached node directly after `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is absent, if `anchor` is not linked into this
    /// list, or if `id` is already linked into a list.
    pub fn push_after(&mut self, pool: &mut NodePool<T>, anchor: SlotId, id: SlotId) {
        let anchor_next = {
            let node = pool.node(anchor);
            if node.owner != Some(self.tag) {
                panic!("anchor {anchor:?} is not linked into list {:?}", self.tag);
            }
            node.next
        };
        self.claim(pool, id);
        {
            let node = pool.node_mut(id);
            node.prev = Some(anchor);
            node.next = anchor_next;
        }
        pool.node_mut(anchor).next = Some(id);
        match anchor_next {
            Some(next) => pool.node_mut(next).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
    }

    /// Unlinks `id` from this list, leaving it detached but live in the pool.
    ///
    /// # Panics
    ///
    /// Panics if `id` is absent or not linked into this list.
    pub fn pop(&mut self, pool: &mut NodePool<T>, id: SlotId) {
        let (prev, next) = {
            let node = pool.node(id);
            if node.owner != Some(self.tag) {
                panic!("node {id:?} is not linked into list {:?}", self.tag);
            }
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => pool.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => pool.node_mut(next).prev = prev,
            None => self.tail = prev,
        }

        let node = pool.node_mut(id);
        node.prev = None;
        node.next = None;
        node.owner = None;
        self.len -= 1;
    }

    /// Unlinks the head node and returns its handle.
    pub fn pop_front(&mut self, pool: &mut NodePool<T>) -> Option<SlotId> {
        let id = self.head?;
        self.pop(pool, id);
        Some(id)
    }

    /// Unlinks the tail node and returns its handle.
    pub fn pop_back(&mut self, pool: &mut NodePool<T>) -> Option<SlotId> {
        let id = self.tail?;
        self.pop(pool, id);
        Some(id)
    }

    /// Iterates `(handle, value)` pairs from head to tail; use `.rev()` for
    /// tail to head.
    pub fn iter<'a>(&self, pool: &'a NodePool<T>) -> Iter<'a, T> {
        Iter {
            pool,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Walks the chain and checks links, ownership and length.
    pub fn check_invariants(&self, pool: &NodePool<T>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(format!(
                    "list {:?}: head {:?} / tail {:?} / len {} disagree",
                    self.tag, self.head, self.tail, self.len
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = pool.nodes.get(id).ok_or_else(|| {
                InvariantError::new(format!("list {:?}: node {id:?} missing", self.tag))
            })?;
            if node.owner != Some(self.tag) {
                return Err(InvariantError::new(format!(
                    "list {:?}: node {id:?} owned by {:?}",
                    self.tag, node.owner
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "list {:?}: node {id:?} prev is {:?}, expected {prev:?}",
                    self.tag, node.prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(format!(
                    "list {:?}: more than {} reachable nodes",
                    self.tag, self.len
                )));
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "list {:?}: chain ends at {prev:?}, tail is {:?}",
                self.tag, self.tail
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "list {:?}: {count} reachable nodes, len is {}",
                self.tag, self.len
            )));
        }
        Ok(())
    }

    fn claim(&self, pool: &mut NodePool<T>, id: SlotId) {
        let node = pool.node_mut(id);
        if let Some(owner) = node.owner {
            panic!("node {id:?} is still linked into list {owner:?}; pop it before pushing");
        }
        node.prev = None;
        node.next = None;
        node.owner = Some(self.tag);
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-ended iterator over the nodes of an [`OrderedList`].
///
/// Created by [`OrderedList::iter`].
pub struct Iter<'a, T> {
    pool: &'a NodePool<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.pool.node(id);
        self.front = node.next;
        self.remaining -= 1;
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.pool.node(id);
        self.back = node.prev;
        self.remaining -= 1;
        Some((id, &node.value))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
