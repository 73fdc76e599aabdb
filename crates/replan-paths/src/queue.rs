use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::QueueError;
use crate::key::Key;

/// A queued node with its priority.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueueEntry<N> {
    pub node: N,
    pub key: Key,
}

/// Binary min-heap over `(node, key)` pairs with a node → slot map.
///
/// Besides the usual push/pop it supports removing or re-keying any queued node
/// in O(log n), and O(1) membership tests. Each node appears at most once.
/// Ties are ordered by [`Key`] alone.
#[derive(Clone, Debug)]
pub struct IndexedQueue<N> {
    heap: Vec<QueueEntry<N>>,
    // Always an exact inverse of `heap`: positions[heap[i].node] == i.
    positions: FxHashMap<N, usize>,
}

impl<N> Default for IndexedQueue<N> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            positions: FxHashMap::default(),
        }
    }
}

impl<N: Copy + Eq + Hash> IndexedQueue<N> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Build a queue by inserting every pair in order.
    pub fn from_entries<I>(entries: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = (N, Key)>,
    {
        let entries = entries.into_iter();
        let mut queue = Self::with_capacity(entries.size_hint().0);
        for (node, key) in entries {
            queue.insert(node, key)?;
        }
        Ok(queue)
    }

    /// Number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `node` is queued.
    #[inline]
    pub fn contains(&self, node: N) -> bool {
        self.positions.contains_key(&node)
    }

    /// The stored key of `node`, if queued.
    pub fn key_of(&self, node: N) -> Option<Key> {
        self.positions.get(&node).map(|&i| self.heap[i].key)
    }

    /// The node with the smallest key.
    pub fn top(&self) -> Result<N, QueueError> {
        self.peek().map(|e| e.node)
    }

    /// The smallest key.
    pub fn top_key(&self) -> Result<Key, QueueError> {
        self.peek().map(|e| e.key)
    }

    /// The entry with the smallest key.
    pub fn peek(&self) -> Result<QueueEntry<N>, QueueError> {
        self.heap.first().copied().ok_or(QueueError::EmptyQueue)
    }

    /// Queue `node` with `key`.
    pub fn insert(&mut self, node: N, key: Key) -> Result<(), QueueError> {
        if self.contains(node) {
            return Err(QueueError::DuplicateNode);
        }
        let i = self.heap.len();
        self.heap.push(QueueEntry { node, key });
        self.positions.insert(node, i);
        self.sift_up(i);
        Ok(())
    }

    /// Remove and return the node with the smallest key.
    pub fn pop(&mut self) -> Result<N, QueueError> {
        let node = self.top()?;
        self.remove(node)?;
        Ok(node)
    }

    /// Remove `node`, returning the key it was stored with.
    pub fn remove(&mut self, node: N) -> Result<Key, QueueError> {
        let i = *self.positions.get(&node).ok_or(QueueError::NodeNotFound)?;
        let last = self.heap.len() - 1;
        self.swap(i, last);
        let removed = self.heap.pop().ok_or(QueueError::NodeNotFound)?;
        self.positions.remove(&node);
        // The entry moved into slot `i` came from the bottom of an unrelated
        // subtree, so it may belong above or below.
        if i < self.heap.len() {
            self.resift(i);
        }
        Ok(removed.key)
    }

    /// Replace the key of `node`. The new key may be larger or smaller.
    pub fn update(&mut self, node: N, key: Key) -> Result<(), QueueError> {
        let i = *self.positions.get(&node).ok_or(QueueError::NodeNotFound)?;
        self.heap[i].key = key;
        self.resift(i);
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Entries in heap (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = QueueEntry<N>> + '_ {
        self.heap.iter().copied()
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    #[inline]
    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    #[inline]
    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn resift(&mut self, i: usize) {
        if self.sift_up(i) == i {
            self.sift_down(i);
        }
    }

    /// Returns the final slot of the entry that started at `i`.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let p = Self::parent(i);
            if self.heap[p].key > self.heap[i].key {
                self.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let l = Self::left(i);
            let r = l + 1;
            let mut smallest = i;
            if l < len && self.heap[l].key < self.heap[smallest].key {
                smallest = l;
            }
            if r < len && self.heap[r].key < self.heap[smallest].key {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i].node, i);
        self.positions.insert(self.heap[j].node, j);
    }
}
