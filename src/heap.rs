//! Mergeable min-priority queue (Fibonacci heap)
//!
//! Nodes live in a flat arena indexed by `usize`; the parent/child/sibling
//! pointer web of the textbook structure becomes plain index fields, which
//! keeps every operation safe Rust without reference counting. Sibling
//! lists are circular and doubly linked. Each slot carries a generation
//! counter so a handle kept past the death of its node is detected instead
//! of silently addressing whatever was allocated into the recycled slot.
//!
//! Amortized costs: `insert` and `union` O(1), `decrease_key` O(1),
//! `extract_min` and `delete` O(log n).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GraphError, Result};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Addressable reference to an element inside a [`FibHeap`].
///
/// Returned by [`FibHeap::insert`] so the same logical element can later be
/// targeted by `decrease_key` or `delete` without a linear search. A handle
/// is invalidated when its element is removed, and when its heap is
/// consumed by [`FibHeap::union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapHandle {
    heap: u64,
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot<T> {
    /// `None` marks a freed slot awaiting reuse
    value: Option<T>,
    parent: Option<usize>,
    /// Any one child; the rest are reachable through its sibling ring
    child: Option<usize>,
    left: usize,
    right: usize,
    /// Number of children
    rank: usize,
    /// Has this node lost a child since it last became someone's child
    marked: bool,
    generation: u64,
}

/// Mergeable min-priority queue over a totally ordered value type
#[derive(Debug)]
pub struct FibHeap<T: Ord> {
    id: u64,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    min: Option<usize>,
    len: usize,
}

impl<T: Ord> Default for FibHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FibHeap<T> {
    /// Create an empty heap
    pub fn new() -> Self {
        FibHeap {
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            min: None,
            len: 0,
        }
    }

    /// Number of elements currently in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value, returning a handle for later `decrease_key`/`delete`
    pub fn insert(&mut self, value: T) -> HeapHandle {
        let idx = self.alloc(value);
        self.add_to_root_list(idx);
        self.len += 1;
        HeapHandle {
            heap: self.id,
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Peek at the minimum value without removing it
    pub fn minimum(&self) -> Option<&T> {
        self.min.and_then(|m| self.slots[m].value.as_ref())
    }

    /// Remove and return the minimum value
    pub fn extract_min(&mut self) -> Option<T> {
        let m = self.min?;

        // Promote every child of the minimum to the root list
        let children = self.child_ring(m);
        for c in children {
            self.slots[c].parent = None;
            self.slots[c].marked = false;
            self.insert_after(m, c);
        }
        self.slots[m].child = None;

        let right = self.slots[m].right;
        self.remove_from_ring(m);
        if right == m {
            self.min = None;
        } else {
            self.min = Some(right);
            self.consolidate();
        }

        let value = self.slots[m].value.take();
        self.release(m);
        self.len -= 1;
        value
    }

    /// Merge `other` into `self` in a single root-list splice.
    ///
    /// `other`'s arena is rebased into this heap first, which is O(len) in
    /// the consumed heap; handles minted by `other` are invalidated and
    /// report [`GraphError::StaleHandle`] if used afterwards.
    pub fn union(&mut self, other: FibHeap<T>) {
        if other.len == 0 {
            return;
        }

        let offset = self.slots.len();
        for mut slot in other.slots {
            slot.parent = slot.parent.map(|p| p + offset);
            slot.child = slot.child.map(|c| c + offset);
            slot.left += offset;
            slot.right += offset;
            self.slots.push(slot);
        }
        for f in other.free {
            self.free.push(f + offset);
        }

        let other_min = other.min.map(|m| m + offset);
        match (self.min, other_min) {
            (None, Some(om)) => self.min = Some(om),
            (Some(sm), Some(om)) => {
                // Concatenate the two circular root lists
                let sr = self.slots[sm].right;
                let or = self.slots[om].right;
                self.slots[sm].right = or;
                self.slots[or].left = sm;
                self.slots[om].right = sr;
                self.slots[sr].left = om;
                if self.key(om) < self.key(sm) {
                    self.min = Some(om);
                }
            }
            (_, None) => {}
        }
        self.len += other.len;
    }

    /// Lower the value of the element behind `handle`.
    ///
    /// Fails with [`GraphError::KeyIncrease`] if `new_value` is greater
    /// than the current value; keys may only decrease.
    pub fn decrease_key(&mut self, handle: &HeapHandle, new_value: T) -> Result<()> {
        let idx = self.resolve(handle)?;
        if &new_value > self.key(idx) {
            return Err(GraphError::KeyIncrease);
        }
        self.slots[idx].value = Some(new_value);

        if let Some(p) = self.slots[idx].parent {
            if self.key(idx) < self.key(p) {
                self.cut(idx, p);
                self.cascading_cut(p);
            }
        }
        if let Some(m) = self.min {
            if self.key(idx) < self.key(m) {
                self.min = Some(idx);
            }
        }
        Ok(())
    }

    /// Remove exactly the element behind `handle`, returning its value
    pub fn delete(&mut self, handle: &HeapHandle) -> Result<T> {
        let idx = self.resolve(handle)?;
        if self.min == Some(idx) {
            return self.extract_min().ok_or(GraphError::StaleHandle);
        }

        if let Some(p) = self.slots[idx].parent {
            self.cut(idx, p);
            self.cascading_cut(p);
        }

        // idx is now a non-minimum root; promote its children and unlink it
        let children = self.child_ring(idx);
        for c in children {
            self.slots[c].parent = None;
            self.slots[c].marked = false;
            self.insert_after(idx, c);
        }
        self.slots[idx].child = None;
        self.remove_from_ring(idx);

        let value = self.slots[idx].value.take();
        self.release(idx);
        self.len -= 1;
        value.ok_or(GraphError::StaleHandle)
    }

    fn resolve(&self, handle: &HeapHandle) -> Result<usize> {
        if handle.heap != self.id {
            return Err(GraphError::StaleHandle);
        }
        let slot = self.slots.get(handle.index).ok_or(GraphError::StaleHandle)?;
        if slot.generation != handle.generation || slot.value.is_none() {
            return Err(GraphError::StaleHandle);
        }
        Ok(handle.index)
    }

    fn key(&self, idx: usize) -> &T {
        self.slots[idx]
            .value
            .as_ref()
            .expect("linked slot is always occupied")
    }

    fn alloc(&mut self, value: T) -> usize {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx];
            slot.value = Some(value);
            slot.left = idx;
            slot.right = idx;
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                value: Some(value),
                parent: None,
                child: None,
                left: idx,
                right: idx,
                rank: 0,
                marked: false,
                generation: 0,
            });
            idx
        }
    }

    /// Return a freed slot to the free list, bumping its generation so any
    /// outstanding handle to the dead element stops resolving
    fn release(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        slot.parent = None;
        slot.child = None;
        slot.left = idx;
        slot.right = idx;
        slot.rank = 0;
        slot.marked = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
    }

    /// Insert `idx` into the circular ring immediately after `at`
    fn insert_after(&mut self, at: usize, idx: usize) {
        let r = self.slots[at].right;
        self.slots[at].right = idx;
        self.slots[idx].left = at;
        self.slots[idx].right = r;
        self.slots[r].left = idx;
    }

    /// Unlink `idx` from its sibling ring, leaving it self-linked
    fn remove_from_ring(&mut self, idx: usize) {
        let l = self.slots[idx].left;
        let r = self.slots[idx].right;
        self.slots[l].right = r;
        self.slots[r].left = l;
        self.slots[idx].left = idx;
        self.slots[idx].right = idx;
    }

    fn add_to_root_list(&mut self, idx: usize) {
        match self.min {
            None => {
                self.slots[idx].left = idx;
                self.slots[idx].right = idx;
                self.min = Some(idx);
            }
            Some(m) => {
                self.insert_after(m, idx);
                if self.key(idx) < self.key(m) {
                    self.min = Some(idx);
                }
            }
        }
    }

    /// Collect the members of `idx`'s child ring
    fn child_ring(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(first) = self.slots[idx].child {
            let mut c = first;
            loop {
                out.push(c);
                c = self.slots[c].right;
                if c == first {
                    break;
                }
            }
        }
        out
    }

    /// Merge roots pairwise by equal rank until at most one root survives
    /// per rank, then rebuild the root list and the minimum pointer
    fn consolidate(&mut self) {
        let Some(start) = self.min else { return };

        let mut roots = Vec::new();
        let mut r = start;
        loop {
            roots.push(r);
            r = self.slots[r].right;
            if r == start {
                break;
            }
        }
        for &root in &roots {
            self.slots[root].left = root;
            self.slots[root].right = root;
        }

        let mut by_rank: Vec<Option<usize>> = Vec::new();
        for mut x in roots {
            let mut rank = self.slots[x].rank;
            loop {
                if by_rank.len() <= rank {
                    by_rank.resize(rank + 1, None);
                }
                match by_rank[rank].take() {
                    None => {
                        by_rank[rank] = Some(x);
                        break;
                    }
                    Some(y) => {
                        let (winner, loser) = if self.key(y) < self.key(x) {
                            (y, x)
                        } else {
                            (x, y)
                        };
                        self.link(loser, winner);
                        x = winner;
                        rank = self.slots[x].rank;
                    }
                }
            }
        }

        self.min = None;
        for idx in by_rank.into_iter().flatten() {
            self.add_to_root_list(idx);
        }
    }

    /// Make the standalone root `child` a child of the standalone root `parent`
    fn link(&mut self, child: usize, parent: usize) {
        self.slots[child].parent = Some(parent);
        self.slots[child].marked = false;
        match self.slots[parent].child {
            None => self.slots[parent].child = Some(child),
            Some(first) => self.insert_after(first, child),
        }
        self.slots[parent].rank += 1;
    }

    /// Cut `idx` away from `parent` and promote it to the root list
    fn cut(&mut self, idx: usize, parent: usize) {
        if self.slots[parent].child == Some(idx) {
            self.slots[parent].child = if self.slots[idx].right == idx {
                None
            } else {
                Some(self.slots[idx].right)
            };
        }
        self.remove_from_ring(idx);
        self.slots[parent].rank -= 1;
        self.slots[idx].parent = None;
        self.slots[idx].marked = false;
        self.add_to_root_list(idx);
    }

    /// Walk up from a node that just lost a child, cutting every already
    /// marked ancestor and marking the first unmarked one
    fn cascading_cut(&mut self, idx: usize) {
        let mut cur = idx;
        while let Some(p) = self.slots[cur].parent {
            if !self.slots[cur].marked {
                self.slots[cur].marked = true;
                break;
            }
            self.cut(cur, p);
            cur = p;
        }
    }
}
