//! Recency list for LRU ordering
//!
//! Entries live in a slot arena (`Vec<Option<Node>>` plus a free list) and are
//! threaded into a doubly-linked list by slot index, front = most recently
//! used. The index hands out slot ids; every operation here is O(1) given one.

use crate::entry::Entry;
use crate::error::InvariantError;

/// Stable handle to an arena slot
pub type SlotId = usize;

/// Node in the recency doubly-linked list
struct Node {
    entry: Entry,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly-linked recency ordering backed by a slot arena
pub struct RecencyList {
    nodes: Vec<Option<Node>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    free_list: Vec<SlotId>,
    len: usize,
}

impl RecencyList {
    /// Create an empty list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the most recently used entry
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Slot of the least recently used entry
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Entry stored in `slot`
    pub fn get(&self, slot: SlotId) -> Option<&Entry> {
        self.nodes.get(slot)?.as_ref().map(|node| &node.entry)
    }

    /// Mutable entry stored in `slot`; does not change its position
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Entry> {
        self.nodes.get_mut(slot)?.as_mut().map(|node| &mut node.entry)
    }

    /// Link a new entry at the front, returning its slot
    pub fn push_front(&mut self, entry: Entry) -> SlotId {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            entry,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;
        idx
    }

    /// Move an entry to the front; no-op if it already is the front
    pub fn move_to_front(&mut self, idx: SlotId) {
        if self.head == Some(idx) || self.get(idx).is_none() {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Unlink and return the least recently used entry
    pub fn pop_back(&mut self) -> Option<Entry> {
        let tail_idx = self.tail?;
        self.remove(tail_idx)
    }

    /// Unlink and return the entry in `slot`, freeing the slot
    pub fn remove(&mut self, idx: SlotId) -> Option<Entry> {
        self.get(idx)?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    /// Drop every entry and release the arena
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate front (MRU) to back (LRU); `.rev()` walks back to front
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Verify link symmetry, end pointers and the cached length
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = self.nodes.get(idx).and_then(Option::as_ref).ok_or_else(|| {
                InvariantError::new(format!("linked slot {} is empty", idx))
            })?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    idx, node.prev, prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("list longer than recorded length"));
            }
            prev = Some(idx);
            cursor = node.next;
        }

        if self.tail != prev {
            return Err(InvariantError::new(format!(
                "tail is {:?}, last linked slot is {:?}",
                self.tail, prev
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {} nodes, recorded length {}",
                count, self.len
            )));
        }
        let occupied = self.nodes.iter().filter(|node| node.is_some()).count();
        if occupied != self.len {
            return Err(InvariantError::new(format!(
                "{} occupied slots, {} linked",
                occupied, self.len
            )));
        }
        Ok(())
    }

    fn link_front(&mut self, idx: SlotId) {
        let old_head = self.head;
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: SlotId) {
        let (prev, next) = match &mut self.nodes[idx] {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> SlotId {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

/// Iterator over `(slot, entry)` pairs in recency order
pub struct Iter<'a> {
    nodes: &'a [Option<Node>],
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (SlotId, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        let node = self.nodes[idx].as_ref()?;
        self.front = node.next;
        self.remaining -= 1;
        Some((idx, &node.entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        let node = self.nodes[idx].as_ref()?;
        self.back = node.prev;
        self.remaining -= 1;
        Some((idx, &node.entry))
    }
}

impl ExactSizeIterator for Iter<'_> {}
