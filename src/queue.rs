//! The Ordered Pending Queue (OPQ): a sequence of owned elements kept sorted
//! under a caller-supplied comparator, with FIFO tie-breaking and
//! index-addressable access.
//!
//! Grounded on the `Unscheduled`/priority-queue shape in the teacher's PVF
//! execution queue, generalised over payload type per the "opaque ownership"
//! redesign note: the original carries untyped payload pointers, this keeps
//! the element type a compile-time generic instead.

use std::cmp::Ordering;

/// A sequence of owned `T`s, kept sorted by `compare`. Backed by a `Vec`
/// rather than a linked list: `at`/`size`/`peek` are O(1) and `offer`/
/// `remove_at` are O(n), an acceptable trade at simulator scale and a better
/// match for the indexed-access contract than a heap would be.
pub struct PendingQueue<T> {
    items: Vec<T>,
    compare: Box<dyn Fn(&T, &T) -> Ordering>,
}

impl<T> PendingQueue<T> {
    /// Creates an empty queue ordered by `compare`. `compare(a, b) ==
    /// Ordering::Less` means "a strictly precedes b".
    pub fn new(compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Self { items: Vec::new(), compare: Box::new(compare) }
    }

    /// Inserts `item`, keeping the sequence sorted. Ties land after existing
    /// equals (stable FIFO), because insertion stops at the first *strictly*
    /// greater element rather than the first greater-or-equal one. Returns
    /// the landing rank (0 = head).
    pub fn offer(&mut self, item: T) -> usize {
        let compare = &self.compare;
        let rank = self
            .items
            .iter()
            .position(|existing| compare(&item, existing) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(rank, item);
        rank
    }

    /// Non-mutating look at the head element, if any.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Removes and returns the head element, if any.
    pub fn poll(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// The `i`-th element (0-based), or `None` if out of range.
    pub fn at(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    /// Removes and returns the `i`-th element, shifting later elements up.
    /// `None` if out of range; never panics.
    pub fn remove_at(&mut self, i: usize) -> Option<T> {
        if i < self.items.len() {
            Some(self.items.remove(i))
        } else {
            None
        }
    }

    /// Removes every element identity-equal to `value`, without invoking
    /// the ordering comparator. Returns the count removed.
    pub fn remove_value(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.items.len();
        self.items.retain(|item| item != value);
        before - self.items.len()
    }

    /// Number of pending elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Releases every element. Equivalent to dropping the queue, kept as an
    /// explicit method so callers mirroring the simulator's teardown
    /// callback shape have a direct analogue to call.
    pub fn destroy(&mut self) {
        self.items.clear();
    }

    /// Iterates pending elements head to tail, for diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
