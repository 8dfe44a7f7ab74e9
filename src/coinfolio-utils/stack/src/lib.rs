//! Bounded searchable stack for Coinfolio.
//!
//! [`SearchableStack`] is a fixed-capacity ring buffer with stack semantics.
//! Pushing onto a full stack silently overwrites the oldest element, so memory
//! use never grows past the capacity chosen at construction. Elements can be
//! read in O(1) by their offset from the top (0 = most recently pushed).

use std::num::NonZeroUsize;

use thiserror::Error;

/// Errors produced by [`SearchableStack`] accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// Pop or top on an empty stack.
    #[error("stack is empty")]
    Empty,

    /// Offset outside `[0, len)`.
    #[error("offset {offset} is out of range for a stack holding {len} elements")]
    OutOfRange { offset: usize, len: usize },

    /// A stack cannot be created without room for at least one element.
    #[error("stack capacity must be greater than zero")]
    ZeroCapacity,
}

/// Fixed-capacity stack with overwrite-on-full and O(1) lookup from the top.
#[derive(Debug, Clone)]
pub struct SearchableStack<T> {
    slots: Box<[Option<T>]>,
    most_recent: usize,
    len: usize,
}

impl<T> SearchableStack<T> {
    /// Create an empty stack holding at most `capacity` elements.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        Self {
            slots,
            // The first push lands on slot 0.
            most_recent: capacity - 1,
            len: 0,
        }
    }

    /// Create an empty stack from a plain capacity, rejecting zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, StackError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(StackError::ZeroCapacity)
    }

    /// Maximum number of elements the stack retains.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next push will overwrite the oldest element.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Push an element, overwriting the oldest one when the stack is full.
    pub fn push(&mut self, value: T) {
        let capacity = self.capacity();
        self.most_recent = (self.most_recent + 1) % capacity;
        self.slots[self.most_recent] = Some(value);
        if self.len < capacity {
            self.len += 1;
        }
    }

    /// Remove and return the most recently pushed element.
    pub fn pop(&mut self) -> Result<T, StackError> {
        if self.len == 0 {
            return Err(StackError::Empty);
        }

        let capacity = self.capacity();
        let value = self.slots[self.most_recent].take().ok_or(StackError::Empty)?;
        self.len -= 1;
        self.most_recent = (self.most_recent + capacity - 1) % capacity;
        Ok(value)
    }

    /// Borrow the most recently pushed element.
    pub fn top(&self) -> Result<&T, StackError> {
        if self.len == 0 {
            return Err(StackError::Empty);
        }
        self.element_at(0)
    }

    /// Borrow the element `offset` positions below the top.
    pub fn element_at(&self, offset: usize) -> Result<&T, StackError> {
        if offset >= self.len {
            return Err(StackError::OutOfRange {
                offset,
                len: self.len,
            });
        }

        self.slots[self.slot_index(offset)]
            .as_ref()
            .ok_or(StackError::OutOfRange {
                offset,
                len: self.len,
            })
    }

    /// Whether [`element_at`](Self::element_at) would succeed for `offset`.
    pub fn has_element_at(&self, offset: usize) -> bool {
        offset < self.len
    }

    /// Drop every element, keeping the capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.most_recent = self.capacity() - 1;
        self.len = 0;
    }

    /// Iterate from the most recent element to the oldest retained one.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self,
            offset: 0,
        }
    }

    fn slot_index(&self, offset: usize) -> usize {
        let capacity = self.capacity();
        (self.most_recent + capacity - offset) % capacity
    }
}

/// Iterator over a [`SearchableStack`], most recent first.
pub struct Iter<'a, T> {
    stack: &'a SearchableStack<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.element_at(self.offset).ok()?;
        self.offset += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stack.len().saturating_sub(self.offset);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a SearchableStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
