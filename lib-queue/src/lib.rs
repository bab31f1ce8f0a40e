#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::iter::{DoubleEndedIterator, ExactSizeIterator, Iterator};

/// Fixed capacity FIFO ring buffer. The capacity is picked at runtime but the queue never
/// allocates after construction.
/// 
pub struct Queue<T> {
    pub(crate) data: Vec<Option<T>>,
    
    /// Amount of items currently in the queue.
    pub(crate) size: usize,

    /// Index of the oldest item in the queue (i.e. the next item to be taken from the queue)
    pub(crate) bottom: usize,
}

impl<T> Queue<T> {
    pub fn new(capacity: usize) -> Queue<T> {
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);
        Queue {
            data,
            size: 0,
            bottom: 0,
        }
    }

    /// Maximum amount of items the queue can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Tries to push an element to the top of the queue and returns `None` if it was successful or
    /// returns the item again if there was no space left on the queue. 
    /// 
    pub fn try_push(&mut self, item: T) -> Option<T> {
        if self.size < self.capacity() {
            let index = self.slot(self.size);
            self.data[index] = Some(item);
            self.size += 1;
            None
        } else {
            Some(item)
        }
    }

    /// Pushes an element to the top of the queue, evicting and returning the oldest element when
    /// the queue is already full. A zero capacity queue hands the item straight back.
    /// 
    pub fn push_overwrite(&mut self, item: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(item);
        }

        let evicted = if self.is_full() { self.next() } else { None };
        let rejected = self.try_push(item);
        debug_assert!(rejected.is_none());
        evicted
    }

    /// Removes the top element (i.e. the last one pushed) from the queue or returns None if the
    /// queue was empty. Note that this is essentially using the queue like a stack, to get the 
    /// oldest item in the queue you want to use `next()`.
    /// 
    pub fn pop(&mut self) -> Option<T> {
        if self.size > 0 {
            let index = self.slot(self.size - 1);
            self.size -= 1;
            return self.data[index].take();
        }
        None
    }

    /// Item at `index` counted from the oldest item.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.size {
            self.data[self.slot(index)].as_ref()
        } else {
            None
        }
    }

    /// Drops every item, the capacity stays the same.
    pub fn clear(&mut self) {
        for slot in self.data.iter_mut() {
            *slot = None;
        }
        self.size = 0;
        self.bottom = 0;
    }

    /// Iterates over all items from oldest to newest without removing them.
    /// 
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { queue: self, front: 0, back: self.size }
    }

    /// Iterates over the newest `n` items (or all of them if there are fewer), oldest first.
    /// 
    pub fn latest(&self, n: usize) -> Iter<'_, T> {
        let n = n.min(self.size);
        Iter { queue: self, front: self.size - n, back: self.size }
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.bottom + offset) % self.capacity()
    }
}

impl<T: Sized + fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queue ")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Iterator for Queue<T> {
    type Item = T;

    /// Removes the oldest element from the queue or returns None if the queue is empty.
    /// 
    fn next(&mut self) -> Option<T> {
        if self.size > 0 {
            let item = self.data[self.bottom].take();
            self.bottom = (self.bottom + 1) % self.capacity();
            self.size -= 1; 
            return item;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for Queue<T> {}

/// Borrowing iterator over a [`Queue`], see [`Queue::iter`] and [`Queue::latest`].
pub struct Iter<'a, T> {
    queue: &'a Queue<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { queue: self.queue, front: self.front, back: self.back }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            let item = self.queue.get(self.front);
            self.front += 1;
            return item;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            return self.queue.get(self.back);
        }
        None
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
