use core::mem;
use core::ptr;

/// Constructs elements into a run of raw slots while keeping the owning
/// vector in a valid state if a constructor panics.
///
/// The caller lowers the vector's length to `start` before handing over the
/// length reference, so an unwind can never expose uninitialized slots. On
/// drop without completion, every element constructed so far is destroyed,
/// any displaced tail at `[start + count, start + count + tail)` is moved
/// back down to close the gap, and the length is restored to cover exactly
/// the live elements.
pub(crate) struct Inserter<'a, T> {
    data: *mut T,
    length: &'a mut usize,
    start: usize,
    end: usize,
    limit: usize,
    tail: usize,
}

impl<'a, T> Inserter<'a, T> {
    /// # Safety
    /// The buffer behind `data` must have capacity for at least
    /// `start + count + tail` slots; `[0, start)` must be initialized and
    /// `*length` must equal `start`; if `tail > 0`, the slots
    /// `[start + count, start + count + tail)` must hold the displaced tail
    /// elements.
    pub unsafe fn new(
        data: *mut T,
        length: &'a mut usize,
        start: usize,
        count: usize,
        tail: usize,
    ) -> Self {
        debug_assert_eq!(*length, start);
        Self {
            data,
            length,
            start,
            end: start,
            limit: start + count,
            tail,
        }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        debug_assert!(self.end < self.limit);
        unsafe { self.data.add(self.end).write(val) };
        self.end += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        // the clone runs before the slot is claimed
        self.push(val.clone());
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.end == self.limit
    }

    /// Commit the constructed elements, setting the final length.
    pub fn complete(self) -> usize {
        debug_assert!(self.tail == 0 || self.full());
        let new_len = self.end + self.tail;
        let mut slf = mem::ManuallyDrop::new(self);
        *slf.length = new_len;
        new_len
    }
}

impl<T> Drop for Inserter<'_, T> {
    fn drop(&mut self) {
        unsafe {
            if self.end > self.start {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.data.add(self.start),
                    self.end - self.start,
                ));
            }
            if self.tail > 0 {
                ptr::copy(
                    self.data.add(self.limit),
                    self.data.add(self.start),
                    self.tail,
                );
            }
        }
        *self.length = self.start + self.tail;
    }
}

/// Constructs elements into a detached buffer that is not yet owned by any
/// vector, destroying them if a constructor panics. The buffer's memory
/// itself is released by its own owner.
pub(crate) struct SpareInserter<T> {
    data: *mut T,
    count: usize,
}

impl<T> SpareInserter<T> {
    /// # Safety
    /// `data` must point at raw slots with room for every pushed element,
    /// disjoint from any initialized storage.
    pub unsafe fn new(data: *mut T) -> Self {
        Self { data, count: 0 }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        unsafe { self.data.add(self.count).write(val) };
        self.count += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone());
    }

    /// Commit the constructed run, leaving its destruction to the caller.
    pub fn complete(self) -> usize {
        let count = self.count;
        mem::forget(self);
        count
    }
}

impl<T> Drop for SpareInserter<T> {
    fn drop(&mut self) {
        if self.count > 0 {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data, self.count));
            }
        }
    }
}
