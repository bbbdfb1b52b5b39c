//! The dynamic array engine: a contiguous growable array with explicit
//! capacity control and a pluggable allocation capability.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::mem::{self, size_of, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Range, RangeBounds};
use core::ptr;
use core::slice;

use crate::alloc::{Global, RawAlloc, RawAllocNew};
use crate::error::{Error, InsertError};

use self::buffer::VecBuffer;
use self::insert::{Inserter, SpareInserter};

pub use self::into_iter::IntoIter;

pub(crate) mod buffer;
mod insert;
mod into_iter;
mod macros;

#[cfg(feature = "zeroize")]
use crate::alloc::ZeroizingAlloc;

#[cfg(feature = "zeroize")]
/// A `Vector` which automatically zeroes its buffer when it is released.
pub type ZeroizingVector<T> = Vector<T, ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
pub(crate) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => match i.checked_add(1) {
            Some(start) => start,
            None => index_panic(),
        },
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => match i.checked_add(1) {
            Some(end) => end,
            None => index_panic(),
        },
        Bound::Excluded(i) => *i,
    };
    Range { start, end }
}

#[inline]
/// Create a `Vector<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> Vector<T> {
    let mut vec = Vector::with_capacity(N);
    vec.extend(data);
    vec
}

#[inline]
/// Create a `Vector<T>` holding `count` clones of `elem`.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> Vector<T> {
    Vector::from_elem_in(elem, count, Global)
}

/// A contiguous growable array.
///
/// One heap allocation backs each instance; the logical length and the
/// allocated capacity are tracked separately, and all slots beyond the
/// length are raw, unconstructed memory. Appending runs in amortized
/// constant time; arbitrary-position insertion and removal are linear in
/// the distance to the end.
///
/// Any operation that reallocates or shifts elements invalidates
/// outstanding references into the buffer; the borrow checker enforces
/// this statically.
pub struct Vector<T, A: RawAlloc = Global> {
    buf: VecBuffer<T, A>,
    length: usize,
}

impl<T, A: RawAllocNew> Vector<T, A> {
    /// Constructs a new, empty `Vector`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    pub const fn new() -> Self {
        Self {
            buf: VecBuffer::NEW,
            length: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::try_with_capacity_in(capacity, A::NEW)
    }

    /// Constructs a vector of `count` default-constructed elements.
    pub fn with_default(count: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(count);
        vec.resize_with(count, T::default);
        vec
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(data, A::NEW) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice(data: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::try_from_slice_in(data, A::NEW)
    }
}

impl<T, A: RawAlloc> Vector<T, A> {
    /// Constructs a new, empty `Vector` with the given allocation
    /// capability.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: VecBuffer::dangling_in(alloc),
            length: 0,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        Ok(Self {
            buf: VecBuffer::try_allocate_in(capacity, alloc)?,
            length: 0,
        })
    }

    pub fn from_slice_in(data: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(data, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice_in(data: &[T], alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(data.len(), alloc)?;
        vec.try_extend_from_slice(data)?;
        Ok(vec)
    }

    pub fn from_elem_in(value: T, count: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem_in(value, count, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_elem_in(value: T, count: usize, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        if count > 0 {
            unsafe {
                let data = vec.buf.data_ptr_mut();
                let mut insert = Inserter::new(data, &mut vec.length, 0, count, 0);
                for _ in 0..count - 1 {
                    insert.push_clone(&value);
                }
                insert.push(value);
                insert.complete();
            }
        }
        Ok(vec)
    }
}

impl<T, A: RawAlloc> Vector<T, A> {
    #[inline]
    fn into_parts(self) -> (VecBuffer<T, A>, usize) {
        let me = ManuallyDrop::new(self);
        (unsafe { ptr::read(&me.buf) }, me.length)
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.data_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.data_ptr_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.data_ptr(), self.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.data_ptr_mut(), self.length) }
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        if index < self.length {
            Ok(unsafe { &*self.buf.data_ptr().add(index) })
        } else {
            Err(Error::OutOfRange)
        }
    }

    /// Checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        if index < self.length {
            Ok(unsafe { &mut *self.buf.data_ptr_mut().add(index) })
        } else {
            Err(Error::OutOfRange)
        }
    }

    /// Ensure the capacity is at least `capacity` slots.
    ///
    /// Only ever grows; a request at or below the current capacity is a
    /// no-op. Existing elements retain their values but may move.
    #[inline]
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity <= self.buf.capacity() {
            return Ok(());
        }
        self.buf.try_resize(capacity)
    }

    /// Reallocate to exactly the current length.
    ///
    /// Unlike the usual non-binding request, this implementation always
    /// performs the reallocation.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_shrink_to_fit(&mut self) -> Result<(), Error> {
        if self.buf.capacity() != self.length {
            self.buf.try_resize(self.length)?;
        }
        Ok(())
    }

    fn try_grow_one(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.length, self.buf.capacity());
        let target = self
            .buf
            .capacity()
            .checked_mul(2)
            .and_then(|cap| cap.checked_add(1))
            .ok_or(Error::CapacityOverflow)?;
        self.buf.try_resize(target)
    }

    fn try_grow_amortized(&mut self, extra: usize) -> Result<(), Error> {
        let needed = self
            .length
            .checked_add(extra)
            .ok_or(Error::CapacityOverflow)?;
        if needed <= self.buf.capacity() {
            return Ok(());
        }
        let preferred = self
            .length
            .checked_add(self.length.max(extra))
            .and_then(|cap| cap.checked_add(1))
            .unwrap_or(needed);
        let target = if buffer::array_layout::<T>(preferred).is_ok() {
            preferred
        } else {
            needed
        };
        self.buf.try_resize(target)
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        match self.try_push(item) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_push(&mut self, item: T) -> Result<(), InsertError<T>> {
        if self.length == self.buf.capacity() {
            if let Err(error) = self.try_grow_one() {
                return Err(InsertError::new(error, item));
            }
        }
        unsafe { self.push_unchecked(item) };
        Ok(())
    }

    /// # Safety
    /// The capacity must exceed the current length.
    #[inline]
    pub unsafe fn push_unchecked(&mut self, item: T) {
        debug_assert!(self.length < self.buf.capacity());
        self.buf.data_ptr_mut().add(self.length).write(item);
        self.length += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.length == 0 {
            None
        } else {
            self.length -= 1;
            Some(unsafe { ptr::read(self.buf.data_ptr().add(self.length)) })
        }
    }

    /// Insert `value` before position `index`, shifting everything at or
    /// after it one slot to the right. The new element lands at `index`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), InsertError<T>> {
        let len = self.length;
        if index > len {
            index_panic();
        }
        if len < self.buf.capacity() {
            unsafe {
                let head = self.buf.data_ptr_mut().add(index);
                if index < len {
                    ptr::copy(head, head.add(1), len - index);
                }
                head.write(value);
            }
            self.length = len + 1;
            Ok(())
        } else {
            self.insert_expand(index, value)
        }
    }

    // The expand path positions the new element while relocating, so no
    // element is copied twice.
    fn insert_expand(&mut self, index: usize, value: T) -> Result<(), InsertError<T>> {
        let len = self.length;
        let target = match len.checked_mul(2).and_then(|cap| cap.checked_add(1)) {
            Some(target) => target,
            None => return Err(InsertError::new(Error::CapacityOverflow, value)),
        };
        let mut spare = match VecBuffer::try_allocate_in(target, self.buf.allocator().clone()) {
            Ok(buf) => buf,
            Err(error) => return Err(InsertError::new(error, value)),
        };
        unsafe {
            let src = self.buf.data_ptr();
            let dst: *mut T = spare.data_ptr_mut();
            dst.add(index).write(value);
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), len - index);
        }
        mem::swap(&mut self.buf, &mut spare);
        self.length = len + 1;
        Ok(())
    }

    /// Insert `count` copies of `value` before position `index`.
    #[inline]
    pub fn insert_fill(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        match self.try_insert_fill(index, count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_fill(
        &mut self,
        index: usize,
        count: usize,
        value: T,
    ) -> Result<(), InsertError<T>>
    where
        T: Clone,
    {
        let len = self.length;
        if index > len {
            index_panic();
        }
        if count == 0 {
            return Ok(());
        }
        if self.buf.capacity() - len >= count {
            let tail = len - index;
            unsafe {
                let data = self.buf.data_ptr_mut();
                self.length = index;
                ptr::copy(data.add(index), data.add(index + count), tail);
                let mut insert = Inserter::new(data, &mut self.length, index, count, tail);
                for _ in 0..count - 1 {
                    insert.push_clone(&value);
                }
                insert.push(value);
                insert.complete();
            }
            Ok(())
        } else {
            self.insert_fill_expand(index, count, value)
        }
    }

    fn insert_fill_expand(
        &mut self,
        index: usize,
        count: usize,
        value: T,
    ) -> Result<(), InsertError<T>>
    where
        T: Clone,
    {
        let len = self.length;
        let target = match len.checked_add(count.max(len)).and_then(|cap| cap.checked_add(1)) {
            Some(target) => target,
            None => return Err(InsertError::new(Error::CapacityOverflow, value)),
        };
        let mut spare = match VecBuffer::try_allocate_in(target, self.buf.allocator().clone()) {
            Ok(buf) => buf,
            Err(error) => return Err(InsertError::new(error, value)),
        };
        unsafe {
            let dst: *mut T = spare.data_ptr_mut();
            // all fallible construction happens before any live element
            // is relocated, preserving the original on a panic
            let mut fill = SpareInserter::new(dst.add(index));
            for _ in 0..count - 1 {
                fill.push_clone(&value);
            }
            fill.push(value);
            fill.complete();
            let src = self.buf.data_ptr();
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + count), len - index);
        }
        mem::swap(&mut self.buf, &mut spare);
        self.length = len + count;
        Ok(())
    }

    /// Insert clones of `values` before position `index`.
    ///
    /// The source slice must not overlap this vector's own storage; such a
    /// source is rejected with [`Error::Aliased`] before any mutation
    /// occurs. (Safe callers cannot construct that overlap, since the
    /// vector is exclusively borrowed for the call.)
    #[inline]
    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        match self.try_insert_slice(index, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        let len = self.length;
        if index > len {
            index_panic();
        }
        if self.is_aliased(values) {
            return Err(Error::Aliased);
        }
        let count = values.len();
        if count == 0 {
            return Ok(());
        }
        if self.buf.capacity() - len >= count {
            let tail = len - index;
            unsafe {
                let data = self.buf.data_ptr_mut();
                self.length = index;
                ptr::copy(data.add(index), data.add(index + count), tail);
                let mut insert = Inserter::new(data, &mut self.length, index, count, tail);
                for item in values {
                    insert.push_clone(item);
                }
                insert.complete();
            }
            Ok(())
        } else {
            let target = len
                .checked_add(count.max(len))
                .and_then(|cap| cap.checked_add(1))
                .ok_or(Error::CapacityOverflow)?;
            let mut spare = VecBuffer::try_allocate_in(target, self.buf.allocator().clone())?;
            unsafe {
                let dst: *mut T = spare.data_ptr_mut();
                let mut fill = SpareInserter::new(dst.add(index));
                for item in values {
                    fill.push_clone(item);
                }
                fill.complete();
                let src = self.buf.data_ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + count), len - index);
            }
            mem::swap(&mut self.buf, &mut spare);
            self.length = len + count;
            Ok(())
        }
    }

    fn is_aliased(&self, values: &[T]) -> bool {
        if size_of::<T>() == 0 || self.buf.capacity() == 0 {
            return false;
        }
        let start = self.buf.data_ptr() as usize;
        let end = start + self.buf.capacity() * size_of::<T>();
        let src = values.as_ptr() as usize;
        src >= start && src < end
    }

    /// Insert the elements yielded by `iter` before position `index`.
    ///
    /// A source of unknown length cannot be pre-sized, so unless the
    /// insertion point is the end it is buffered into a temporary vector
    /// first and the gap is opened exactly once.
    #[inline]
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_insert_iter(index, iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.length;
        if index > len {
            index_panic();
        }
        if index == len {
            return self
                .try_extend(&mut iter.into_iter())
                .map_err(|error| error.error);
        }
        let mut buffered = Vector::new_in(self.buf.allocator().clone());
        buffered
            .try_extend(&mut iter.into_iter())
            .map_err(|error| error.error)?;
        self.try_insert_vector(index, buffered)
    }

    fn try_insert_vector(&mut self, index: usize, src: Vector<T, A>) -> Result<(), Error> {
        let count = src.length;
        if count == 0 {
            return Ok(());
        }
        let len = self.length;
        if self.buf.capacity() - len < count {
            self.try_grow_amortized(count)?;
        }
        let (src_buf, src_len) = src.into_parts();
        debug_assert_eq!(src_len, count);
        unsafe {
            let data = self.buf.data_ptr_mut();
            ptr::copy(data.add(index), data.add(index + count), len - index);
            ptr::copy_nonoverlapping(src_buf.data_ptr(), data.add(index), count);
        }
        self.length = len + count;
        // src_buf releases its raw memory; its elements were moved out
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the trailing
    /// elements one slot to the left.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.length;
        if index >= len {
            index_panic();
        }
        unsafe {
            let data = self.buf.data_ptr_mut();
            let result = ptr::read(data.add(index));
            ptr::copy(data.add(index + 1), data.add(index), len - index - 1);
            self.length = len - 1;
            result
        }
    }

    /// Remove the elements in `range`, shifting the trailing elements down.
    ///
    /// After the call, the first element beyond the removed range (if any)
    /// occupies the range's start index. Erasing `..` is equivalent to
    /// [`clear`](Self::clear).
    pub fn erase<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = bounds_to_range(range, self.length);
        if start > end || end > self.length {
            index_panic();
        }
        let removed = end - start;
        if removed == 0 {
            return;
        }
        let old_len = self.length;
        self.length = start;
        unsafe {
            let data = self.buf.data_ptr_mut();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(data.add(start), removed));
            ptr::copy(data.add(end), data.add(start), old_len - end);
        }
        self.length = old_len - removed;
    }

    /// Shorten the vector to `length` elements, destroying the tail. A
    /// request at or beyond the current length has no effect.
    pub fn truncate(&mut self, length: usize) {
        let old_len = self.length;
        if length < old_len {
            self.length = length;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.buf.data_ptr_mut().add(length),
                    old_len - length,
                ));
            }
        }
    }

    /// Destroy all elements. The capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        match new_len.cmp(&self.length) {
            Ordering::Greater => {
                let extra = new_len - self.length;
                self.try_grow_amortized(extra)?;
                let start = self.length;
                unsafe {
                    let data = self.buf.data_ptr_mut();
                    let mut insert = Inserter::new(data, &mut self.length, start, extra, 0);
                    for _ in 0..extra - 1 {
                        insert.push_clone(&value);
                    }
                    insert.push(value);
                    insert.complete();
                }
                Ok(())
            }
            Ordering::Less => {
                self.truncate(new_len);
                Ok(())
            }
            Ordering::Equal => Ok(()),
        }
    }

    #[inline]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), Error>
    where
        F: FnMut() -> T,
    {
        match new_len.cmp(&self.length) {
            Ordering::Greater => {
                let extra = new_len - self.length;
                self.try_grow_amortized(extra)?;
                let start = self.length;
                unsafe {
                    let data = self.buf.data_ptr_mut();
                    let mut insert = Inserter::new(data, &mut self.length, start, extra, 0);
                    for _ in 0..extra {
                        insert.push(f());
                    }
                    insert.complete();
                }
                Ok(())
            }
            Ordering::Less => {
                self.truncate(new_len);
                Ok(())
            }
            Ordering::Equal => Ok(()),
        }
    }

    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.try_grow_amortized(items.len())?;
        let start = self.length;
        unsafe {
            let data = self.buf.data_ptr_mut();
            let mut insert = Inserter::new(data, &mut self.length, start, items.len(), 0);
            for item in items {
                insert.push_clone(item);
            }
            insert.complete();
        }
        Ok(())
    }

    fn try_extend(&mut self, iter: &mut impl Iterator<Item = T>) -> Result<(), InsertError<T>> {
        loop {
            let Some(item) = iter.next() else {
                return Ok(());
            };
            if self.length == self.buf.capacity() {
                let min_extra = iter.size_hint().0.saturating_add(1);
                if let Err(error) = self.try_grow_amortized(min_extra) {
                    return Err(InsertError::new(error, item));
                }
            }
            unsafe { self.push_unchecked(item) };
        }
    }

    /// Replace the contents with `count` copies of `value`, reusing the
    /// existing capacity when it suffices.
    #[inline]
    pub fn assign_fill(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        match self.try_assign_fill(count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign_fill(&mut self, count: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        if count > self.buf.capacity() {
            let mut fresh = Self::try_from_elem_in(value, count, self.buf.allocator().clone())?;
            mem::swap(self, &mut fresh);
        } else if count > self.length {
            let len = self.length;
            for slot in self.as_mut_slice() {
                slot.clone_from(&value);
            }
            let extra = count - len;
            unsafe {
                let data = self.buf.data_ptr_mut();
                let mut insert = Inserter::new(data, &mut self.length, len, extra, 0);
                for _ in 0..extra - 1 {
                    insert.push_clone(&value);
                }
                insert.push(value);
                insert.complete();
            }
        } else {
            for slot in &mut self.as_mut_slice()[..count] {
                slot.clone_from(&value);
            }
            self.truncate(count);
        }
        Ok(())
    }

    /// Replace the contents with clones of `values`, reusing the existing
    /// capacity when it suffices.
    #[inline]
    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        match self.try_assign_slice(values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign_slice(&mut self, values: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        let count = values.len();
        if count > self.buf.capacity() {
            let mut fresh = Self::try_from_slice_in(values, self.buf.allocator().clone())?;
            mem::swap(self, &mut fresh);
        } else if count > self.length {
            let len = self.length;
            self.as_mut_slice().clone_from_slice(&values[..len]);
            unsafe {
                let data = self.buf.data_ptr_mut();
                let mut insert = Inserter::new(data, &mut self.length, len, count - len, 0);
                for item in &values[len..] {
                    insert.push_clone(item);
                }
                insert.complete();
            }
        } else {
            self.as_mut_slice()[..count].clone_from_slice(values);
            self.truncate(count);
        }
        Ok(())
    }

    /// Replace the contents with the elements yielded by `iter`,
    /// overwriting in place for as long as both sides have elements.
    #[inline]
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_assign_iter(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut cur = 0;
        while cur < self.length {
            match iter.next() {
                Some(item) => {
                    self.as_mut_slice()[cur] = item;
                    cur += 1;
                }
                None => {
                    self.truncate(cur);
                    return Ok(());
                }
            }
        }
        self.try_extend(&mut iter).map_err(|error| error.error)
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for Vector<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for Vector<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Borrow<[T]> for Vector<T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> BorrowMut<[T]> for Vector<T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: RawAlloc> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        match Self::try_from_slice_in(self.as_slice(), self.buf.allocator().clone()) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_slice(source.as_slice());
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A: RawAllocNew> Default for Vector<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: RawAlloc> Deref for Vector<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for Vector<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        if self.length > 0 {
            let to_drop =
                ptr::slice_from_raw_parts_mut(self.buf.data_ptr_mut(), self.length);
            self.length = 0;
            unsafe {
                ptr::drop_in_place(to_drop);
            }
        }
    }
}

impl<T, A: RawAlloc> Extend<T> for Vector<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, A: RawAlloc> Extend<&'a T> for Vector<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, A: RawAllocNew> FromIterator<T> for Vector<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity(min_cap);
        vec.extend(iter);
        vec
    }
}

impl<T: Clone, A: RawAllocNew> From<&[T]> for Vector<T, A> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: RawAllocNew> From<&mut [T]> for Vector<T, A> {
    #[inline]
    fn from(data: &mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: RawAllocNew, const N: usize> From<&[T; N]> for Vector<T, A> {
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, A: RawAllocNew, const N: usize> From<[T; N]> for Vector<T, A> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_iter(data)
    }
}

impl<T, A: RawAlloc> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let (buf, length) = self.into_parts();
        IntoIter::new(buf, length)
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, A1, T2, A2> PartialEq<Vector<T2, A2>> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, A: RawAlloc> Eq for Vector<T, A> {}

impl<T1, A1, T2> PartialEq<[T2]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, A1, T2> PartialEq<&[T2]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2> PartialEq<&mut [T2]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&mut [T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<[T2; N]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A2> PartialEq<Vector<T2, A2>> for [T1]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<T1, T2, A2> PartialEq<Vector<T2, A2>> for &[T1]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        other.eq(*self)
    }
}

impl<T, A1, A2> PartialOrd<Vector<T, A2>> for Vector<T, A1>
where
    T: PartialOrd,
    A1: RawAlloc,
    A2: RawAlloc,
{
    #[inline]
    fn partial_cmp(&self, other: &Vector<T, A2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: RawAlloc> Ord for Vector<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

unsafe impl<T: Send, A: RawAlloc + Send> Send for Vector<T, A> {}

unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for Vector<T, A> {}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::Zeroize for Vector<T, ZeroizingAlloc<A>> {
    #[inline]
    fn zeroize(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::ZeroizeOnDrop for Vector<T, ZeroizingAlloc<A>> {}
