use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::NonNull;

use crate::alloc::{RawAlloc, RawAllocNew};
use crate::error::Error;

#[inline]
pub(crate) fn array_layout<T>(count: usize) -> Result<Layout, Error> {
    Layout::array::<T>(count).map_err(|_| Error::CapacityOverflow)
}

/// The raw allocation behind a `Vector`: a base pointer, the number of
/// addressable slots, and the allocation capability that produced it.
///
/// The buffer knows nothing about which slots are initialized; dropping it
/// only releases the memory. Tracking and destroying live elements is the
/// owning `Vector`'s job.
#[derive(Debug)]
pub(crate) struct VecBuffer<T, A: RawAlloc> {
    data: NonNull<T>,
    capacity: usize,
    alloc: A,
}

impl<T, A: RawAlloc> VecBuffer<T, A> {
    /// The canonical empty state: dangling pointer, zero capacity.
    pub const fn dangling_in(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            alloc,
        }
    }

    pub fn try_allocate_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        if size_of::<T>() == 0 {
            return Ok(Self {
                data: NonNull::dangling(),
                capacity: usize::MAX,
                alloc,
            });
        }
        let layout = array_layout::<T>(capacity)?;
        let ptr = alloc.try_alloc(layout)?;
        Ok(Self {
            data: ptr.cast(),
            capacity,
            alloc,
        })
    }

    /// Adjust the allocation to hold exactly `capacity` slots, relocating
    /// the occupied bytes with a single bulk request. On failure the
    /// existing allocation is untouched.
    pub fn try_resize(&mut self, capacity: usize) -> Result<(), Error> {
        if size_of::<T>() == 0 {
            self.capacity = usize::MAX;
            return Ok(());
        }
        if capacity == self.capacity {
            return Ok(());
        }
        let new_layout = array_layout::<T>(capacity)?;
        let ptr = if self.capacity == 0 {
            self.alloc.try_alloc(new_layout)?
        } else {
            let old_layout = array_layout::<T>(self.capacity)?;
            unsafe {
                self.alloc
                    .try_resize(self.data.cast(), old_layout, new_layout)?
            }
        };
        self.data = if capacity == 0 {
            NonNull::dangling()
        } else {
            ptr.cast()
        };
        self.capacity = capacity;
        Ok(())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }
}

impl<T, A: RawAllocNew> VecBuffer<T, A> {
    pub const NEW: Self = Self::dangling_in(A::NEW);
}

impl<T, A: RawAlloc> Drop for VecBuffer<T, A> {
    fn drop(&mut self) {
        if size_of::<T>() > 0 && self.capacity > 0 {
            let layout = array_layout::<T>(self.capacity).expect("error calculating layout");
            unsafe {
                self.alloc.release(self.data.cast(), layout);
            }
        }
    }
}
