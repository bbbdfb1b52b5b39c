//! The allocation capability backing the containers.

use core::alloc::Layout;
use core::fmt;
use core::ptr::{self, NonNull};

use alloc_crate::alloc::{alloc as raw_alloc, dealloc as raw_dealloc, realloc as raw_realloc};

use crate::error::Error;

#[inline]
fn dangling_for(layout: Layout) -> NonNull<u8> {
    // SAFETY: layout alignments are guaranteed to be non-zero.
    unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}

/// A raw memory allocation capability.
///
/// Implementations hand out, resize, and release untyped blocks described
/// by a `Layout`. Zero-size requests must succeed without touching the
/// underlying allocator, returning an aligned dangling pointer.
pub trait RawAlloc: Clone + fmt::Debug {
    /// Try to allocate a block of memory, returning the new allocation.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, Error>;

    /// Try to adjust an existing allocation to a new layout. The block may
    /// be moved; on success the previous pointer must no longer be used.
    /// On failure the previous allocation remains valid and untouched.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this
    /// allocator with layout `old_layout`.
    unsafe fn try_resize(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, Error> {
        // Default implementation allocates a new block and copies over the
        // contents with a single bulk move.
        let new_ptr = self.try_alloc(new_layout)?;
        let cp_len = old_layout.size().min(new_ptr.len());
        if cp_len > 0 {
            ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr().cast(), cp_len);
        }
        self.release(ptr, old_layout);
        Ok(new_ptr)
    }

    /// Release an allocation produced by this allocator.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this
    /// allocator with layout `layout`.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// A `RawAlloc` with a constant initializer, enabling `const` container
/// construction.
pub trait RawAllocNew: RawAlloc + Copy {
    /// The constant initializer for this allocator
    const NEW: Self;
}

/// The default allocation capability, backed by the global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, Error> {
        let ptr = if layout.size() == 0 {
            dangling_for(layout)
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(Error::AllocFailed);
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn try_resize(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, Error> {
        // `realloc` relocates the occupied bytes in one request, and may
        // return the same address. It requires a matching alignment.
        if old_layout.align() != new_layout.align() {
            let new_ptr = self.try_alloc(new_layout)?;
            let cp_len = old_layout.size().min(new_ptr.len());
            if cp_len > 0 {
                ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr().cast(), cp_len);
            }
            self.release(ptr, old_layout);
            return Ok(new_ptr);
        }
        if old_layout.size() == 0 {
            return self.try_alloc(new_layout);
        }
        if new_layout.size() == 0 {
            self.release(ptr, old_layout);
            return Ok(NonNull::slice_from_raw_parts(dangling_for(new_layout), 0));
        }
        let Some(new_ptr) = NonNull::new(raw_realloc(ptr.as_ptr(), old_layout, new_layout.size()))
        else {
            return Err(Error::AllocFailed);
        };
        Ok(NonNull::slice_from_raw_parts(new_ptr, new_layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

impl RawAllocNew for Global {
    const NEW: Self = Global;
}

#[cfg(feature = "zeroize")]
/// An allocator wrapper which zeroes each buffer as it is released.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZeroizingAlloc<A>(pub A);

#[cfg(feature = "zeroize")]
impl<A: RawAlloc> RawAlloc for ZeroizingAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, Error> {
        self.0.try_alloc(layout)
    }

    // The default `try_resize` is kept deliberately: it always allocates a
    // new block and releases (zeroizing) the old one, so no stale copy of
    // the contents survives an in-place expansion.

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        use zeroize::Zeroize;

        if layout.size() > 0 {
            let mem = core::slice::from_raw_parts_mut(ptr.as_ptr(), layout.size());
            mem.zeroize();
        }
        self.0.release(ptr, layout)
    }
}

#[cfg(feature = "zeroize")]
impl<A: RawAllocNew> RawAllocNew for ZeroizingAlloc<A> {
    const NEW: Self = ZeroizingAlloc(A::NEW);
}
