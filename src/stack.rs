//! A LIFO stack adapter over any back-insertable container.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::error::InsertError;
use crate::vec::Vector;

/// The container operations a [`Stack`] requires of its backing storage.
///
/// Implemented for [`Vector`]; any sequence with efficient access to its
/// back can stand in.
pub trait Container<T> {
    fn push_back(&mut self, item: T);

    fn try_push_back(&mut self, item: T) -> Result<(), InsertError<T>>;

    fn pop_back(&mut self) -> Option<T>;

    fn back(&self) -> Option<&T>;

    fn back_mut(&mut self) -> Option<&mut T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, A: crate::alloc::RawAlloc> Container<T> for Vector<T, A> {
    #[inline]
    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn try_push_back(&mut self, item: T) -> Result<(), InsertError<T>> {
        self.try_push(item)
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.last()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    #[inline]
    fn len(&self) -> usize {
        Vector::len(self)
    }
}

/// A last-in, first-out stack.
///
/// All operations delegate to the back of the underlying container, so
/// push and pop run in the container's back-insertion time (amortized
/// constant for [`Vector`]). Elements other than the top are not
/// addressable through this interface.
pub struct Stack<T, C: Container<T> = Vector<T>> {
    inner: C,
    _pd: PhantomData<fn() -> T>,
}

impl<T> Stack<T> {
    /// Constructs a new, empty `Stack` backed by a [`Vector`].
    pub const fn new() -> Self {
        Self {
            inner: Vector::new(),
            _pd: PhantomData,
        }
    }
}

impl<T, C: Container<T>> Stack<T, C> {
    /// Constructs a stack over an existing container. Its current contents
    /// become the stack, with the container's back as the top.
    pub fn with_container(inner: C) -> Self {
        Self {
            inner,
            _pd: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.inner.push_back(item);
    }

    #[inline]
    pub fn try_push(&mut self, item: T) -> Result<(), InsertError<T>> {
        self.inner.try_push_back(item)
    }

    /// Remove and return the top element, or `None` when empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop_back()
    }

    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.inner.back()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.inner.back_mut()
    }

    /// Exchange the contents of two stacks in constant time.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.inner, &mut other.inner);
    }

    /// Unwrap the backing container.
    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T, C: Container<T> + Clone> Clone for Stack<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _pd: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.inner.clone_from(&source.inner);
    }
}

impl<T, C: Container<T> + fmt::Debug> fmt::Debug for Stack<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stack").field(&self.inner).finish()
    }
}

impl<T, C: Container<T> + Default> Default for Stack<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_container(C::default())
    }
}

impl<T, C: Container<T>> From<C> for Stack<T, C> {
    #[inline]
    fn from(inner: C) -> Self {
        Self::with_container(inner)
    }
}

impl<T, C: Container<T>> Extend<T> for Stack<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.inner.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_container(Vector::from_iter(iter))
    }
}

impl<T, C1, C2> PartialEq<Stack<T, C2>> for Stack<T, C1>
where
    C1: Container<T> + PartialEq<C2>,
    C2: Container<T>,
{
    #[inline]
    fn eq(&self, other: &Stack<T, C2>) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<T, C: Container<T> + Eq> Eq for Stack<T, C> {}

impl<T, C1, C2> PartialOrd<Stack<T, C2>> for Stack<T, C1>
where
    C1: Container<T> + PartialOrd<C2>,
    C2: Container<T>,
{
    #[inline]
    fn partial_cmp(&self, other: &Stack<T, C2>) -> Option<Ordering> {
        self.inner.partial_cmp(&other.inner)
    }
}

impl<T, C: Container<T> + Ord> Ord for Stack<T, C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
