//! Contiguous growable containers built from raw memory
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc as alloc_crate;

pub mod alloc;

pub mod error;

pub mod stack;

pub mod vec;

pub use {
    self::alloc::{Global, RawAlloc, RawAllocNew},
    self::error::{Error, InsertError},
    self::stack::{Container, Stack},
    self::vec::Vector,
};

#[cfg(feature = "zeroize")]
pub use self::{alloc::ZeroizingAlloc, vec::ZeroizingVector};
