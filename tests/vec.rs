use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rstest::rstest;

use contig::{vector, Error, Vector};

/// An element which tracks the number of live instances and can be
/// poisoned to panic when cloned.
#[derive(Debug)]
struct Tracked {
    value: u32,
    panic_on_clone: bool,
    live: Arc<AtomicUsize>,
}

impl Tracked {
    fn new(value: u32, live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self {
            value,
            panic_on_clone: false,
            live: live.clone(),
        }
    }

    fn poisoned(value: u32, live: &Arc<AtomicUsize>) -> Self {
        let mut item = Self::new(value, live);
        item.panic_on_clone = true;
        item
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.panic_on_clone {
            panic!("clone failure");
        }
        Self::new(self.value, &self.live)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
    }
}

impl PartialEq<u32> for Tracked {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

fn tracked_vec(values: &[u32], live: &Arc<AtomicUsize>) -> Vector<Tracked> {
    let mut vec = Vector::with_capacity(values.len());
    for value in values {
        vec.push(Tracked::new(*value, live));
    }
    vec
}

#[test]
fn test_new() {
    let vec = Vector::<u32>::new();
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 0);
    assert!(vec.is_empty());
}

#[test]
fn test_push_pop() {
    let mut vec = Vector::<i32>::new();
    vec.push(1);
    vec.push(2);
    vec.push(3);
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.pop(), Some(3));
    assert_eq!(vec.pop(), Some(2));
    assert_eq!(vec.pop(), Some(1));
    assert_eq!(vec.pop(), None);
}

#[test]
fn test_push_growth_sequence() {
    let mut vec = Vector::<u32>::new();
    let mut caps = Vec::new();
    let mut last = vec.capacity();
    for i in 0..40 {
        vec.push(i);
        if vec.capacity() != last {
            last = vec.capacity();
            caps.push(last);
        }
    }
    // capacity doubles plus one each time the buffer fills
    assert_eq!(caps, [1, 3, 7, 15, 31, 63]);
}

#[test]
fn test_push_realloc_count_logarithmic() {
    let mut vec = Vector::<u32>::new();
    let mut reallocs = 0;
    let mut last = vec.capacity();
    for i in 0..10_000 {
        vec.push(i);
        if vec.capacity() != last {
            last = vec.capacity();
            reallocs += 1;
        }
    }
    assert!(reallocs <= 15, "{} reallocations", reallocs);
}

#[test]
fn test_with_capacity() {
    let mut vec = Vector::<u32>::with_capacity(10);
    assert_eq!(vec.capacity(), 10);
    for i in 0..10 {
        vec.push(i);
    }
    // no growth while within the reservation
    assert_eq!(vec.capacity(), 10);
}

#[test]
fn test_reserve() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.reserve(100);
    assert_eq!(vec.capacity(), 100);
    assert_eq!(vec, [1, 2, 3]);
    // a reservation at or below the capacity is a no-op
    vec.reserve(10);
    assert_eq!(vec.capacity(), 100);
}

#[test]
fn test_try_reserve_overflow() {
    let mut vec = Vector::<u64>::new();
    assert_eq!(vec.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn test_shrink_to_fit() {
    let mut vec = Vector::<u32>::with_capacity(50);
    vec.extend(0..10);
    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 10);
    assert_eq!(vec.len(), 10);
    vec.clear();
    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn test_swap_constant_time() {
    let mut a = Vector::<i32>::from_slice(&[1, 2, 3]);
    let mut b = Vector::<i32>::from_slice(&[9]);
    let (ptr_a, ptr_b) = (a.as_ptr(), b.as_ptr());
    core::mem::swap(&mut a, &mut b);
    assert_eq!(a, [9]);
    assert_eq!(b, [1, 2, 3]);
    // a pointer exchange only; no element moves
    assert_eq!(a.as_ptr(), ptr_b);
    assert_eq!(b.as_ptr(), ptr_a);
}

#[test]
fn test_take_leaves_empty() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    let taken = core::mem::take(&mut vec);
    assert_eq!(taken, [1, 2, 3]);
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn test_at() {
    let empty = Vector::<u32>::new();
    assert_eq!(empty.at(10), Err(Error::OutOfRange));
    let mut vec = Vector::<i32>::from_slice(&[10, 20, 30]);
    assert_eq!(vec.at(0), Ok(&10));
    assert_eq!(vec.at(vec.len() - 1), Ok(&30));
    assert_eq!(vec.at(2), Ok(&30));
    assert_eq!(vec.at(3), Err(Error::OutOfRange));
    *vec.at_mut(1).unwrap() = 25;
    assert_eq!(vec, [10, 25, 30]);
    assert_eq!(vec.at_mut(5), Err(Error::OutOfRange));
}

#[test]
fn test_insert() {
    let mut vec = Vector::<i32>::from_slice(&[4, 2, 3, 1, 0]);
    vec.insert(0, 6);
    vec.insert(0, 5);
    assert_eq!(vec, [5, 6, 4, 2, 3, 1, 0]);
    vec.insert(7, 9);
    assert_eq!(vec, [5, 6, 4, 2, 3, 1, 0, 9]);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn test_insert_out_of_bounds() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.insert(4, 0);
}

#[test]
fn test_insert_front_scenario() {
    // each front insertion pushes the prior front-inserted content back
    let mut vec = Vector::<i32>::new();
    vec.insert(0, 0);
    vec.insert(0, 1);
    vec.insert_slice(0, &[2, 3]);
    vec.insert_fill(0, 1, 4);
    assert_eq!(vec, [4, 2, 3, 1, 0]);
    let other = Vector::<i32>::from_slice(&[5, 6]);
    vec.insert_slice(0, &other);
    assert_eq!(vec, [5, 6, 4, 2, 3, 1, 0]);
}

#[test]
fn test_insert_fill() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.insert_fill(1, 3, 9);
    assert_eq!(vec, [1, 9, 9, 9, 2, 3]);
    vec.insert_fill(6, 2, 8);
    assert_eq!(vec, [1, 9, 9, 9, 2, 3, 8, 8]);
    vec.insert_fill(0, 0, 7);
    assert_eq!(vec.len(), 8);
}

#[test]
fn test_insert_fill_growth() {
    let mut vec = Vector::<u32>::with_capacity(4);
    vec.extend([1, 2, 3, 4]);
    vec.insert_fill(2, 10, 0);
    assert_eq!(vec.len(), 14);
    // bulk growth reserves len + max(count, len) + 1
    assert_eq!(vec.capacity(), 15);
    assert_eq!(vec, [1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 4]);
}

#[test]
fn test_insert_slice_middle() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 6, 7]);
    vec.insert_slice(2, &[3, 4, 5]);
    assert_eq!(vec, [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_insert_iter() {
    let mut vec = Vector::<i32>::from_slice(&[1, 5]);
    vec.insert_iter(1, (2..5).filter(|i| i % 7 != 0));
    assert_eq!(vec, [1, 2, 3, 4, 5]);
    vec.insert_iter(5, [6, 7]);
    assert_eq!(vec, [1, 2, 3, 4, 5, 6, 7]);
    vec.insert_iter(0, core::iter::empty());
    assert_eq!(vec.len(), 7);
}

#[test]
fn test_remove() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3, 4]);
    assert_eq!(vec.remove(1), 2);
    assert_eq!(vec, [1, 3, 4]);
    assert_eq!(vec.remove(2), 4);
    assert_eq!(vec, [1, 3]);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn test_remove_out_of_bounds() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.remove(3);
}

#[test]
fn test_erase_walkthrough() {
    let mut vec = (0u32..16).collect::<Vector<u32>>();
    assert_eq!(vec.capacity(), 16);
    vec.erase(1..2);
    assert_eq!(vec.len(), 15);
    assert_eq!(vec.at(1), Ok(&2));
    vec.erase(4..9);
    assert_eq!(vec, [0, 2, 3, 4, 10, 11, 12, 13, 14, 15]);
    vec.erase(6..);
    assert_eq!(vec, [0, 2, 3, 4, 10, 11]);
    vec.erase(..);
    assert!(vec.is_empty());
    // erasing never releases the allocation
    assert_eq!(vec.capacity(), 16);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn test_erase_excluded_bound_overflow() {
    use core::ops::Bound;

    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.erase((Bound::Excluded(usize::MAX), Bound::Unbounded));
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn test_erase_included_bound_overflow() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    vec.erase(0..=usize::MAX);
}

#[rstest]
#[case(0, 0, &[1, 2, 3, 4, 5])]
#[case(0, 5, &[])]
#[case(0, 2, &[3, 4, 5])]
#[case(3, 5, &[1, 2, 3])]
#[case(1, 4, &[1, 5])]
#[case(2, 2, &[1, 2, 3, 4, 5])]
fn test_erase_range(#[case] start: usize, #[case] end: usize, #[case] expect: &[u32]) {
    let mut vec = Vector::<u32>::from_slice(&[1, 2, 3, 4, 5]);
    vec.erase(start..end);
    assert_eq!(vec, expect);
}

#[test]
fn test_erase_drops() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = tracked_vec(&[0, 1, 2, 3, 4], &live);
    assert_eq!(live.load(Ordering::Relaxed), 5);
    vec.erase(1..4);
    assert_eq!(live.load(Ordering::Relaxed), 2);
    assert_eq!(vec, [0u32, 4]);
    drop(vec);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_truncate_clear() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = tracked_vec(&[0, 1, 2, 3], &live);
    vec.truncate(10);
    assert_eq!(vec.len(), 4);
    vec.truncate(2);
    assert_eq!(vec.len(), 2);
    assert_eq!(live.load(Ordering::Relaxed), 2);
    let cap = vec.capacity();
    vec.clear();
    assert_eq!(live.load(Ordering::Relaxed), 0);
    assert_eq!(vec.capacity(), cap);
}

#[test]
fn test_resize() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2]);
    vec.resize(5, 9);
    assert_eq!(vec, [1, 2, 9, 9, 9]);
    vec.resize(1, 0);
    assert_eq!(vec, [1]);
    vec.resize(1, 7);
    assert_eq!(vec, [1]);
}

#[test]
fn test_resize_with() {
    let mut vec = Vector::<u32>::new();
    let mut next = 0;
    vec.resize_with(4, || {
        next += 1;
        next
    });
    assert_eq!(vec, [1, 2, 3, 4]);
    vec.resize_with(2, || unreachable!());
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_with_default() {
    let vec = Vector::<u32>::with_default(4);
    assert_eq!(vec, [0, 0, 0, 0]);
}

#[test]
fn test_assign_fill() {
    // beyond the capacity: a fresh buffer is constructed
    let mut vec = Vector::<i32>::from_slice(&[1, 2]);
    vec.assign_fill(8, 7);
    assert_eq!(vec, [7; 8]);
    // beyond the length: overwrite then append
    vec.truncate(3);
    vec.assign_fill(5, 4);
    assert_eq!(vec, [4; 5]);
    // within the length: overwrite then discard the tail
    vec.assign_fill(2, 1);
    assert_eq!(vec, [1, 1]);
}

#[test]
fn test_assign_slice_reuses_capacity() {
    let mut vec = Vector::<u32>::with_capacity(10);
    vec.extend([1, 2, 3]);
    let ptr = vec.as_ptr();
    vec.assign_slice(&[4, 5, 6, 7]);
    assert_eq!(vec, [4, 5, 6, 7]);
    assert_eq!(vec.as_ptr(), ptr);
    vec.assign_slice(&[8]);
    assert_eq!(vec, [8]);
    assert_eq!(vec.as_ptr(), ptr);
}

#[test]
fn test_assign_iter() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2, 3, 4, 5]);
    vec.assign_iter(10..13);
    assert_eq!(vec, [10, 11, 12]);
    vec.assign_iter((0..6).map(|i| i * 2));
    assert_eq!(vec, [0, 2, 4, 6, 8, 10]);
}

#[test]
fn test_extend_from_slice() {
    let mut vec = Vector::<i32>::from_slice(&[1, 2]);
    vec.extend_from_slice(&[3, 4, 5]);
    assert_eq!(vec, [1, 2, 3, 4, 5]);
}

#[test]
fn test_extend_ref() {
    let mut vec = Vector::<u32>::new();
    vec.extend([1, 2, 3].iter());
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_from_iter() {
    let vec = (0u32..5).map(|i| i * i).collect::<Vector<u32>>();
    assert_eq!(vec, [0, 1, 4, 9, 16]);
}

#[test]
fn test_macro() {
    let empty: Vector<u32> = vector![];
    assert!(empty.is_empty());
    assert_eq!(vector![3; 4], [3, 3, 3, 3]);
    assert_eq!(vector![1, 2, 3], [1, 2, 3]);
}

#[test]
fn test_clone_and_clone_from() {
    let vec = Vector::from_slice(&[1, 2, 3]);
    let copy = vec.clone();
    assert_eq!(copy, vec);
    assert_eq!(copy.capacity(), 3);

    let mut target = Vector::<u32>::with_capacity(10);
    target.extend([9, 9]);
    let ptr = target.as_ptr();
    target.clone_from(&vec);
    assert_eq!(target, [1, 2, 3]);
    assert_eq!(target.as_ptr(), ptr);
}

#[test]
fn test_eq_ord() {
    let vec = Vector::<i32>::from_slice(&[1, 2, 3]);
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec, &[1, 2, 3][..]);
    assert_eq!(vec, Vector::<i32>::from_slice(&[1, 2, 3]));
    assert_ne!(vec, [1, 2]);
    assert!(vec < Vector::<i32>::from_slice(&[1, 2, 4]));
    assert!(vec > Vector::<i32>::from_slice(&[1, 2]));
}

#[test]
fn test_deref_slice_ops() {
    let mut vec = Vector::<i32>::from_slice(&[3, 1, 2]);
    vec.sort();
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.first(), Some(&1));
    assert_eq!(vec.last(), Some(&3));
    assert_eq!(vec.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    assert_eq!(vec[1], 2);
}

#[test]
fn test_into_iter() {
    let vec = Vector::<i32>::from_slice(&[1, 2, 3, 4]);
    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), &[2, 3]);
    assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
}

#[test]
fn test_into_iter_partial_drop() {
    let live = Arc::new(AtomicUsize::new(0));
    let vec = tracked_vec(&[0, 1, 2, 3, 4], &live);
    let mut iter = vec.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first, 0u32);
    drop(iter);
    assert_eq!(live.load(Ordering::Relaxed), 1);
    drop(first);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_drop_accounting() {
    let live = Arc::new(AtomicUsize::new(0));
    let vec = tracked_vec(&[0, 1, 2], &live);
    let copy = vec.clone();
    assert_eq!(live.load(Ordering::Relaxed), 6);
    drop(vec);
    assert_eq!(live.load(Ordering::Relaxed), 3);
    drop(copy);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_insert_slice_panic_preserves_contents_on_grow() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = tracked_vec(&[0, 1, 2], &live);
    assert_eq!(vec.capacity(), 3);
    let source = [
        Tracked::new(10, &live),
        Tracked::poisoned(11, &live),
    ];
    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_slice(1, &source)));
    assert!(result.is_err());
    // the reallocation path clones before moving anything, so a clone
    // panic leaves the original untouched
    assert_eq!(vec, [0u32, 1, 2]);
    assert_eq!(vec.capacity(), 3);
    drop(vec);
    drop(source);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_insert_fill_panic_preserves_contents_on_grow() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = tracked_vec(&[0, 1, 2, 3], &live);
    assert_eq!(vec.capacity(), 4);
    let value = Tracked::poisoned(9, &live);
    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_fill(2, 3, value)));
    assert!(result.is_err());
    assert_eq!(vec, [0u32, 1, 2, 3]);
    assert_eq!(vec.capacity(), 4);
    drop(vec);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_insert_slice_panic_in_place_no_leak() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = Vector::<Tracked>::with_capacity(10);
    for i in 0..3 {
        vec.push(Tracked::new(i, &live));
    }
    let source = [Tracked::poisoned(9, &live)];
    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_slice(1, &source)));
    assert!(result.is_err());
    // in place, the displaced tail is moved back down on unwind
    assert_eq!(vec, [0u32, 1, 2]);
    drop(vec);
    drop(source);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_resize_panic_no_leak() {
    let live = Arc::new(AtomicUsize::new(0));
    let mut vec = tracked_vec(&[0, 1], &live);
    let value = Tracked::poisoned(9, &live);
    let result = catch_unwind(AssertUnwindSafe(|| vec.resize(5, value)));
    assert!(result.is_err());
    assert_eq!(vec, [0u32, 1]);
    drop(vec);
    assert_eq!(live.load(Ordering::Relaxed), 0);
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::<()>::new();
    assert_eq!(vec.capacity(), 0);
    for _ in 0..100 {
        vec.push(());
    }
    assert_eq!(vec.len(), 100);
    assert_eq!(vec.capacity(), usize::MAX);
    vec.insert(50, ());
    vec.remove(0);
    assert_eq!(vec.len(), 100);
    vec.erase(10..20);
    assert_eq!(vec.len(), 90);
    assert_eq!(vec.into_iter().count(), 90);
}

#[test]
fn test_random_ops_match_std_vec() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut vec = Vector::<u32>::new();
    let mut model = Vec::<u32>::new();
    for _ in 0..2000 {
        match rng.gen_range(0..6) {
            0 => {
                let value = rng.gen();
                vec.push(value);
                model.push(value);
            }
            1 => {
                assert_eq!(vec.pop(), model.pop());
            }
            2 => {
                let index = rng.gen_range(0..=vec.len());
                let value = rng.gen();
                vec.insert(index, value);
                model.insert(index, value);
            }
            3 => {
                if !vec.is_empty() {
                    let index = rng.gen_range(0..vec.len());
                    assert_eq!(vec.remove(index), model.remove(index));
                }
            }
            4 => {
                let start = rng.gen_range(0..=vec.len());
                let end = rng.gen_range(start..=vec.len());
                vec.erase(start..end);
                model.drain(start..end);
            }
            _ => {
                let index = rng.gen_range(0..=vec.len());
                let count = rng.gen_range(0..4);
                let value = rng.gen();
                vec.insert_fill(index, count, value);
                model.splice(index..index, std::iter::repeat(value).take(count));
            }
        }
        assert_eq!(vec.as_slice(), model.as_slice());
        assert!(vec.len() <= vec.capacity());
    }
}
