//! Fixed-capacity vector implementation backed by an inline array.
//!
//! This module provides [`ArrayVec`], a vector-like data structure with a compile-time
//! fixed capacity. Unlike `Vec` from the standard library, `ArrayVec` stores its elements
//! inline in a fixed-size array, avoiding heap allocation entirely.
//!
//! # Capacity Management
//!
//! The capacity is specified as a const generic parameter and cannot be changed at runtime.
//! Growing operations come in three flavours:
//!
//! - `try_*` returns a [`CapacityError`] and leaves the vector untouched
//!   ([`ArrayVec::try_push`], [`ArrayVec::try_insert`],
//!   [`ArrayVec::try_extend_from_slice`]).
//! - The plain names panic when full ([`ArrayVec::push`], [`ArrayVec::insert`]).
//! - `unsafe *_unchecked` skips the capacity check entirely
//!   ([`ArrayVec::push_unchecked`], [`ArrayVec::insert_unchecked`]).
//!
//! Index arguments are preconditions: an out-of-range index panics rather than
//! returning an error.
//!
//! # Performance
//!
//! - Push/pop/swap_remove: O(1)
//! - Insert/remove: O(len - index)
//! - Retain: O(len), one predicate call per element
//!
//! # Examples
//!
//! ```
//! use noalloc_containers::vec::ArrayVec;
//!
//! let mut vec = ArrayVec::<i32, 3>::new();
//!
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//! assert!(vec.try_push(4).is_err());
//!
//! assert_eq!(vec.remove(1), 2);
//! assert_eq!(vec.as_slice(), &[1, 3]);
//! ```

use core::fmt;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;

use crate::error::CapacityError;
use crate::log;
use crate::safety::assert_unsafe_precondition;

/// A fixed-size array, which has vector-like operations.
///
/// `ArrayVec` provides a vector-like interface with a compile-time fixed capacity `N`.
/// Elements occupy the contiguous prefix `[0, len)` of an inline array, making it
/// suitable for `no_std` environments and situations where heap allocation is not
/// available or desirable.
///
/// `ArrayVec` dereferences to `[T]`, so every slice method (`first`, `contains`,
/// `sort_unstable`, `binary_search`, ...) is available on the live elements.
///
/// # Type Parameters
///
/// - `T`: The type of elements stored in the vector
/// - `N`: The maximum number of elements (capacity)
///
/// # Examples
///
/// ```
/// use noalloc_containers::vec::ArrayVec;
///
/// let mut vec = ArrayVec::<&str, 4>::new();
/// vec.push("hello");
/// vec.push("world");
///
/// assert_eq!(vec.len(), 2);
/// assert!(vec.contains(&"world"));
/// ```
pub struct ArrayVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> Default for ArrayVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ArrayVec<T, N> {
    /// Creates a new `ArrayVec` with no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let vec = ArrayVec::<u8, 4>::new();
    /// assert_eq!(vec.len(), 0);
    /// assert!(vec.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Creates an `ArrayVec` holding every element of `array`.
    ///
    /// This never fails: `M <= N` is checked when the call is compiled.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let vec = ArrayVec::<u8, 4>::from_array([1, 2, 3]);
    /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
    /// assert_eq!(vec.remaining_capacity(), 1);
    /// ```
    ///
    /// ```compile_fail
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let vec = ArrayVec::<u8, 2>::from_array([1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_array<const M: usize>(array: [T; M]) -> Self {
        const { assert!(M <= N, "ArrayVec::from_array: source longer than capacity") };
        let mut vec = Self::new();
        for value in array {
            // SAFETY: `M <= N` was checked at compile time and we push exactly `M` values.
            unsafe { vec.push_unchecked(value) };
        }
        vec
    }

    /// Builds an `ArrayVec` from an iterator.
    ///
    /// # Errors
    ///
    /// Returns the first element that did not fit. The partially built vector
    /// is dropped.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, CapacityError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut vec = Self::new();
        for value in iter {
            vec.try_push(value)?;
        }
        Ok(vec)
    }

    /// Returns the fixed capacity `N`.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the number of elements in the `ArrayVec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let mut vec = ArrayVec::<u8, 4>::new();
    /// assert_eq!(vec.len(), 0);
    /// vec.push(1);
    /// assert_eq!(vec.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the `ArrayVec` is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the `ArrayVec` is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns how many more elements fit before the vector is full.
    #[must_use]
    pub const fn remaining_capacity(&self) -> usize {
        N - self.len
    }

    /// Tries to push a value into the `ArrayVec`.
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`CapacityError`] if the `ArrayVec` is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let mut vec = ArrayVec::<u8, 1>::new();
    /// assert!(vec.try_push(1).is_ok());
    /// assert_eq!(vec.len(), 1);
    /// assert!(vec.try_push(2).is_err());
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            log::trace!("ArrayVec<{N}>: push rejected, at capacity");
            return Err(CapacityError::new(value));
        }
        // SAFETY: We checked that it isn't full.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Pushes a value into the `ArrayVec`.
    ///
    /// # Panics
    ///
    /// Panics if the `ArrayVec` is full.
    pub fn push(&mut self, value: T) {
        assert!(self.try_push(value).is_ok(), "ArrayVec: ran out of capacity");
    }

    /// Pushes a clone of `*value`, leaving the original with the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the `ArrayVec` is full. Nothing is cloned
    /// in that case.
    pub fn try_push_ref(&mut self, value: &T) -> Result<(), CapacityError>
    where
        T: Clone,
    {
        if self.is_full() {
            log::trace!("ArrayVec<{N}>: push rejected, at capacity");
            return Err(CapacityError::new(()));
        }
        // SAFETY: We checked that it isn't full.
        unsafe { self.push_unchecked(value.clone()) };
        Ok(())
    }

    /// Pushes a value without checking the capacity.
    ///
    /// # Safety
    ///
    /// The vector must not be full (`len < N`).
    pub unsafe fn push_unchecked(&mut self, value: T) {
        assert_unsafe_precondition!(self.len < N, "ArrayVec::push_unchecked on a full vector");
        // SAFETY: The caller guarantees `len < N`, so the slot is in bounds.
        unsafe { self.data.get_unchecked_mut(self.len) }.write(value);
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: The element at `self.len` was initialized by a previous push.
        Some(unsafe { self.data[self.len].assume_init_read() })
    }

    /// Appends every element of `source`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] and leaves the vector unchanged if
    /// `len + source.len()` exceeds the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let mut vec = ArrayVec::<u8, 4>::from_array([1, 2]);
    /// assert!(vec.try_extend_from_slice(&[3, 4, 5]).is_err());
    /// assert_eq!(vec.as_slice(), &[1, 2]);
    ///
    /// vec.try_extend_from_slice(&[3, 4]).unwrap();
    /// assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn try_extend_from_slice(&mut self, source: &[T]) -> Result<(), CapacityError>
    where
        T: Clone,
    {
        if source.len() > self.remaining_capacity() {
            log::trace!(
                "ArrayVec<{N}>: extend of {} rejected, {} slots free",
                source.len(),
                self.remaining_capacity()
            );
            return Err(CapacityError::new(()));
        }
        for value in source {
            // SAFETY: The whole batch fits, checked above.
            unsafe { self.push_unchecked(value.clone()) };
        }
        Ok(())
    }

    /// Creates an `ArrayVec` holding clones of every element of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `source` is longer than `N`; nothing is
    /// copied in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// assert!(ArrayVec::<u8, 2>::try_from_slice(&[1, 2, 3]).is_err());
    /// let vec = ArrayVec::<u8, 4>::try_from_slice(&[1, 2, 3]).unwrap();
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub fn try_from_slice(source: &[T]) -> Result<Self, CapacityError>
    where
        T: Clone,
    {
        let mut vec = Self::new();
        if let Err(err) = vec.try_extend_from_slice(source) {
            log::debug!("ArrayVec<{N}>: cannot build from {} elements", source.len());
            return Err(err);
        }
        Ok(vec)
    }

    /// Inserts `value` at `index`, shifting all elements after it to the right.
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`CapacityError`] if the `ArrayVec` is full.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), CapacityError<T>> {
        assert!(index <= self.len, "index out of bounds");
        if self.is_full() {
            log::trace!("ArrayVec<{N}>: insert rejected, at capacity");
            return Err(CapacityError::new(value));
        }
        // SAFETY: `index <= len` and `len < N`, both checked above.
        unsafe { self.insert_unchecked(index, value) };
        Ok(())
    }

    /// Inserts `value` at `index`, shifting all elements after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if the `ArrayVec` is full.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(self.try_insert(index, value).is_ok(), "ArrayVec: ran out of capacity");
    }

    /// Inserts `value` at `index` without checking bounds or capacity.
    ///
    /// # Safety
    ///
    /// `index <= len` and `len < N` must hold.
    pub unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        assert_unsafe_precondition!(index <= self.len && self.len < N);
        // SAFETY: We shift elements [index..len] one position right; the
        // caller guarantees there is a free slot at `len`. The gap at `index`
        // is then filled with `value`.
        unsafe {
            let ptr = self.data.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(1), self.len - index);
            ptr.cast::<T>().write(value);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting all elements
    /// after it to the left. Preserves ordering.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "index out of bounds");
        // SAFETY: The element at `index` is initialized. We read it out,
        // then shift elements [index+1..len] one position left.
        unsafe {
            let ptr = self.data.as_mut_ptr().add(index);
            let value = ptr.cast::<T>().read();
            ptr::copy(ptr.add(1), ptr, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes the element at `index` by swapping it with the last element.
    /// Does not preserve ordering.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "index out of bounds");
        self.len -= 1;
        self.data.swap(index, self.len);
        // SAFETY: The element at `self.len` (formerly at `index`) was initialized.
        unsafe { self.data[self.len].assume_init_read() }
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving
    /// their relative order.
    ///
    /// `keep` is called exactly once per element, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let mut vec = ArrayVec::<u32, 8>::from_array([1, 2, 3, 4, 5, 6]);
    /// vec.retain(|&x| x % 2 == 0);
    /// assert_eq!(vec.as_slice(), &[2, 4, 6]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|value| keep(value));
    }

    /// Like [`ArrayVec::retain`], but `keep` may mutate the elements.
    pub fn retain_mut<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let len = self.len;
        let slice = self.as_mut_slice();

        // Everything before the first rejected element is already in place.
        let mut i = 0;
        while i < len && keep(&mut slice[i]) {
            i += 1;
        }
        if i == len {
            return;
        }

        // Compact survivors leftward. Rejected elements are swapped towards
        // the tail so every slot stays initialized if `keep` panics.
        let mut dropped = 1;
        for j in i + 1..len {
            if keep(&mut slice[j]) {
                slice.swap(j - dropped, j);
            } else {
                dropped += 1;
            }
        }
        self.truncate(len - dropped);
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Has no effect if `len` is not less than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            self.data[len..self.len].as_mut_ptr().cast::<T>(),
            self.len - len,
        );
        self.len = len;
        // SAFETY: Elements [len..old_len] were initialized and are no longer
        // reachable through the vector.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Returns a slice of all the elements in the `ArrayVec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::vec::ArrayVec;
    ///
    /// let vec = ArrayVec::<u8, 4>::from_array([1, 2, 3, 4]);
    /// assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Elements 0..self.len are initialized by the push invariant,
        // and the pointer from `self.data` is valid for `self.len` elements.
        unsafe { core::slice::from_raw_parts(self.data.as_ptr().cast::<T>(), self.len) }
    }

    /// Returns a mutable slice of all the elements in the `ArrayVec`.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Elements 0..self.len are initialized by the push invariant,
        // and the mutable pointer from `self.data` is valid for `self.len` elements.
        unsafe { core::slice::from_raw_parts_mut(self.data.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Returns an iterator over the elements of the `ArrayVec`.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the elements of the `ArrayVec`.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, const N: usize> Deref for ArrayVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for ArrayVec<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for ArrayVec<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for ArrayVec<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, const N: usize> Clone for ArrayVec<T, N> {
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for value in self {
            // SAFETY: `vec` has the same capacity and receives `self.len` elements.
            unsafe { vec.push_unchecked(value.clone()) };
        }
        vec
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for ArrayVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<ArrayVec<T, M>> for ArrayVec<T, N> {
    fn eq(&self, other: &ArrayVec<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for ArrayVec<T, N> {}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for ArrayVec<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<[T; M]> for ArrayVec<T, N> {
    fn eq(&self, other: &[T; M]) -> bool {
        self.as_slice() == other
    }
}

impl<T, const N: usize> Extend<T> for ArrayVec<T, N> {
    /// # Panics
    ///
    /// Panics if the iterator yields more elements than fit.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for ArrayVec<T, N> {
    /// # Panics
    ///
    /// Panics if the iterator yields more than `N` elements. Use
    /// [`ArrayVec::try_from_iter`] to handle that case.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> Drop for ArrayVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a ArrayVec<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut ArrayVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize> IntoIterator for ArrayVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        IntoIter {
            // SAFETY: `vec` is never used or dropped again, so ownership of
            // the initialized prefix moves into the iterator.
            data: unsafe { ptr::read(&vec.data) },
            start: 0,
            end: vec.len,
        }
    }
}

/// An owning iterator over the elements of an [`ArrayVec`].
pub struct IntoIter<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    start: usize,
    end: usize,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: Slots [start..end] are initialized and each is read once.
        Some(unsafe { self.data[index].assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: Slots [start..end] are initialized and each is read once.
        Some(unsafe { self.data[self.end].assume_init_read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(
            self.data[self.start..self.end].as_mut_ptr().cast::<T>(),
            self.end - self.start,
        );
        // SAFETY: Slots [start..end] were never yielded.
        unsafe { ptr::drop_in_place(rest) };
    }
}
