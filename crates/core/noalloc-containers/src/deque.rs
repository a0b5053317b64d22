//! Double-ended circular buffer with fixed capacity.
//!
//! This module provides [`ArrayDeque`], a ring buffer that supports O(1) pushes and
//! pops at both ends without heap allocation. It serves as a FIFO queue
//! (`push_back` + `pop_front`), a stack (`push_front` + `pop_front`), or both at once.
//!
//! # Layout
//!
//! The deque tracks two cursors into its backing array of `N` slots:
//!
//! - `head` is the slot *one before* the front element, so the front lives at
//!   `(head + 1) % N`.
//! - `tail` is the slot of the back element.
//!
//! A front push writes at `head` and moves `head` one slot back; a back push moves
//! `tail` one slot forward and writes there. Together with the element count this
//! gives `tail == (head + len) % N` in every state. When the deque is full,
//! `head == tail` and the elements cover the whole ring.
//!
//! Unlike a classic single-ended ring buffer, all `N` slots are usable: an
//! explicit length disambiguates empty from full.
//!
//! # Contiguous views
//!
//! [`ArrayDeque::as_slices`] returns the contents as at most two slices. Their
//! concatenation is always the front-to-back order, regardless of where the
//! contents sit in the ring.
//!
//! # Examples
//!
//! ```
//! use noalloc_containers::deque::ArrayDeque;
//!
//! let mut deque = ArrayDeque::<u8, 4>::new();
//!
//! deque.push_back(2);
//! deque.push_back(3);
//! deque.push_front(1);
//!
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_back(), Some(3));
//! assert_eq!(deque.len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use noalloc_containers::deque::ArrayDeque;
//!
//! let mut deque = ArrayDeque::<u8, 2>::new();
//! deque.push_back(1);
//! deque.push_front(0);
//!
//! // Both ends reject once the deque is full.
//! assert!(deque.try_push_back(2).is_err());
//! assert!(deque.try_push_front(2).is_err());
//!
//! deque.pop_back();
//! assert!(deque.try_push_front(5).is_ok());
//! ```

use core::fmt;
use core::mem::MaybeUninit;
use core::ptr;
use core::slice;

use crate::error::CapacityError;
use crate::log;
use crate::safety::assert_unsafe_precondition;

/// A fixed-capacity double-ended queue backed by a ring buffer.
///
/// # Type Parameters
///
/// - `T`: The type of elements stored
/// - `N`: The capacity. `N == 0` is allowed and rejects every push.
///
/// # Examples
///
/// ```
/// use noalloc_containers::deque::ArrayDeque;
///
/// let mut deque = ArrayDeque::<i32, 3>::new();
/// deque.push_front(3);
/// deque.push_front(2);
/// deque.push_front(1);
///
/// assert_eq!(deque.pop_front(), Some(1));
/// assert_eq!(deque.pop_front(), Some(2));
/// assert_eq!(deque.pop_front(), Some(3));
/// assert_eq!(deque.pop_front(), None);
/// ```
pub struct ArrayDeque<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
    head: usize,
    tail: usize,
}

impl<T, const N: usize> Default for ArrayDeque<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ArrayDeque<T, N> {
    /// Creates an empty deque.
    ///
    /// This method does not allocate memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
            head: 0,
            tail: 0,
        }
    }

    /// Creates a deque holding every element of `array`, front to back.
    ///
    /// This never fails: `M <= N` is checked when the call is compiled.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::deque::ArrayDeque;
    ///
    /// let mut deque = ArrayDeque::<u8, 4>::from_array([1, 2, 3]);
    /// assert_eq!(deque.pop_front(), Some(1));
    /// assert_eq!(deque.pop_back(), Some(3));
    /// ```
    #[must_use]
    pub fn from_array<const M: usize>(array: [T; M]) -> Self {
        const { assert!(M <= N, "ArrayDeque::from_array: source longer than capacity") };
        let mut deque = Self::new();
        for value in array {
            // SAFETY: `M <= N` was checked at compile time.
            unsafe { deque.push_back_unchecked(value) };
        }
        deque
    }

    /// Creates a deque holding clones of every element of `source`, front to back.
    ///
    /// The result is laid out with `head == 0` and `tail == source.len() % N`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `source` is longer than `N`; nothing is
    /// copied in that case.
    pub fn try_from_slice(source: &[T]) -> Result<Self, CapacityError>
    where
        T: Clone,
    {
        if source.len() > N {
            log::debug!("ArrayDeque<{N}>: cannot build from {} elements", source.len());
            return Err(CapacityError::new(()));
        }
        let mut deque = Self::new();
        for value in source {
            // SAFETY: The whole source fits, checked above.
            unsafe { deque.push_back_unchecked(value.clone()) };
        }
        Ok(deque)
    }

    /// Returns the fixed capacity `N`.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the number of elements in the deque.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the deque holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the deque is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Next slot forward in the ring. Only called when `N > 0`.
    #[inline]
    const fn wrap_inc(index: usize) -> usize {
        if index + 1 == N { 0 } else { index + 1 }
    }

    /// Previous slot in the ring. Only called when `N > 0`.
    #[inline]
    const fn wrap_dec(index: usize) -> usize {
        if index == 0 { N - 1 } else { index - 1 }
    }

    /// Physical slot of the element `logical` places behind the front.
    /// Requires `logical < len`.
    #[inline]
    fn slot(&self, logical: usize) -> usize {
        let index = self.head + 1 + logical;
        if index >= N { index - N } else { index }
    }

    /// Pushes an element onto the front of the deque.
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`CapacityError`] if the deque is full.
    pub fn try_push_front(&mut self, value: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            log::trace!("ArrayDeque<{N}>: push_front rejected, at capacity");
            return Err(CapacityError::new(value));
        }
        // SAFETY: We checked that it isn't full.
        unsafe { self.push_front_unchecked(value) };
        Ok(())
    }

    /// Pushes an element onto the back of the deque.
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`CapacityError`] if the deque is full.
    pub fn try_push_back(&mut self, value: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            log::trace!("ArrayDeque<{N}>: push_back rejected, at capacity");
            return Err(CapacityError::new(value));
        }
        // SAFETY: We checked that it isn't full.
        unsafe { self.push_back_unchecked(value) };
        Ok(())
    }

    /// Pushes an element onto the front of the deque.
    ///
    /// # Panics
    ///
    /// Panics if the deque is full. If this is not what you want, see
    /// [`ArrayDeque::try_push_front`] or [`ArrayDeque::push_front_unchecked`].
    pub fn push_front(&mut self, value: T) {
        assert!(self.try_push_front(value).is_ok(), "deque is full");
    }

    /// Pushes an element onto the back of the deque.
    ///
    /// # Panics
    ///
    /// Panics if the deque is full. If this is not what you want, see
    /// [`ArrayDeque::try_push_back`] or [`ArrayDeque::push_back_unchecked`].
    pub fn push_back(&mut self, value: T) {
        assert!(self.try_push_back(value).is_ok(), "deque is full");
    }

    /// Pushes an element onto the front without checking the capacity.
    ///
    /// # Safety
    ///
    /// The deque must not be full. Violating this overwrites the back element
    /// without dropping it.
    pub unsafe fn push_front_unchecked(&mut self, value: T) {
        assert_unsafe_precondition!(self.len < N, "ArrayDeque::push_front_unchecked on a full deque");
        // SAFETY: `len < N` implies `N > 0`, and `head < N` always holds.
        unsafe { self.data.get_unchecked_mut(self.head) }.write(value);
        self.head = Self::wrap_dec(self.head);
        self.len += 1;
    }

    /// Pushes an element onto the back without checking the capacity.
    ///
    /// # Safety
    ///
    /// The deque must not be full. Violating this overwrites the front element
    /// without dropping it.
    pub unsafe fn push_back_unchecked(&mut self, value: T) {
        assert_unsafe_precondition!(self.len < N, "ArrayDeque::push_back_unchecked on a full deque");
        self.tail = Self::wrap_inc(self.tail);
        // SAFETY: `wrap_inc` keeps `tail < N`.
        unsafe { self.data.get_unchecked_mut(self.tail) }.write(value);
        self.len += 1;
    }

    /// Removes and returns the front element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.head = Self::wrap_inc(self.head);
        self.len -= 1;
        // SAFETY: The deque was not empty, so the slot after the old `head`
        // holds the initialized front element. Advancing `head` past it
        // transfers ownership to the caller.
        Some(unsafe { self.data[self.head].assume_init_read() })
    }

    /// Removes and returns the back element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: The deque is not empty, so `tail` holds the initialized
        // back element. Retreating `tail` transfers ownership to the caller.
        let value = unsafe { self.data[self.tail].assume_init_read() };
        self.tail = Self::wrap_dec(self.tail);
        self.len -= 1;
        Some(value)
    }

    /// Returns the front element, or `None` if empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the back element, or `None` if empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: The deque is not empty, so `tail` is initialized.
        Some(unsafe { self.data[self.tail].assume_init_ref() })
    }

    /// Returns a mutable reference to the front element, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a mutable reference to the back element, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: The deque is not empty, so `tail` is initialized.
        Some(unsafe { self.data[self.tail].assume_init_mut() })
    }

    /// Returns the element `index` places behind the front, or `None` if out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::deque::ArrayDeque;
    ///
    /// let mut deque = ArrayDeque::<u8, 4>::new();
    /// deque.push_back(2);
    /// deque.push_front(1);
    /// assert_eq!(deque.get(0), Some(&1));
    /// assert_eq!(deque.get(1), Some(&2));
    /// assert_eq!(deque.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: Logical indices [0..len] map to initialized slots.
        Some(unsafe { self.data[self.slot(index)].assume_init_ref() })
    }

    /// Returns a mutable reference to the element `index` places behind the front.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot(index);
        // SAFETY: Logical indices [0..len] map to initialized slots.
        Some(unsafe { self.data[slot].assume_init_mut() })
    }

    /// Physical ranges holding the contents, front to back.
    ///
    /// The first range starts at the front slot `(head + 1) % N`. If the
    /// contents run past the end of the array, the second range is
    /// `[0, tail]`; otherwise it is empty.
    fn ranges(&self) -> (core::ops::Range<usize>, core::ops::Range<usize>) {
        if self.is_empty() {
            return (0..0, 0..0);
        }
        let front = Self::wrap_inc(self.head);
        if front + self.len <= N {
            (front..front + self.len, 0..0)
        } else {
            (front..N, 0..self.tail + 1)
        }
    }

    /// Returns the contents as two slices whose concatenation is the
    /// front-to-back order.
    ///
    /// If the contents are contiguous in the ring the second slice is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use noalloc_containers::deque::ArrayDeque;
    ///
    /// let mut deque = ArrayDeque::<u8, 4>::new();
    /// deque.push_back(2);
    /// deque.push_back(3);
    /// deque.push_front(1);
    /// deque.push_front(0);
    ///
    /// let (a, b) = deque.as_slices();
    /// assert_eq!([a, b].concat(), [0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second) = self.ranges();
        // SAFETY: Both ranges cover only initialized slots, by the
        // `tail == head + len` invariant.
        unsafe { (assume_init(&self.data[first]), assume_init(&self.data[second])) }
    }

    /// Returns the contents as two mutable slices whose concatenation is the
    /// front-to-back order.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second) = self.ranges();
        // `second` always lies entirely before `first`.
        let (low, high) = self.data.split_at_mut(first.start);
        let first = &mut high[..first.end - first.start];
        let second = &mut low[second];
        // SAFETY: Both ranges cover only initialized slots.
        unsafe { (assume_init_mut(first), assume_init_mut(second)) }
    }

    /// Returns a front-to-back iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter {
            first: first.iter(),
            second: second.iter(),
        }
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        let (first, second) = self.as_mut_slices();
        let first: *mut [T] = first;
        let second: *mut [T] = second;
        self.len = 0;
        self.head = 0;
        self.tail = 0;
        // SAFETY: The slices covered the initialized elements, which are no
        // longer reachable through the deque.
        unsafe {
            ptr::drop_in_place(first);
            ptr::drop_in_place(second);
        }
    }
}

/// # Safety
///
/// Every element of `slots` must be initialized.
unsafe fn assume_init<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    // SAFETY: `MaybeUninit<T>` has the layout of `T`, and the caller
    // guarantees initialization.
    unsafe { slice::from_raw_parts(slots.as_ptr().cast::<T>(), slots.len()) }
}

/// # Safety
///
/// Every element of `slots` must be initialized.
unsafe fn assume_init_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    // SAFETY: As in `assume_init`.
    unsafe { slice::from_raw_parts_mut(slots.as_mut_ptr().cast::<T>(), slots.len()) }
}

impl<T, const N: usize> Drop for ArrayDeque<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, const N: usize> Clone for ArrayDeque<T, N> {
    fn clone(&self) -> Self {
        let mut deque = Self::new();
        for value in self {
            // SAFETY: Same capacity, same number of elements.
            unsafe { deque.push_back_unchecked(value.clone()) };
        }
        deque
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for ArrayDeque<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<ArrayDeque<T, M>> for ArrayDeque<T, N> {
    fn eq(&self, other: &ArrayDeque<T, M>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for ArrayDeque<T, N> {}

impl<T, const N: usize> Extend<T> for ArrayDeque<T, N> {
    /// Pushes every element onto the back.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields more elements than fit.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for ArrayDeque<T, N> {
    /// # Panics
    ///
    /// Panics if the iterator yields more than `N` elements.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a ArrayDeque<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over an [`ArrayDeque`].
pub struct Iter<'a, T> {
    first: slice::Iter<'a, T>,
    second: slice::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.first.next().or_else(|| self.second.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.second.next_back().or_else(|| self.first.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
