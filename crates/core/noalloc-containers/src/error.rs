//! The capacity-exhaustion error shared by every bounded container.

use core::fmt;

/// Returned when an operation would grow a container past its fixed capacity.
///
/// By-value pushes and inserts hand the rejected element back inside the
/// error so nothing is lost; batch operations such as
/// [`ArrayVec::try_extend_from_slice`](crate::vec::ArrayVec::try_extend_from_slice)
/// use the payload-free `CapacityError<()>`.
///
/// The container is never modified when this error is returned.
///
/// # Examples
///
/// ```
/// use noalloc_containers::vec::ArrayVec;
///
/// let mut vec = ArrayVec::<u8, 1>::new();
/// vec.push(1);
///
/// let err = vec.try_push(2).unwrap_err();
/// assert_eq!(err.element(), 2);
/// assert_eq!(vec.as_slice(), &[1]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapacityError<T = ()> {
    element: T,
}

impl<T> CapacityError<T> {
    /// Wraps the element that did not fit.
    #[must_use]
    pub const fn new(element: T) -> Self {
        Self { element }
    }

    /// Takes back the element that did not fit.
    #[must_use]
    pub fn element(self) -> T {
        self.element
    }

    /// Discards the rejected element, keeping only the error kind.
    #[must_use]
    pub fn simplify(self) -> CapacityError {
        CapacityError { element: () }
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityError: AtCapacity")
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("container is at capacity")
    }
}

impl<T> core::error::Error for CapacityError<T> {}
