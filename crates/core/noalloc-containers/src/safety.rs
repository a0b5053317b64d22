//! Runtime checks for the preconditions of the `*_unchecked` fast paths.
//!
//! Every container exposes checked operations that validate capacity and
//! bounds, plus `unsafe fn *_unchecked` variants that trust the caller. The
//! checked operations validate and then delegate to the unchecked ones, so
//! the index arithmetic lives in one place.
//!
//! | Build configuration | Result |
//! |---------------------|--------|
//! | Debug (`debug_assertions`) | Panics on failure |
//! | Release + `noalloc_hardened` cfg | Panics on failure |
//! | Release (default) | Compiled away (condition still type-checked) |

/// Checks a precondition that must hold for the surrounding `unsafe` code to
/// be sound.
///
/// Use this for conditions whose violation is undefined behavior (writing
/// past capacity, reading an uninitialized slot). Logic invariants use
/// `debug_assert!`, and preconditions of safe functions use `assert!`.
macro_rules! assert_unsafe_precondition {
    ($cond:expr $(,)?) => {
        #[cfg(any(debug_assertions, noalloc_hardened))]
        {
            if !$cond {
                panic!(
                    "unsafe precondition violated: {}",
                    stringify!($cond),
                );
            }
        }
        #[cfg(not(any(debug_assertions, noalloc_hardened)))]
        {
            if false {
                let _ = $cond;
            }
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(any(debug_assertions, noalloc_hardened))]
        {
            if !$cond {
                panic!($($arg)+);
            }
        }
        #[cfg(not(any(debug_assertions, noalloc_hardened)))]
        {
            if false {
                let _ = $cond;
            }
        }
    };
}

pub(crate) use assert_unsafe_precondition;
