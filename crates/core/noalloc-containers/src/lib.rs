//! Fixed-capacity containers that never touch an allocator.
//!
//! This crate provides three container primitives for environments where heap
//! allocation is unavailable, restricted, or must be bounded at compile time
//! (embedded firmware, kernels, interrupt handlers, real-time loops).
//!
//! # Overview
//!
//! - [`vec::ArrayVec`] - A fixed-capacity vector backed by an inline array
//! - [`deque::ArrayDeque`] - A fixed-capacity double-ended ring buffer
//! - [`list::IntrusiveList`] - A doubly linked list over caller-owned [`list::Node`]s
//!
//! The three are independent of each other. All of them:
//! - Do not perform heap allocation
//! - Never grow: capacity is a const generic (or, for the list, the nodes the caller supplies)
//! - Work in `no_std` environments
//! - Are single-owner values with no internal synchronization
//!
//! # Errors
//!
//! Growing an `ArrayVec` or `ArrayDeque` past its capacity is the only
//! recoverable failure, reported as [`CapacityError`] with the container left
//! untouched. Out-of-range indices and re-linking an already linked node are
//! programming errors and panic. Popping from an empty container returns `None`.
//!
//! # Diagnostics
//!
//! Capacity rejections are reported through the [`log`] module's pluggable
//! sink. Nothing is emitted until a sink is registered.
//!
//! # Examples
//!
//! ## Using `ArrayVec`
//!
//! ```
//! use noalloc_containers::vec::ArrayVec;
//!
//! let mut vec = ArrayVec::<i32, 5>::new();
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//!
//! vec.retain(|&x| x != 2);
//! assert_eq!(vec.as_slice(), &[1, 3]);
//! ```
//!
//! ## Using `ArrayDeque`
//!
//! ```
//! use noalloc_containers::deque::ArrayDeque;
//!
//! let mut deque = ArrayDeque::<u8, 4>::new();
//! deque.push_back(2);
//! deque.push_front(1);
//!
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_back(), Some(2));
//! ```
//!
//! ## Using `IntrusiveList`
//!
//! ```
//! use noalloc_containers::list::{IntrusiveList, Node};
//!
//! let a = Node::new("a");
//! let b = Node::new("b");
//! let mut list = IntrusiveList::new();
//! list.push_back(&b);
//! list.push_front(&a);
//!
//! assert_eq!(list.pop_back().map(|n| *n.get()), Some("b"));
//! assert_eq!(list.len(), 1);
//! ```
//!
//! # Features
//!
//! - `std` (default): Enables the host-side unit tests
//!
//! # Configuration
//!
//! Building with `RUSTFLAGS="--cfg noalloc_hardened"` keeps the precondition
//! checks of the `unsafe *_unchecked` operations in release builds.

#![cfg_attr(not(test), no_std)]

pub mod deque;
pub mod error;
pub mod list;
pub mod log;
mod safety;
pub mod vec;

pub use error::CapacityError;
