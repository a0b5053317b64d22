//! Intrusive doubly linked list over caller-owned nodes.
//!
//! The list never allocates, moves, or frees a node: the caller keeps every
//! [`Node`] in storage it controls (locals, an array pool, an
//! [`ArrayVec`](crate::vec::ArrayVec) of nodes...) and hands the list shared
//! references to it. Linking only rewrites the cells inside the affected
//! nodes.
//!
//! Because the links are [`Cell`]s holding `&'a Node<'a, T>`, the borrow
//! checker guarantees every linked node outlives the list, and no `unsafe` is
//! needed anywhere in this module.
//!
//! # Linking rules
//!
//! A node may be in at most one list at a time. Every node carries a
//! membership flag, set when a list links it and cleared when it is
//! unlinked, so pushing or inserting a node that belongs to any list panics.
//! Nodes come back from [`IntrusiveList::pop_front`], [`IntrusiveList::pop_back`] and
//! [`IntrusiveList::remove`] fully unlinked and can be reinserted right away.
//! Dropping a list leaves its nodes linked to each other; call
//! [`IntrusiveList::clear`] first to reuse them.
//!
//! # Examples
//!
//! ```
//! use noalloc_containers::list::{IntrusiveList, Node};
//!
//! let nodes = [Node::new(1), Node::new(5), Node::new(2), Node::new(4), Node::new(3)];
//! let mut list = IntrusiveList::new();
//!
//! list.push_back(&nodes[0]);
//! list.push_back(&nodes[1]);
//! list.insert(1, &nodes[2]);
//! list.insert(2, &nodes[3]);
//! list.insert(2, &nodes[4]);
//! assert!(list.iter().copied().eq([1, 2, 3, 4, 5]));
//!
//! let removed = list.remove(2);
//! assert_eq!(*removed.get(), 3);
//! assert!(!removed.is_linked());
//! assert!(list.iter().copied().eq([1, 2, 4, 5]));
//! ```

use core::cell::Cell;
use core::fmt;

/// A list element with its links stored inline.
///
/// The node's memory belongs to the caller. While linked, the node is shared
/// with the list; its payload can be read with [`Node::get`] and mutated
/// through interior mutability in `T` if needed.
pub struct Node<'a, T> {
    prev: Cell<Option<&'a Node<'a, T>>>,
    next: Cell<Option<&'a Node<'a, T>>>,
    linked: Cell<bool>,
    data: T,
}

impl<'a, T> Node<'a, T> {
    /// Creates an unlinked node.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            prev: Cell::new(None),
            next: Cell::new(None),
            linked: Cell::new(false),
            data,
        }
    }

    /// Returns the payload.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Returns the payload mutably. Only possible while no list borrows the node.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Consumes the node and returns the payload.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns true if the node currently belongs to a list, including as
    /// the only node of a one-element list.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked.get()
    }

    /// The following node, if any.
    #[must_use]
    pub fn next(&self) -> Option<&'a Node<'a, T>> {
        self.next.get()
    }

    /// The preceding node, if any.
    #[must_use]
    pub fn prev(&self) -> Option<&'a Node<'a, T>> {
        self.prev.get()
    }

    fn link(&self) {
        self.linked.set(true);
    }

    fn unlink(&self) {
        self.prev.set(None);
        self.next.set(None);
        self.linked.set(false);
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("linked", &self.is_linked())
            .finish()
    }
}

/// A doubly linked list of caller-owned [`Node`]s.
pub struct IntrusiveList<'a, T> {
    head: Option<&'a Node<'a, T>>,
    tail: Option<&'a Node<'a, T>>,
    len: usize,
}

impl<T> Default for IntrusiveList<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntrusiveList<'a, T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of linked nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no node is linked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first node, if any.
    #[must_use]
    pub fn front(&self) -> Option<&'a Node<'a, T>> {
        self.head
    }

    /// The last node, if any.
    #[must_use]
    pub fn back(&self) -> Option<&'a Node<'a, T>> {
        self.tail
    }

    fn assert_unlinked(node: &Node<'a, T>) {
        assert!(!node.is_linked(), "node is already linked");
    }

    /// Links `node` in front of the current head.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already linked.
    pub fn push_front(&mut self, node: &'a Node<'a, T>) {
        Self::assert_unlinked(node);
        node.link();
        match self.head {
            Some(old) => {
                old.prev.set(Some(node));
                node.next.set(Some(old));
            }
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Links `node` after the current tail.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already linked.
    pub fn push_back(&mut self, node: &'a Node<'a, T>) {
        Self::assert_unlinked(node);
        node.link();
        match self.tail {
            Some(old) => {
                old.next.set(Some(node));
                node.prev.set(Some(old));
            }
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Unlinks and returns the head node, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<&'a Node<'a, T>> {
        let node = self.head?;
        let next = node.next.get();
        match next {
            Some(next) => next.prev.set(None),
            None => self.tail = None,
        }
        self.head = next;
        self.len -= 1;
        node.unlink();
        Some(node)
    }

    /// Unlinks and returns the tail node, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<&'a Node<'a, T>> {
        let node = self.tail?;
        let prev = node.prev.get();
        match prev {
            Some(prev) => prev.next.set(None),
            None => self.head = None,
        }
        self.tail = prev;
        self.len -= 1;
        node.unlink();
        Some(node)
    }

    /// Walks to the node at `index` from whichever end is closer.
    ///
    /// Requires `index < len`.
    fn node_at(&self, index: usize) -> &'a Node<'a, T> {
        debug_assert!(index < self.len);
        if index < self.len / 2 {
            let mut node = self.head.expect("list chain is broken");
            for _ in 0..index {
                node = node.next.get().expect("list chain is broken");
            }
            node
        } else {
            let mut node = self.tail.expect("list chain is broken");
            for _ in 0..self.len - 1 - index {
                node = node.prev.get().expect("list chain is broken");
            }
            node
        }
    }

    /// Returns the node at `index`, or `None` if out of range.
    ///
    /// Walks from the closer end: O(min(index, len - index)).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Node<'a, T>> {
        (index < self.len).then(|| self.node_at(index))
    }

    /// Links `node` so that it ends up at position `index`.
    ///
    /// Walks from the closer end: O(min(index, len - index)).
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if `node` is already linked.
    pub fn insert(&mut self, index: usize, node: &'a Node<'a, T>) {
        assert!(index <= self.len, "index out of bounds");
        if index == 0 {
            self.push_front(node);
        } else if index == self.len {
            self.push_back(node);
        } else {
            Self::assert_unlinked(node);
            node.link();
            let at = self.node_at(index);
            let before = at.prev.get().expect("list chain is broken");
            node.prev.set(Some(before));
            node.next.set(Some(at));
            before.next.set(Some(node));
            at.prev.set(Some(node));
            self.len += 1;
        }
    }

    /// Unlinks and returns the node at `index`, with its links cleared.
    ///
    /// Walks from the closer end: O(min(index, len - index)).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> &'a Node<'a, T> {
        assert!(index < self.len, "index out of bounds");
        if index == 0 {
            return self.pop_front().expect("list chain is broken");
        }
        if index == self.len - 1 {
            return self.pop_back().expect("list chain is broken");
        }

        let node = self.node_at(index);
        let before = node.prev.get().expect("list chain is broken");
        let after = node.next.get().expect("list chain is broken");
        before.next.set(Some(after));
        after.prev.set(Some(before));
        node.unlink();
        self.len -= 1;
        node
    }

    /// Unlinks every node, leaving each one ready for reinsertion.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns a front-to-back iterator over the payloads.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntrusiveList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &IntrusiveList<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over the payloads of an [`IntrusiveList`].
pub struct Iter<'a, T> {
    front: Option<&'a Node<'a, T>>,
    back: Option<&'a Node<'a, T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.front = node.next.get();
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.back = node.prev.get();
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(all(test, feature = "std"))]
mod tests {
    extern crate std;
    use core::ptr;
    use std::vec;
    use std::vec::Vec;

    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<'_, T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    /// Checks that `len` matches the hop count in both directions.
    fn assert_consistent<T>(list: &IntrusiveList<'_, T>) {
        assert_eq!(list.head.is_some(), list.tail.is_some());
        let mut forward = 0;
        let mut node = list.head;
        while let Some(n) = node {
            forward += 1;
            if n.next.get().is_none() {
                assert!(ptr::eq(n, list.tail.unwrap()));
            }
            node = n.next.get();
        }
        let mut backward = 0;
        let mut node = list.tail;
        while let Some(n) = node {
            backward += 1;
            node = n.prev.get();
        }
        assert_eq!(forward, list.len());
        assert_eq!(backward, list.len());
    }

    #[test]
    fn new_is_empty() {
        let list = IntrusiveList::<u8>::new();
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        assert_consistent(&list);
    }

    #[test]
    fn push_and_pop_both_ends() {
        let nodes: Vec<Node<'_, i32>> = (1..=4).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        list.push_back(&nodes[1]);
        list.push_front(&nodes[0]);
        list.push_back(&nodes[2]);
        list.push_back(&nodes[3]);
        assert_consistent(&list);
        assert_eq!(values(&list), vec![1, 2, 3, 4]);

        assert_eq!(list.pop_front().map(Node::get), Some(&1));
        assert_eq!(list.pop_back().map(Node::get), Some(&4));
        assert_consistent(&list);
        assert_eq!(values(&list), vec![2, 3]);

        assert!(list.pop_back().is_some());
        assert!(list.pop_back().is_some());
        assert!(list.pop_back().is_none());
        assert!(list.pop_front().is_none());
        assert_consistent(&list);
    }

    #[test]
    fn popped_nodes_are_unlinked() {
        let a = Node::new('a');
        let b = Node::new('b');
        let mut list = IntrusiveList::new();
        list.push_back(&a);
        list.push_back(&b);
        let popped = list.pop_front().unwrap();
        assert!(ptr::eq(popped, &a));
        assert!(!a.is_linked());
        assert!(b.prev().is_none());
        list.push_back(&a);
        assert_eq!(values(&list), vec!['b', 'a']);
    }

    #[test]
    fn insert_scenario() {
        let nodes: Vec<Node<'_, i32>> = [1, 5, 2, 4, 3].into_iter().map(Node::new).collect();
        let mut list = IntrusiveList::new();
        list.insert(0, &nodes[0]);
        list.insert(1, &nodes[1]);
        list.insert(1, &nodes[2]);
        list.insert(2, &nodes[3]);
        list.insert(2, &nodes[4]);
        assert_consistent(&list);
        assert_eq!(values(&list), vec![1, 2, 3, 4, 5]);

        let removed = list.remove(2);
        assert_eq!(*removed.get(), 3);
        assert!(removed.prev().is_none() && removed.next().is_none());
        assert_consistent(&list);
        assert_eq!(values(&list), vec![1, 2, 4, 5]);
    }

    #[test]
    fn remove_boundaries() {
        let nodes: Vec<Node<'_, i32>> = (0..4).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        for node in &nodes {
            list.push_back(node);
        }
        assert_eq!(*list.remove(3).get(), 3);
        assert_eq!(*list.remove(0).get(), 0);
        assert_consistent(&list);
        assert_eq!(values(&list), vec![1, 2]);
    }

    #[test]
    fn removed_node_reinserts_elsewhere() {
        let nodes: Vec<Node<'_, i32>> = (0..5).map(Node::new).collect();
        let mut first = IntrusiveList::new();
        let mut second = IntrusiveList::new();
        for node in &nodes {
            first.push_back(node);
        }
        let moved = first.remove(3);
        second.push_back(moved);
        second.insert(0, first.remove(1));
        assert_consistent(&first);
        assert_consistent(&second);
        assert_eq!(values(&first), vec![0, 2, 4]);
        assert_eq!(values(&second), vec![1, 3]);
    }

    #[test]
    fn get_walks_from_both_ends() {
        let nodes: Vec<Node<'_, i32>> = (0..7).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        for node in &nodes {
            list.push_back(node);
        }
        for (i, node) in nodes.iter().enumerate() {
            assert!(ptr::eq(list.get(i).unwrap(), node));
        }
        assert!(list.get(7).is_none());
    }

    #[test]
    #[should_panic(expected = "node is already linked")]
    fn double_push_panics() {
        let a = Node::new(1);
        let b = Node::new(2);
        let mut list = IntrusiveList::new();
        list.push_back(&a);
        list.push_back(&b);
        list.push_front(&b);
    }

    #[test]
    #[should_panic(expected = "node is already linked")]
    fn pushing_sole_node_twice_panics() {
        let a = Node::new(1);
        let mut list = IntrusiveList::new();
        list.push_back(&a);
        list.push_back(&a);
    }

    #[test]
    #[should_panic(expected = "node is already linked")]
    fn sole_node_of_another_list_panics() {
        let x = Node::new(1);
        let mut first = IntrusiveList::new();
        let mut second = IntrusiveList::new();
        first.push_back(&x);
        assert!(x.is_linked());
        second.push_back(&x);
    }

    #[test]
    fn sole_node_of_another_list_rejected_by_insert() {
        let x = Node::new(1);
        let y = Node::new(2);
        let z = Node::new(3);
        let mut first = IntrusiveList::new();
        let mut second = IntrusiveList::new();
        first.push_back(&x);
        second.push_back(&y);
        second.push_back(&z);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| second.insert(1, &x)));
        assert!(result.is_err());
        assert_eq!(values(&second), vec![2, 3]);
        assert_consistent(&second);

        // Once popped, the node is free to move.
        assert!(first.pop_front().is_some());
        assert!(!x.is_linked());
        second.insert(1, &x);
        assert_eq!(values(&second), vec![2, 1, 3]);
        assert_consistent(&first);
        assert_consistent(&second);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn insert_out_of_bounds() {
        let a = Node::new(1);
        let mut list = IntrusiveList::new();
        list.insert(1, &a);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn remove_out_of_bounds() {
        let mut list = IntrusiveList::<u8>::new();
        list.remove(0);
    }

    #[test]
    fn clear_unlinks_every_node() {
        let nodes: Vec<Node<'_, i32>> = (0..3).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        for node in &nodes {
            list.push_back(node);
        }
        list.clear();
        assert!(list.is_empty());
        assert!(nodes.iter().all(|n| !n.is_linked()));
    }

    #[test]
    fn iter_both_directions() {
        let nodes: Vec<Node<'_, i32>> = (1..=3).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        for node in &nodes {
            list.push_back(node);
        }
        let iter = list.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().rev().collect::<Vec<_>>(), vec![&3, &2, &1]);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(std::format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    fn node_payload_access() {
        let mut node = Node::new(1);
        *node.get_mut() += 1;
        assert_eq!(*node.get(), 2);
        assert_eq!(node.into_inner(), 2);
    }
}
