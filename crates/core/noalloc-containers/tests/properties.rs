//! Model-based property tests: every container is driven alongside a
//! `std` collection and must agree with it after each step.

use std::collections::VecDeque;

use noalloc_containers::deque::ArrayDeque;
use noalloc_containers::list::{IntrusiveList, Node};
use noalloc_containers::vec::ArrayVec;
use proptest::prelude::*;

const CAP: usize = 8;

#[derive(Debug, Clone)]
enum VecOp {
    Push(u16),
    Pop,
    Insert(usize, u16),
    Remove(usize),
    SwapRemove(usize),
    Extend(Vec<u16>),
    RetainMultipleOf(u16),
}

fn vec_op() -> impl Strategy<Value = VecOp> {
    prop_oneof![
        any::<u16>().prop_map(VecOp::Push),
        Just(VecOp::Pop),
        (any::<usize>(), any::<u16>()).prop_map(|(i, v)| VecOp::Insert(i, v)),
        any::<usize>().prop_map(VecOp::Remove),
        any::<usize>().prop_map(VecOp::SwapRemove),
        proptest::collection::vec(any::<u16>(), 0..5).prop_map(VecOp::Extend),
        (1u16..5).prop_map(VecOp::RetainMultipleOf),
    ]
}

#[derive(Debug, Clone, Copy)]
enum DequeOp {
    PushFront(u16),
    PushBack(u16),
    PopFront,
    PopBack,
}

fn deque_op() -> impl Strategy<Value = DequeOp> {
    prop_oneof![
        any::<u16>().prop_map(DequeOp::PushFront),
        any::<u16>().prop_map(DequeOp::PushBack),
        Just(DequeOp::PopFront),
        Just(DequeOp::PopBack),
    ]
}

fn apply_deque<const N: usize>(deque: &mut ArrayDeque<u16, N>, op: DequeOp) -> Option<u16> {
    match op {
        DequeOp::PushFront(v) => deque.try_push_front(v).err().map(|e| e.element()),
        DequeOp::PushBack(v) => deque.try_push_back(v).err().map(|e| e.element()),
        DequeOp::PopFront => deque.pop_front(),
        DequeOp::PopBack => deque.pop_back(),
    }
}

#[derive(Debug, Clone, Copy)]
enum ListOp {
    PushFront,
    PushBack,
    Insert(usize),
    PopFront,
    PopBack,
    Remove(usize),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        Just(ListOp::PushFront),
        Just(ListOp::PushBack),
        any::<usize>().prop_map(ListOp::Insert),
        Just(ListOp::PopFront),
        Just(ListOp::PopBack),
        any::<usize>().prop_map(ListOp::Remove),
    ]
}

/// Hop counts from head to tail and back, through the public node links.
fn hop_counts<T>(list: &IntrusiveList<'_, T>) -> (usize, usize) {
    let mut forward = 0;
    let mut node = list.front();
    while let Some(n) = node {
        forward += 1;
        node = n.next();
    }
    let mut backward = 0;
    let mut node = list.back();
    while let Some(n) = node {
        backward += 1;
        node = n.prev();
    }
    (forward, backward)
}

proptest! {
    #[test]
    fn vec_matches_std_vec(ops in proptest::collection::vec(vec_op(), 1..64)) {
        let mut vec = ArrayVec::<u16, CAP>::new();
        let mut model: Vec<u16> = Vec::new();

        for op in ops {
            match op {
                VecOp::Push(v) => {
                    let res = vec.try_push(v);
                    if model.len() < CAP {
                        prop_assert!(res.is_ok());
                        model.push(v);
                    } else {
                        prop_assert_eq!(res.unwrap_err().element(), v);
                    }
                }
                VecOp::Pop => prop_assert_eq!(vec.pop(), model.pop()),
                VecOp::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    let res = vec.try_insert(i, v);
                    if model.len() < CAP {
                        prop_assert!(res.is_ok());
                        model.insert(i, v);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                VecOp::Remove(i) if !model.is_empty() => {
                    let i = i % model.len();
                    prop_assert_eq!(vec.remove(i), model.remove(i));
                }
                VecOp::SwapRemove(i) if !model.is_empty() => {
                    let i = i % model.len();
                    prop_assert_eq!(vec.swap_remove(i), model.swap_remove(i));
                }
                VecOp::Remove(_) | VecOp::SwapRemove(_) => {}
                VecOp::Extend(batch) => {
                    let res = vec.try_extend_from_slice(&batch);
                    if model.len() + batch.len() <= CAP {
                        prop_assert!(res.is_ok());
                        model.extend_from_slice(&batch);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                VecOp::RetainMultipleOf(k) => {
                    vec.retain(|x| x % k == 0);
                    model.retain(|x| x % k == 0);
                }
            }
            prop_assert!(vec.len() <= CAP);
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn vec_retain_is_idempotent(values in proptest::collection::vec(any::<u8>(), 0..=CAP), k in 1u8..6) {
        let mut once = ArrayVec::<u8, CAP>::try_from_slice(&values).unwrap();
        once.retain(|x| x % k != 0);
        let mut twice = once.clone();
        twice.retain(|x| x % k != 0);
        prop_assert_eq!(&once, &twice);

        let mut all = ArrayVec::<u8, CAP>::try_from_slice(&values).unwrap();
        all.retain(|_| true);
        prop_assert_eq!(all.as_slice(), values.as_slice());
        all.retain(|_| false);
        prop_assert!(all.is_empty());
    }

    #[test]
    fn deque_matches_std_vec_deque(ops in proptest::collection::vec(deque_op(), 1..128)) {
        let mut deque = ArrayDeque::<u16, CAP>::new();
        let mut model: VecDeque<u16> = VecDeque::new();

        for op in ops {
            let rejected = apply_deque(&mut deque, op);
            match op {
                DequeOp::PushFront(v) | DequeOp::PushBack(v) if model.len() == CAP => {
                    prop_assert_eq!(rejected, Some(v));
                }
                DequeOp::PushFront(v) => {
                    prop_assert_eq!(rejected, None);
                    model.push_front(v);
                }
                DequeOp::PushBack(v) => {
                    prop_assert_eq!(rejected, None);
                    model.push_back(v);
                }
                DequeOp::PopFront => prop_assert_eq!(rejected, model.pop_front()),
                DequeOp::PopBack => prop_assert_eq!(rejected, model.pop_back()),
            }

            prop_assert!(deque.len() <= CAP);
            prop_assert_eq!(deque.len(), model.len());
            prop_assert_eq!(deque.front(), model.front());
            prop_assert_eq!(deque.back(), model.back());

            // The views, read in order, are the logical contents no matter
            // where the ring has wrapped.
            let (a, b) = deque.as_slices();
            let viewed: Vec<u16> = a.iter().chain(b).copied().collect();
            prop_assert_eq!(&viewed, &model.iter().copied().collect::<Vec<_>>());
            prop_assert!(deque.iter().eq(model.iter()));
        }
    }

    #[test]
    fn deques_fed_same_ops_agree(
        prefix in proptest::collection::vec(deque_op(), 0..16),
        ops in proptest::collection::vec(deque_op(), 1..64),
    ) {
        // Different wrap positions: one deque sees extra churn first.
        let mut left = ArrayDeque::<u16, CAP>::new();
        let mut right = ArrayDeque::<u16, CAP>::new();
        for op in prefix {
            apply_deque(&mut right, op);
        }
        // Drain rather than clear so the cursors keep their offset.
        while right.pop_front().is_some() {}

        for op in ops {
            prop_assert_eq!(apply_deque(&mut left, op), apply_deque(&mut right, op));
            let (la, lb) = left.as_slices();
            let (ra, rb) = right.as_slices();
            prop_assert_eq!([la, lb].concat(), [ra, rb].concat());
        }
    }

    #[test]
    fn list_matches_model(ops in proptest::collection::vec(list_op(), 1..96)) {
        let nodes: Vec<Node<'_, usize>> = (0..16).map(Node::new).collect();
        let mut list = IntrusiveList::new();
        let mut model: Vec<usize> = Vec::new();
        let mut free: Vec<usize> = (0..nodes.len()).rev().collect();

        for op in ops {
            match op {
                ListOp::PushFront | ListOp::PushBack | ListOp::Insert(_) => {
                    let Some(id) = free.pop() else { continue };
                    match op {
                        ListOp::PushFront => {
                            list.push_front(&nodes[id]);
                            model.insert(0, id);
                        }
                        ListOp::PushBack => {
                            list.push_back(&nodes[id]);
                            model.push(id);
                        }
                        ListOp::Insert(i) => {
                            let i = i % (model.len() + 1);
                            list.insert(i, &nodes[id]);
                            model.insert(i, id);
                        }
                        _ => unreachable!(),
                    }
                }
                ListOp::PopFront => {
                    let popped = list.pop_front().map(|n| *n.get());
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    prop_assert_eq!(popped, expected);
                    free.extend(popped);
                }
                ListOp::PopBack => {
                    let popped = list.pop_back().map(|n| *n.get());
                    prop_assert_eq!(popped, model.pop());
                    free.extend(popped);
                }
                ListOp::Remove(i) if !model.is_empty() => {
                    let i = i % model.len();
                    let node = list.remove(i);
                    prop_assert!(node.prev().is_none() && node.next().is_none());
                    let id = model.remove(i);
                    prop_assert_eq!(*node.get(), id);
                    free.push(id);
                }
                ListOp::Remove(_) => {}
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(hop_counts(&list), (model.len(), model.len()));
            prop_assert!(list.iter().copied().eq(model.iter().copied()));
            prop_assert!(free.iter().all(|&id| !nodes[id].is_linked()));
            prop_assert!(model.iter().all(|&id| nodes[id].is_linked()));
        }
    }
}
