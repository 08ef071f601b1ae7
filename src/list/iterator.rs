use crate::list::cursor::{Cursor, CursorIter};
use crate::list::node::{Node, NodeKey};
use crate::list::List;
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not. `len` counts
/// the elements left in `start..end`, so the iterator stops as soon as
/// both ends meet.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4).unwrap();
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    start: NodeKey,
    end: NodeKey,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            list,
            start: list.front_node(),
            end: list.tail_node(),
            len: list.len(),
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        self.clone().for_each(|element| {
            f.field(element);
        });
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let current = self.start;
        self.start = self.list.next_node(current);
        self.len -= 1;
        Some(self.list.element(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.end = self.list.prev_node(self.end);
        self.len -= 1;
        Some(self.list.element(self.end))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Walking the chain through the list would re-borrow the whole arena at
/// every step, so the `IterMut` borrows every element node once when it is
/// created, keyed by slot, and hands each of them out at most once. The
/// pair `front..=back` denotes the elements left, counted by `len`.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    nodes: Vec<Option<&'a mut Node<T>>>,
    front: NodeKey,
    back: NodeKey,
    len: usize,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let (front, back, len) = (list.front_node(), list.back_node(), list.len());
        let mut nodes = Vec::new();
        for (key, node) in list.element_nodes_mut() {
            let slot = key.to_raw();
            if nodes.len() <= slot {
                nodes.resize_with(slot + 1, || None);
            }
            nodes[slot] = Some(node);
        }
        Self {
            nodes,
            front,
            back,
            len,
        }
    }

    fn node(&self, key: NodeKey) -> &Node<T> {
        self.nodes[key.to_raw()]
            .as_deref()
            .expect("only yielded nodes are taken")
    }

    /// Hand out the node of `key`, which must not have been taken yet.
    fn take(&mut self, key: NodeKey) -> &'a mut Node<T> {
        self.nodes[key.to_raw()]
            .take()
            .expect("every element node is yielded once")
    }
}

fn linked(link: Option<NodeKey>) -> NodeKey {
    link.expect("element nodes are linked on both sides")
}

fn element_of<T>(node: &mut Node<T>) -> &mut T {
    node.element
        .as_mut()
        .expect("sentinel nodes hold no element")
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut key = self.front;
        for _ in 0..self.len {
            let node = self.node(key);
            if let Some(element) = &node.element {
                f.field(element);
            }
            key = linked(node.next);
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    /// Return `*front` and move `front` to its successor, or return `None`
    /// if no element is left.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.take(self.front);
        self.front = linked(node.next);
        self.len -= 1;
        Some(element_of(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    /// Return `*back` and move `back` to its predecessor, or return `None`
    /// if no element is left.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.take(self.back);
        self.back = linked(node.prev);
        self.len -= 1;
        Some(element_of(node))
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = List::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

/// Items of an iterator are plain `T`s, so extending never meets an absent
/// value.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|element| {
            self.attach_node(self.back_node(), self.tail_node(), element);
        });
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T: 'a> Iterator for CursorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.cursor.len() - self.cursor.next_index();
        (len, Some(len))
    }
}

impl<'a, T: 'a> ExactSizeIterator for CursorIter<'a, T> {}

impl<'a, T: 'a> FusedIterator for CursorIter<'a, T> {}

/// Convert the cursor to an iterator over the elements after it.
impl<'a, T: 'a> IntoIterator for Cursor<'a, T> {
    type Item = &'a T;
    type IntoIter = CursorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter { cursor: self }
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    assert_eq!(iter.len(), len);
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn iter_last_and_debug() {
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.iter().last(), Some(&3));
        assert_eq!(list.iter_mut().last(), Some(&mut 3));

        let mut iter = list.iter();
        iter.next();
        assert_eq!(format!("{:?}", iter), "Iter(2, 3)");
        let mut iter_mut = list.iter_mut();
        iter_mut.next_back();
        assert_eq!(format!("{:?}", iter_mut), "IterMut(1, 2)");
        assert_eq!(format!("{:?}", list.into_iter()), "IntoIter { list: [1, 2, 3] }");
    }

    #[test]
    fn into_iter_from_both_ends() {
        let mut iter = List::from_iter(0..5).into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 3);
        assert_eq!(Vec::from_iter(iter.rev()), vec![3, 2, 1]);
    }

    #[test]
    fn iter_mut_edits_in_place() {
        let mut list = List::from_iter(0..4);
        for element in &mut list {
            *element *= 2;
        }
        let (mut iter, mut sum) = (list.iter_mut(), 0);
        while let (Some(front), Some(back)) = (iter.next(), iter.next_back()) {
            std::mem::swap(front, back);
            sum += *front + *back;
        }
        assert_eq!(sum, 12);
        assert_eq!(Vec::from_iter(list), vec![6, 4, 2, 0]);
    }

    #[test]
    fn iter_mut_holds_all_elements() {
        let mut list = List::from_iter(0..8);
        // Leave vacant slots in the arena, and reuse one out of order.
        list.remove(2).unwrap();
        list.remove(4).unwrap();
        list.push_front(-1).unwrap();

        let mut iter = list.iter_mut();
        let first = iter.next().unwrap();
        let last = iter.next_back().unwrap();
        let second = iter.next().unwrap();
        *first += 100;
        *last += 100;
        *second += 100;
        let rest: Vec<&mut i32> = iter.collect();
        assert_eq!(rest.len(), 4);
        for element in rest {
            *element = -*element;
        }
        assert_eq!(Vec::from_iter(list), vec![99, 100, -1, -3, -4, -6, 107]);
    }

    #[test]
    fn extend_and_collect() {
        let mut list: List<i32> = (0..3).collect();
        list.extend([3, 4]);
        list.extend(&[5, 6]);
        assert_eq!(list.len(), 7);
        assert!(list.iter().copied().eq(0..7));

        let list: List<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(Vec::from_iter(&list), vec!["a", "b"]);
    }

    #[test]
    fn cursor_iter_from_middle() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor_at(2).unwrap();
        assert_eq!(cursor.previous(), Ok(&1));

        let mut iter = cursor.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(Vec::from_iter(iter.by_ref().copied()), vec![2, 3, 4]);
        assert_eq!(iter.next(), None);

        let cursor = iter.into_cursor();
        assert_eq!(cursor.next_index(), 5);
    }
}
