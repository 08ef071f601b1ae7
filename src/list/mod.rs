use std::fmt::{Debug, Formatter};

use slab::Slab;
use tracing::trace;

use crate::error::{Error, Result};
use crate::list::cursor::{Cursor, CursorMut};
use crate::list::node::{Node, NodeKey};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod node;

/// The `List` is a doubly-linked list with two sentinel nodes, which allows
/// indexed access as well as constant time editing through a [`CursorMut`].
///
/// Nodes live in a slab arena owned by the list. Each node links to its
/// neighbours by arena keys, so the arena is the single owner of every node
/// and the `prev` links are plain back-references.
///
/// The `List` contains:
/// - the arena `nodes`;
/// - the keys of the `head` and `tail` sentinels, which never hold an element;
/// - a length field `len`.
///
/// # Memory Layout
///
/// ```text
///  ╔══════╗      ╔═══════╗      ╔═══════╗      ╔══════╗
///  ║ head ║ ───→ ║  "a"  ║ ───→ ║  "b"  ║ ───→ ║ tail ║ ───→ None
///  ║      ║ ←─── ║       ║ ←─── ║       ║ ←─── ║      ║
///  ╚══════╝      ╚═══════╝      ╚═══════╝      ╚══════╝
///     ↓
///    None
/// ```
///
/// In a list with length *n*, the elements are indexed by 0, 1, ..., *n* - 1,
/// and the tail sentinel is at position *n*.
///
/// # Absent values
///
/// Every method storing an element accepts `impl Into<Option<T>>`: a plain
/// `T` is stored, and `None` is rejected with [`Error::NullValue`] before the
/// list is touched. A list of `Option`s must wrap its elements explicitly:
/// `push_back(Some(None))` stores `None`, while `push_back(None)` is
/// ambiguous and does not compile.
///
/// ```
/// use sentinel_list::{Error, List};
///
/// let mut list: List<&str> = List::new();
/// list.push_back("a").unwrap();
/// assert_eq!(list.push_back(None), Err(Error::NullValue));
/// assert_eq!(list.len(), 1);
/// ```
pub struct List<T> {
    nodes: Slab<Node<T>>,
    head: NodeKey,
    tail: NodeKey,
    /// the number of non-sentinel nodes
    len: usize,
}

// private methods
impl<T> List<T> {
    pub(crate) fn tail_node(&self) -> NodeKey {
        self.tail
    }
    /// The first element node, or the tail sentinel if the list is empty.
    pub(crate) fn front_node(&self) -> NodeKey {
        self.next_node(self.head)
    }
    /// The last element node, or the head sentinel if the list is empty.
    pub(crate) fn back_node(&self) -> NodeKey {
        self.prev_node(self.tail)
    }

    fn node(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key.to_raw()]
    }
    fn node_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key.to_raw()]
    }

    /// Every element node with its key, in arena order rather than list order.
    /// The references are disjoint, so all of them may be held at once.
    pub(crate) fn element_nodes_mut(&mut self) -> impl Iterator<Item = (NodeKey, &mut Node<T>)> {
        self.nodes
            .iter_mut()
            .filter(|(_, node)| !node.is_sentinel())
            .map(|(raw, node)| (NodeKey::from_raw(raw), node))
    }

    pub(crate) fn next_node(&self, key: NodeKey) -> NodeKey {
        self.node(key)
            .next
            .expect("only the tail sentinel has no successor")
    }
    pub(crate) fn prev_node(&self, key: NodeKey) -> NodeKey {
        self.node(key)
            .prev
            .expect("only the head sentinel has no predecessor")
    }

    pub(crate) fn element(&self, key: NodeKey) -> &T {
        self.node(key)
            .element
            .as_ref()
            .expect("sentinel nodes hold no element")
    }
    pub(crate) fn element_mut(&mut self, key: NodeKey) -> &mut T {
        self.node_mut(key)
            .element
            .as_mut()
            .expect("sentinel nodes hold no element")
    }

    fn connect(&mut self, prev: NodeKey, next: NodeKey) {
        self.node_mut(prev).next = Some(next);
        self.node_mut(next).prev = Some(prev);
    }

    /// Attach a new node holding `element` between `prev` and `next`, and
    /// return its key.
    ///
    /// `prev` and `next` must be adjacent nodes of the list (checked only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) fn attach_node(&mut self, prev: NodeKey, next: NodeKey, element: T) -> NodeKey {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let node = NodeKey::from_raw(self.nodes.insert(Node::detached(element)));
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        node
    }

    /// Detach the element node `key` from the list, clear its links, release
    /// it from the arena and return its element.
    pub(crate) fn detach_node(&mut self, key: NodeKey) -> T {
        debug_assert!(!self.node(key).is_sentinel(), "Cannot detach a sentinel node");
        let node = self.node_mut(key);
        match (node.prev.take(), node.next.take()) {
            (Some(prev), Some(next)) => self.connect(prev, next),
            _ => unreachable!("element nodes are linked on both sides"),
        }
        self.len -= 1;
        self.nodes.remove(key.to_raw()).into_element()
    }

    /// Return the node at position `at`, or the tail sentinel if `at == len`.
    ///
    /// The walk starts from whichever sentinel is nearer.
    pub(crate) fn node_at(&self, at: usize) -> NodeKey {
        debug_assert!(at <= self.len);
        if at <= self.len / 2 {
            (0..=at).fold(self.head, |key, _| self.next_node(key))
        } else {
            (at..self.len).fold(self.tail, |key, _| self.prev_node(key))
        }
    }

    /// Bounds check for operations on an existing element: `0..len`.
    fn check_element_index(&self, at: usize) -> Result<()> {
        if at < self.len {
            return Ok(());
        }
        Err(self.out_of_bounds(at))
    }

    /// Bounds check for positions between elements: `0..=len`.
    pub(crate) fn check_position_index(&self, at: usize) -> Result<()> {
        if at <= self.len {
            return Ok(());
        }
        Err(self.out_of_bounds(at))
    }

    fn out_of_bounds(&self, index: usize) -> Error {
        trace!(index, len = self.len, "rejected out of bounds index");
        Error::IndexOutOfBounds {
            index,
            len: self.len,
        }
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeKey, next: NodeKey) {
        assert_eq!(self.node(prev).next, Some(next));
        assert_eq!(self.node(next).prev, Some(prev));
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `List` whose arena has room for at least `capacity`
    /// elements before reallocating.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::with_capacity(16);
    /// assert!(list.capacity() >= 16);
    /// assert_eq!(list.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity.saturating_add(2));
        let head = NodeKey::from_raw(nodes.insert(Node::sentinel()));
        let tail = NodeKey::from_raw(nodes.insert(Node::sentinel()));
        let mut list = Self {
            nodes,
            head,
            tail,
            len: 0,
        };
        list.connect(head, tail);
        list
    }

    /// Returns the number of elements the list can hold without reallocating
    /// its arena.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(2)
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<&str> = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo").unwrap();
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    ///
    /// list.push_front(2).unwrap();
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1).unwrap();
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3).unwrap();
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// The chain of element nodes is cut off both sentinels at once, which
    /// are then linked to each other again. The detached nodes are released
    /// from front to back afterwards.
    ///
    /// # Complexity
    ///
    /// Detaching computes in *O*(1) time, releasing the nodes in *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    ///
    /// list.push_front(2).unwrap();
    /// list.push_front(1).unwrap();
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        let (front, back) = (self.front_node(), self.back_node());
        self.node_mut(front).prev = None;
        self.node_mut(back).next = None;
        self.connect(self.head, self.tail);
        trace!(len = self.len, "detached all nodes");
        self.len = 0;

        let mut detached = Some(front);
        while let Some(key) = detached {
            detached = self.nodes.remove(key.to_raw()).next;
        }
    }

    /// Provides a reference to the element at the given index.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Error, List};
    ///
    /// let list = List::from_iter(["a", "b", "c"]);
    /// assert_eq!(list.get(1), Ok(&"b"));
    /// assert_eq!(list.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, at: usize) -> Result<&T> {
        self.check_element_index(at)?;
        Ok(self.element(self.node_at(at)))
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// *list.get_mut(2).unwrap() *= 10;
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 30]);
    /// ```
    pub fn get_mut(&mut self, at: usize) -> Result<&mut T> {
        self.check_element_index(at)?;
        let node = self.node_at(at);
        Ok(self.element_mut(node))
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1).unwrap();
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.element(self.front_node()))
    }

    /// Provides a mutable reference to the front element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let front = self.front_node();
        Some(self.element_mut(front))
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1).unwrap();
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.element(self.back_node()))
    }

    /// Provides a mutable reference to the back element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let back = self.back_node();
        Some(self.element_mut(back))
    }

    /// Inserts an element at the given index, shifting all elements after it
    /// one position later. `at == len` appends the element.
    ///
    /// The new node is spliced right before the node currently at `at` (or
    /// the tail sentinel).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] if `value` is `None`, or
    /// [`Error::IndexOutOfBounds`] if `at > len`. The list is unchanged on
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(6, 6).is_err());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, at: usize, value: impl Into<Option<T>>) -> Result<()> {
        let element = value.into().ok_or(Error::NullValue)?;
        self.check_position_index(at)?;
        let next = self.node_at(at);
        let prev = self.prev_node(next);
        self.attach_node(prev, next, element);
        Ok(())
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] if `value` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    /// list.push_back(1).unwrap();
    /// list.push_back(3).unwrap();
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, value: impl Into<Option<T>>) -> Result<()> {
        self.insert(self.len, value)
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] if `value` is `None`.
    pub fn push_front(&mut self, value: impl Into<Option<T>>) -> Result<()> {
        self.insert(0, value)
    }

    /// Replaces the element at the given index and returns the previous one.
    /// The structure of the list is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] if `value` is `None`, or
    /// [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter(["c", "b"]);
    /// assert_eq!(list.set(0, "z"), Ok("c"));
    /// assert_eq!(Vec::from_iter(list), vec!["z", "b"]);
    /// ```
    pub fn set(&mut self, at: usize, value: impl Into<Option<T>>) -> Result<T> {
        let element = value.into().ok_or(Error::NullValue)?;
        self.check_element_index(at)?;
        let node = self.node_at(at);
        Ok(std::mem::replace(self.element_mut(node), element))
    }

    /// Removes the element at the given index and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    ///
    /// list.push_front(1).unwrap();
    /// list.push_front(2).unwrap();
    /// list.push_front(3).unwrap();
    ///
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert!(list.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, at: usize) -> Result<T> {
        self.check_element_index(at)?;
        let node = self.node_at(at);
        Ok(self.detach_node(node))
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1).unwrap();
    /// list.push_front(3).unwrap();
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.detach_node(self.front_node()))
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.detach_node(self.back_node()))
    }

    /// Provides a cursor positioned before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next_index(), 0);
    /// assert_eq!(cursor.next(), Ok(&1));
    /// ```
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head, self.front_node(), 0)
    }

    /// Provides a cursor positioned right before the element at `at`, so that
    /// `next` returns that element. `at == len` places the cursor after the
    /// last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_at(3).unwrap();
    /// assert!(!cursor.has_next());
    /// assert_eq!(cursor.previous(), Ok(&3));
    /// assert!(list.cursor_at(4).is_err());
    /// ```
    pub fn cursor_at(&self, at: usize) -> Result<Cursor<'_, T>> {
        self.check_position_index(at)?;
        let right = self.node_at(at);
        Ok(Cursor::new(self, self.prev_node(right), right, at))
    }

    /// Provides a cursor with editing operations, positioned before the first
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_mut();
    ///
    /// *cursor.next().unwrap() *= 5;
    /// cursor.add(4).unwrap();
    /// assert_eq!(Vec::from_iter(list), vec![5, 4, 2, 3]);
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        let (left, right) = (self.head, self.front_node());
        CursorMut::new(self, left, right, 0)
    }

    /// Provides a cursor with editing operations, positioned right before the
    /// element at `at`. See [`List::cursor_at`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at > len`.
    pub fn cursor_mut_at(&mut self, at: usize) -> Result<CursorMut<'_, T>> {
        self.check_position_index(at)?;
        let right = self.node_at(at);
        let left = self.prev_node(right);
        Ok(CursorMut::new(self, left, right, at))
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    ///
    /// list.push_back(0).unwrap();
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

/// Walk the chain in both directions and check every linkage invariant.
#[cfg(test)]
pub(crate) fn assert_linked<T>(list: &List<T>) {
    assert!(list.nodes[list.head.to_raw()].prev.is_none());
    assert!(list.nodes[list.tail.to_raw()].next.is_none());
    assert_eq!(list.nodes.len(), list.len + 2);

    let mut count = 0;
    let mut key = list.head;
    while key != list.tail {
        let next = list.next_node(key);
        assert_eq!(list.prev_node(next), key);
        assert!(next == list.tail || !list.nodes[next.to_raw()].is_sentinel());
        key = next;
        count += 1;
    }
    assert_eq!(count, list.len + 1);
}
