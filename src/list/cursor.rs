use crate::error::{Error, Result};
use crate::list::node::NodeKey;
use crate::list::List;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `List`.
///
/// A `Cursor` always rests *between* two nodes, `left` and `right`, where
/// `right` is the node `next` would return. Before the first element `left`
/// is the head sentinel; after the last one `right` is the tail sentinel.
/// In a list with length *n*, there are *n* + 1 valid positions, indexed by
/// 0, 1, ..., *n*.
///
/// # Examples
///
/// ```
/// use sentinel_list::{Error, List};
///
/// // Create a list: [A B C]
/// let list = List::from_iter(['A', 'B', 'C']);
///
/// // Create a cursor at start: [|A B C] (index = 0)
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.previous(), Err(Error::NoPreviousElement));
///
/// // Move cursor forward: [A B|C] (index = 2)
/// assert_eq!(cursor.next(), Ok(&'A'));
/// assert_eq!(cursor.next(), Ok(&'B'));
/// assert_eq!(cursor.next_index(), 2);
///
/// // Move cursor backward: [A|B C] (index = 1)
/// assert_eq!(cursor.previous(), Ok(&'B'));
/// assert_eq!(cursor.previous_index(), Some(0));
/// ```
pub struct Cursor<'a, T: 'a> {
    left: NodeKey,
    right: NodeKey,
    index: usize,
    list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list and have the same positions
/// are considered equal.
///
/// # Examples
/// ```
/// use sentinel_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same position.
/// assert!(cursor1 == cursor2);
///
/// cursor2.next().unwrap();
/// // The same list, but different positions.
/// assert!(cursor1 != cursor2);
///
/// let another_list = List::from_iter([1, 2, 3]);
/// let cursor3 = another_list.cursor();
/// // Different list, same index.
/// assert!(cursor1 != cursor3);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.right == other.right
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list can compare, so it is `PartialOrd`
/// but not `Ord`.
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_list_with(other) {
            return None;
        }
        Some(self.index.cmp(&other.index))
    }
}

/// A cursor over a `List` with editing operations.
///
/// Besides moving like a [`Cursor`], a `CursorMut` can insert an element at
/// its position and replace or remove the element it returned last. It keeps
/// track of the direction of its last move: after `next` the last returned
/// element is on its left, after `previous` it is on its right.
///
/// `set` and `remove` are only valid right after a `next` or `previous`;
/// `add`, `set` and `remove` all consume that permission.
///
/// A `CursorMut` borrows the list mutably, so no other cursor or reference
/// can observe the list while it is being edited.
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_mut();
/// println!("{:?}", list.back());
/// cursor.add(4).unwrap();
/// ```
///
/// # Examples
///
/// ```
/// use sentinel_list::{Error, List};
///
/// let mut list = List::from_iter(["x", "y"]);
/// let mut cursor = list.cursor_mut();
///
/// assert_eq!(cursor.remove(), Err(Error::IllegalState));
/// assert_eq!(cursor.next(), Ok(&mut "x"));
/// cursor.add("m").unwrap(); // [x m|y]
/// assert_eq!(cursor.next_index(), 2);
/// assert_eq!(cursor.set("n"), Err(Error::IllegalState));
///
/// assert_eq!(cursor.next(), Ok(&mut "y"));
/// assert_eq!(cursor.remove(), Ok("y")); // [x m|]
/// assert_eq!(cursor.next_index(), 2);
///
/// assert_eq!(Vec::from_iter(list), vec!["x", "m"]);
/// ```
pub struct CursorMut<'a, T: 'a> {
    left: NodeKey,
    right: NodeKey,
    index: usize,
    last: Option<Direction>,
    list: &'a mut List<T>,
}

/// The direction of the last move of a [`CursorMut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// `next` was called, the last returned node is `left`.
    Forward,
    /// `previous` was called, the last returned node is `right`.
    Backward,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Step over `right`, and return its key.
            fn step_forward(&mut self) -> Result<NodeKey> {
                if !self.has_next() {
                    return Err(Error::NoNextElement);
                }
                self.left = self.right;
                self.right = self.list.next_node(self.right);
                self.index += 1;
                Ok(self.left)
            }

            /// Step back over `left`, and return its key.
            fn step_backward(&mut self) -> Result<NodeKey> {
                if !self.has_previous() {
                    return Err(Error::NoPreviousElement);
                }
                self.right = self.left;
                self.left = self.list.prev_node(self.left);
                self.index -= 1;
                Ok(self.right)
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns the length of the underlying list.
            pub fn len(&self) -> usize {
                self.list.len()
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns `true` if there is an element after the cursor.
            pub fn has_next(&self) -> bool {
                self.index < self.list.len()
            }

            /// Returns `true` if there is an element before the cursor.
            pub fn has_previous(&self) -> bool {
                self.index > 0
            }

            /// Returns the index of the element `next` would return, which is
            /// the number of elements before the cursor.
            pub fn next_index(&self) -> usize {
                self.index
            }

            /// Returns the index of the element `previous` would return, or
            /// `None` if the cursor is before the first element.
            pub fn previous_index(&self) -> Option<usize> {
                self.index.checked_sub(1)
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, left: NodeKey, right: NodeKey, index: usize) -> Self {
        debug_assert_eq!(list.next_node(left), right);
        Self {
            left,
            right,
            index,
            list,
        }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    /// Move the cursor over the next element and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextElement`] if the cursor is after the last
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Error, List};
    ///
    /// let list = List::from_iter([1]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(), Ok(&1));
    /// assert_eq!(cursor.next(), Err(Error::NoNextElement));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&'a T> {
        let list = self.list;
        self.step_forward().map(|key| list.element(key))
    }

    /// Move the cursor back over the previous element and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPreviousElement`] if the cursor is before the
    /// first element.
    pub fn previous(&mut self) -> Result<&'a T> {
        let list = self.list;
        self.step_backward().map(|key| list.element(key))
    }

    /// The list this cursor moves over.
    pub fn view(&self) -> &'a List<T> {
        self.list
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, left: NodeKey, right: NodeKey, index: usize) -> Self {
        debug_assert_eq!(list.next_node(left), right);
        Self {
            left,
            right,
            index,
            last: None,
            list,
        }
    }

    /// The node the last `next` or `previous` returned, if `set` or `remove`
    /// may still act on it.
    fn last_returned(&self) -> Result<NodeKey> {
        match self.last {
            Some(Direction::Forward) => Ok(self.left),
            Some(Direction::Backward) => Ok(self.right),
            None => Err(Error::IllegalState),
        }
    }

    /// Move the cursor over the next element and return a mutable reference
    /// to it. `set` and `remove` then act on this element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextElement`] if the cursor is after the last
    /// element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&mut T> {
        let key = self.step_forward()?;
        self.last = Some(Direction::Forward);
        Ok(self.list.element_mut(key))
    }

    /// Move the cursor back over the previous element and return a mutable
    /// reference to it. `set` and `remove` then act on this element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPreviousElement`] if the cursor is before the
    /// first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_mut_at(3).unwrap();
    ///
    /// assert_eq!(cursor.previous(), Ok(&mut 3));
    /// assert_eq!(cursor.set(30), Ok(3));
    /// assert_eq!(cursor.previous(), Ok(&mut 2));
    /// assert_eq!(cursor.remove(), Ok(2));
    /// assert_eq!(cursor.next_index(), 1);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 30]);
    /// ```
    pub fn previous(&mut self) -> Result<&mut T> {
        let key = self.step_backward()?;
        self.last = Some(Direction::Backward);
        Ok(self.list.element_mut(key))
    }

    /// Insert an element at the cursor position, between `left` and `right`.
    ///
    /// The new element ends up before the cursor: a following `next` returns
    /// the element that was after the cursor, and `next_index` grows by one.
    /// The inserted element cannot be `set` or `remove`d until the cursor
    /// moves again.
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
    /// let mut list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor_mut();
    ///
    /// cursor.add(0).unwrap(); // [0|1 2]
    /// assert_eq!(cursor.next_index(), 1);
    /// assert_eq!(cursor.next(), Ok(&mut 1));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2]);
    /// ```
    pub fn add(&mut self, value: impl Into<Option<T>>) -> Result<()> {
        let element = value.into().ok_or(Error::NullValue)?;
        self.left = self.list.attach_node(self.left, self.right, element);
        self.index += 1;
        self.last = None;
        Ok(())
    }

    /// Replace the element returned by the last `next` or `previous`, and
    /// return the replaced element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] if `value` is `None`, or
    /// [`Error::IllegalState`] if the cursor has not moved since it was
    /// created or since the last `add`, `set` or `remove`.
    pub fn set(&mut self, value: impl Into<Option<T>>) -> Result<T> {
        let element = value.into().ok_or(Error::NullValue)?;
        let key = self.last_returned()?;
        self.last = None;
        Ok(std::mem::replace(self.list.element_mut(key), element))
    }

    /// Remove the element returned by the last `next` or `previous`, and
    /// return it.
    ///
    /// After a `next`, the removed element was before the cursor, so
    /// `next_index` shrinks by one. After a `previous`, it was after the
    /// cursor, and `next_index` is unchanged.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the cursor has not moved since it
    /// was created or since the last `add`, `set` or `remove`.
    pub fn remove(&mut self) -> Result<T> {
        let key = self.last_returned()?;
        match self.last.take() {
            Some(Direction::Forward) => {
                self.left = self.list.prev_node(key);
                self.index -= 1;
            }
            Some(Direction::Backward) => {
                self.right = self.list.next_node(key);
            }
            None => unreachable!("`last_returned` checked the direction"),
        }
        Ok(self.list.detach_node(key))
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_mut();
    ///
    /// cursor.add(0).unwrap();
    /// assert_eq!(cursor.view().front(), Some(&0));
    /// assert_eq!(cursor.view().len(), 4);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one at the
    /// same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.left, self.right, self.index)
    }

    /// Convert the mutable cursor to an immutable one at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.left, self.right, self.index)
    }
}

/// `CursorIter` yields the elements after a [`Cursor`], moving it forward.
///
/// # Examples
///
/// ```
/// use sentinel_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor();
/// cursor.next().unwrap();
///
/// let mut cursor_iter = cursor.into_iter();
/// assert_eq!(cursor_iter.next(), Some(&2));
/// assert_eq!(cursor_iter.next(), Some(&3));
/// assert_eq!(cursor_iter.next(), None);
///
/// // Convert back to a cursor
/// let mut cursor = cursor_iter.into_cursor();
/// assert_eq!(cursor.previous(), Ok(&3));
/// ```
pub struct CursorIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> CursorIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
}

impl<'a, T: 'a> From<CursorIter<'a, T>> for Cursor<'a, T> {
    fn from(cursor_iter: CursorIter<'a, T>) -> Self {
        cursor_iter.into_cursor()
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

#[cfg(test)]
mod tests {
    use crate::list::assert_linked;
    use crate::{Error, List};

    #[test]
    fn cursor_traverse_both_ways() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor();
        let mut forward = Vec::new();
        while cursor.has_next() {
            assert_eq!(cursor.next_index(), forward.len());
            forward.push(*cursor.next().unwrap());
        }
        assert_eq!(forward, vec![0, 1, 2, 3, 4]);
        assert_eq!(cursor.next(), Err(Error::NoNextElement));
        assert_eq!(cursor.previous_index(), Some(4));

        let mut backward = Vec::new();
        while cursor.has_previous() {
            backward.push(*cursor.previous().unwrap());
        }
        assert_eq!(backward, vec![4, 3, 2, 1, 0]);
        assert_eq!(cursor.previous(), Err(Error::NoPreviousElement));
        assert_eq!(cursor.previous_index(), None);
        assert_eq!(cursor.next_index(), 0);
    }

    #[test]
    fn cursor_on_empty_list() {
        let mut list: List<i32> = List::new();
        let mut cursor = list.cursor();
        assert!(!cursor.has_next());
        assert!(!cursor.has_previous());
        assert_eq!(cursor.next(), Err(Error::NoNextElement));
        assert_eq!(cursor.previous(), Err(Error::NoPreviousElement));

        let mut cursor = list.cursor_mut();
        cursor.add(1).unwrap();
        assert_linked(cursor.view());
        cursor.add(2).unwrap();
        assert_linked(cursor.view());
        assert_eq!(cursor.next_index(), 2);
        assert!(!cursor.has_next());
        assert_eq!(Vec::from_iter(list), vec![1, 2]);
    }

    #[test]
    fn cursor_fresh_cannot_mutate() {
        let mut list = List::from_iter([1, 2]);
        let mut cursor = list.cursor_mut();
        assert_eq!(cursor.set(5), Err(Error::IllegalState));
        assert_eq!(cursor.remove(), Err(Error::IllegalState));
        assert_eq!(Vec::from_iter(list), vec![1, 2]);
    }

    #[test]
    fn cursor_add_then_remove_forward() {
        let mut list = List::from_iter(["x", "y"]);
        let mut cursor = list.cursor_mut();
        assert_eq!(cursor.next(), Ok(&mut "x"));
        assert_eq!(cursor.next_index(), 1);

        cursor.add("m").unwrap();
        assert_linked(cursor.view());
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.view().len(), 3);
        assert_eq!(cursor.remove(), Err(Error::IllegalState));
        assert_eq!(cursor.set("n"), Err(Error::IllegalState));

        assert_eq!(cursor.next(), Ok(&mut "y"));
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.remove(), Ok("y"));
        assert_linked(cursor.view());
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.remove(), Err(Error::IllegalState));

        assert_eq!(Vec::from_iter(list), vec!["x", "m"]);
    }

    #[test]
    fn cursor_remove_backward_keeps_index() {
        let mut list = List::from_iter(0..4);
        let mut cursor = list.cursor_mut_at(2).unwrap();
        assert_eq!(cursor.previous(), Ok(&mut 1));
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.remove(), Ok(1));
        assert_linked(cursor.view());
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.next(), Ok(&mut 2));
        assert_eq!(cursor.previous(), Ok(&mut 2));
        assert_eq!(cursor.previous(), Ok(&mut 0));
        assert!(!cursor.has_previous());
        assert_eq!(Vec::from_iter(list), vec![0, 2, 3]);
    }

    #[test]
    fn cursor_set_targets_last_returned() {
        let mut list = List::from_iter(0..3);
        let mut cursor = list.cursor_mut();
        cursor.next().unwrap();
        cursor.next().unwrap();
        assert_eq!(cursor.set(10), Ok(1));
        assert_eq!(cursor.set(11), Err(Error::IllegalState));

        cursor.previous().unwrap();
        assert_eq!(cursor.set(None::<i32>), Err(Error::NullValue));
        // A rejected value does not consume the permission.
        assert_eq!(cursor.set(20), Ok(10));
        assert_eq!(Vec::from_iter(list), vec![0, 20, 2]);
    }

    #[test]
    fn cursor_add_rejects_absent_value() {
        let mut list = List::from_iter([1, 2]);
        let mut cursor = list.cursor_mut();
        cursor.next().unwrap();
        assert_eq!(cursor.add(None::<i32>), Err(Error::NullValue));
        assert_eq!(cursor.next_index(), 1);
        // Still allowed, since the failed add changed nothing.
        assert_eq!(cursor.remove(), Ok(1));
        assert_linked(cursor.view());
        assert_eq!(Vec::from_iter(list), vec![2]);
    }

    #[test]
    fn cursor_remove_all() {
        let mut list = List::from_iter(0..6);
        let mut cursor = list.cursor_mut();
        while cursor.has_next() {
            if *cursor.next().unwrap() % 2 == 0 {
                cursor.remove().unwrap();
                assert_linked(cursor.view());
            }
        }
        assert_eq!(cursor.next_index(), 3);
        while cursor.has_previous() {
            cursor.previous().unwrap();
            cursor.remove().unwrap();
            assert_linked(cursor.view());
        }
        assert!(cursor.is_empty());
        assert!(list.is_empty());
    }

    #[test]
    fn cursor_convert_and_compare() {
        let mut list = List::from_iter(0..3);
        let mut cursor = list.cursor_mut();
        cursor.next().unwrap();
        assert_eq!(cursor.as_cursor().next_index(), 1);
        let cursor = cursor.into_cursor();

        let mut other = cursor.clone();
        assert!(cursor == other);
        other.next().unwrap();
        assert!(cursor < other);
        assert_eq!(cursor.into_iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn cursor_edits_at_both_ends() {
        let mut list = List::from_iter([1, 2]);
        let mut cursor = list.cursor_mut_at(2).unwrap();
        cursor.add(3).unwrap(); // [1 2 3|]
        assert_linked(cursor.view());
        assert_eq!(cursor.previous(), Ok(&mut 3));
        assert_eq!(cursor.remove(), Ok(3)); // [1 2|]
        assert_linked(cursor.view());
        assert!(!cursor.has_next());

        while cursor.has_previous() {
            cursor.previous().unwrap();
        }
        cursor.add(0).unwrap(); // [0|1 2]
        assert_linked(cursor.view());
        assert_eq!(cursor.previous(), Ok(&mut 0));
        assert_eq!(cursor.remove(), Ok(0)); // [|1 2]
        assert_linked(cursor.view());
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(Vec::from_iter(list), vec![1, 2]);
    }

    #[test]
    fn independent_cursors() {
        let list = List::from_iter(0..3);
        let mut a = list.cursor();
        let mut b = list.cursor();
        a.next().unwrap();
        a.next().unwrap();
        assert_eq!(b.next(), Ok(&0));
        assert_eq!(a.next(), Ok(&2));
    }
}
