//! This crate provides a doubly-linked list with two sentinel nodes, indexed
//! access and a bidirectional list cursor with editing operations.
//!
//! The [`List`] allows reading, replacing, inserting and removing elements at
//! any index in *O*(*n*) time, walking from whichever end is nearer. Through a
//! [`CursorMut`], inserting and removing elements at the cursor take constant
//! time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use sentinel_list::{Error, List};
//!
//! let mut list: List<&str> = List::new();
//! list.push_back("a").unwrap();
//! list.push_back("b").unwrap();
//! list.insert(1, "c").unwrap(); // [a c b]
//! assert_eq!(list.get(1), Ok(&"c"));
//!
//! assert_eq!(list.remove(0), Ok("a")); // [c b]
//! assert_eq!(list.set(0, "z"), Ok("c")); // [z b]
//! assert_eq!(list.get(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
//!
//! // Absent values are never stored.
//! assert_eq!(list.insert(0, None), Err(Error::NullValue));
//! assert_eq!(Vec::from_iter(list), vec!["z", "b"]);
//! ```
//!
//! # Memory Layout
//!
//! ```text
//!   head            Node 0          Node 1           tail
//!  ╔══════╗      ╔═══════════╗   ╔═══════════╗      ╔══════╗
//!  ║ next ║ ───→ ║   next    ║ → ║   next    ║ ───→ ║ next ║ ───→ None
//!  ║ prev ║ ←─── ║   prev    ║ ← ║   prev    ║ ←─── ║ prev ║
//!  ╚══════╝      ║ payload T ║   ║ payload T ║      ╚══════╝
//!     ↓          ╚═══════════╝   ╚═══════════╝
//!    None
//! ```
//!
//! All nodes, including the two sentinels `head` and `tail`, are stored in a
//! slab arena owned by the list, and link to each other by arena keys. The
//! sentinels hold no payload and are never removed, so an empty list is just
//! `head` linked to `tail`, and every element node always has both neighbours.
//!
//! In a list with length *n*, the elements are indexed by 0, 1, ..., *n* - 1.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended, exact-size and fused. [`IterMut`] provides mutability of the
//! elements (but not the linked structure of the list).
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] rest *between* elements. In a
//! list with length *n*, there are *n* + 1 positions for a cursor, indexed by
//! 0, 1, ..., *n*. [`next`] and [`previous`] step over an element and return
//! it, and fail at the ends of the list.
//!
//! [`CursorMut`] edits the list at its position:
//! - [`add`]: insert an element before the cursor;
//! - [`set`]: replace the element returned last;
//! - [`remove`]: remove the element returned last.
//!
//! `set` and `remove` require a `next` or `previous` right before them, with
//! no `add`, `set` or `remove` in between.
//!
//! ```
//! use sentinel_list::{Error, List};
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//! let mut cursor = list.cursor_mut();
//!
//! cursor.add(5).unwrap(); // [5|1 2 3 4]
//! assert_eq!(cursor.remove(), Err(Error::IllegalState));
//!
//! assert_eq!(cursor.next(), Ok(&mut 1));
//! assert_eq!(cursor.next(), Ok(&mut 2));
//! assert_eq!(cursor.remove(), Ok(2)); // [5 1|3 4]
//!
//! assert_eq!(cursor.next(), Ok(&mut 3));
//! assert_eq!(cursor.previous(), Ok(&mut 3));
//! assert_eq!(cursor.set(30), Ok(3)); // [5 1|30 4]
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 30, 4]);
//! ```
//!
//! [`next`]: crate::list::cursor::CursorMut::next
//! [`previous`]: crate::list::cursor::CursorMut::previous
//! [`add`]: crate::list::cursor::CursorMut::add
//! [`set`]: crate::list::cursor::CursorMut::set
//! [`remove`]: crate::list::cursor::CursorMut::remove

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::cursor::{Cursor, CursorIter, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod list;

mod error;
