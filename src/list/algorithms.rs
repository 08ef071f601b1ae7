use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Clone the elements of `other` into the nodes already in `self`, then
    /// drop the surplus nodes or append the missing ones.
    fn clone_from(&mut self, other: &Self) {
        let mut theirs = other.iter();
        for ours in self.iter_mut() {
            match theirs.next() {
                Some(element) => ours.clone_from(element),
                None => break,
            }
        }
        while self.len() > other.len() {
            self.pop_back();
        }
        self.extend(theirs.cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `at >= len`. See [`List::get`] for a non-panicking version.
    fn index(&self, at: usize) -> &T {
        match self.get(at) {
            Ok(element) => element,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for List<T> {
    /// # Panics
    ///
    /// Panics if `at >= len`. See [`List::get_mut`] for a non-panicking
    /// version.
    fn index_mut(&mut self, at: usize) -> &mut T {
        match self.get_mut(at) {
            Ok(element) => element,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn compare_lists() {
        let a = List::from_iter([1, 2, 3]);
        let b = List::from_iter([1, 2, 4]);
        let c = List::from_iter([1, 2]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Less);
        assert_eq!(List::<i32>::new(), List::default());
    }

    #[test]
    fn hash_follows_elements() {
        let a = List::from_iter(["x", "y"]);
        let mut b = List::from_iter(["y"]);
        b.push_front("x").unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));
        b.set(1, "z").unwrap();
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn clone_from_any_length() {
        for (ours, theirs) in [(0, 0), (0, 3), (3, 0), (2, 5), (5, 2), (4, 4)] {
            let mut list = List::from_iter((0..ours).map(|i| i.to_string()));
            let other = List::from_iter((10..10 + theirs).map(|i| i.to_string()));
            list.clone_from(&other);
            assert_eq!(list, other);
            assert_eq!(list.len(), theirs);
        }
    }

    #[test]
    fn index_and_contains() {
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list[0], 1);
        list[2] = 30;
        assert_eq!(list[2], 30);
        assert!(list.contains(&30));
        assert!(!list.contains(&3));
    }

    #[test]
    #[should_panic(expected = "index 3 is out of bounds for a list of length 3")]
    fn index_out_of_bounds() {
        let list = List::from_iter([1, 2, 3]);
        let _element = list[3];
    }
}
