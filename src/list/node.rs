/// Stable key of a node in the arena of a [`List`](crate::List).
///
/// Keys are plain slab indices: the arena owns every node, and links
/// between nodes never own what they point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey(usize);

impl NodeKey {
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub(crate) fn to_raw(self) -> usize {
        self.0
    }
}

pub(crate) struct Node<T> {
    pub(crate) next: Option<NodeKey>,
    pub(crate) prev: Option<NodeKey>,
    /// `None` only for the two sentinels.
    pub(crate) element: Option<T>,
}

impl<T> Node<T> {
    /// Create a sentinel node. It holds no element and is never removed.
    pub(crate) fn sentinel() -> Self {
        Self {
            next: None,
            prev: None,
            element: None,
        }
    }

    /// Create a detached node with given element.
    pub(crate) fn detached(element: T) -> Self {
        Self {
            next: None,
            prev: None,
            element: Some(element),
        }
    }

    pub(crate) fn is_sentinel(&self) -> bool {
        self.element.is_none()
    }

    /// Give the element of a released node back.
    pub(crate) fn into_element(self) -> T {
        match self.element {
            Some(element) => element,
            None => unreachable!("sentinel nodes are never released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKey};

    #[test]
    fn node_sentinel() {
        let sentinel = Node::<i32>::sentinel();
        assert!(sentinel.is_sentinel());
        assert!(sentinel.next.is_none() && sentinel.prev.is_none());

        let mut node = Node::detached(7);
        assert!(!node.is_sentinel());
        node.next = Some(NodeKey::from_raw(1));
        node.prev = Some(NodeKey::from_raw(0));
        assert_eq!(node.into_element(), 7);
    }
}
