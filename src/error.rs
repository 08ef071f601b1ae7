use thiserror::Error;

/// Errors returned by [`List`](crate::List) and its cursors.
///
/// Every failing operation leaves the list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The index lies outside the bounds accepted by the operation.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// An absent value (`None`) was given where an element is stored.
    #[error("cannot store an absent value in the list")]
    NullValue,
    /// `next` was called on a cursor with no element after it.
    #[error("no next element")]
    NoNextElement,
    /// `previous` was called on a cursor with no element before it.
    #[error("no previous element")]
    NoPreviousElement,
    /// `set` or `remove` was called on a cursor that has not returned an
    /// element since it was created or last mutated.
    #[error("no element to set or remove, call `next` or `previous` first")]
    IllegalState,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::IndexOutOfBounds { index: 3, len: 2 }.to_string(),
            "index 3 is out of bounds for a list of length 2"
        );
        assert_eq!(Error::NoNextElement.to_string(), "no next element");
        assert_eq!(Error::NoPreviousElement.to_string(), "no previous element");
    }
}
