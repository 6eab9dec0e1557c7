use thiserror::Error;

/// The error returned by fallible rank-indexed operations.
///
/// `pos` is the rejected position and `len` the list's length at the time of
/// the call. Insertion accepts positions up to and including `len`; every
/// other indexed operation accepts `0..len`. Bounds are checked before
/// anything else happens, so a failed call leaves the list unmodified.
///
/// # Examples
///
/// ```
/// use sabi_tree::{OutOfRangeError, SBTreeList};
///
/// let mut list = SBTreeList::from([1, 2, 3]);
/// assert_eq!(list.try_remove(3), Err(OutOfRangeError { pos: 3, len: 3 }));
/// assert_eq!(list.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("position {pos} out of range for list of length {len}")]
pub struct OutOfRangeError {
    /// The rejected position argument.
    pub pos: usize,
    /// The list's length when the operation was attempted.
    pub len: usize,
}
