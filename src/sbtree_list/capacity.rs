use super::SBTreeList;
use crate::raw::RawSBTreeList;

impl<T> SBTreeList<T> {
    /// Creates an empty list whose node arena has room for at least
    /// `capacity` elements before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use sabi_tree::SBTreeList;
    ///
    /// let list: SBTreeList<i32> = SBTreeList::with_capacity(16);
    /// assert!(list.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SBTreeList {
            raw: RawSBTreeList::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the node arena can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use sabi_tree::SBTreeList;
    ///
    /// let list: SBTreeList<i32> = SBTreeList::with_capacity(32);
    /// assert_eq!(list.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
