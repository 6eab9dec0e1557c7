use super::SBTreeList;

impl<T> SBTreeList<T> {
    /// Builds a list of a different element type by running `convert` over
    /// every element during a structural deep-copy walk.
    ///
    /// The result has the same length, the same positional order, and the
    /// same tree shape as `self`; `convert` runs exactly once per element,
    /// in arena order rather than positional order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sabi_tree::SBTreeList;
    ///
    /// let ints = SBTreeList::from([1, 2, 3]);
    /// let floats: SBTreeList<f64> = ints.map(|&v| f64::from(v));
    /// assert_eq!(floats, SBTreeList::from([1.0, 2.0, 3.0]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n).
    #[must_use]
    pub fn map<U, F: FnMut(&T) -> U>(&self, convert: F) -> SBTreeList<U> {
        SBTreeList {
            raw: self.raw.map_ref(convert),
        }
    }

    /// Builds a list of a different element type through that type's `From`
    /// conversion.
    ///
    /// Equivalent to `self.map(|v| U::from(v.clone()))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sabi_tree::SBTreeList;
    ///
    /// let ints = SBTreeList::from([1, 2, 3]);
    /// let floats = ints.convert::<f64>();
    /// assert_eq!(floats, SBTreeList::from([1.0, 2.0, 3.0]));
    /// ```
    #[must_use]
    pub fn convert<U: From<T>>(&self) -> SBTreeList<U>
    where
        T: Clone,
    {
        self.map(|value| U::from(value.clone()))
    }
}
