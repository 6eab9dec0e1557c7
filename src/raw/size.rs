use super::handle::Handle;

/// Cardinality of a subtree, in `0..=Handle::MAX`.
///
/// Represented over [`Handle`] so it shares the same niche and the same
/// bounds check; a node's size can never exceed what the arena can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    // Subtree bookkeeping on the mutation unwind paths moves in steps of one.
    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        assert!(self.to_usize() != 0, "`Size::decrement()` - `size` is zero!");
        Self::from_usize(self.to_usize() - 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Size` and the niche optimization.
    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - `size` is zero!")]
    fn decrement_zero() {
        let _ = Size::from_usize(0).decrement();
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=Size::MAX) {
            let value = Size::from_usize(size);
            assert_eq!(value.to_usize(), size);
        }

        #[test]
        fn size_steps(size in 1..Size::MAX) {
            let value = Size::from_usize(size);
            assert_eq!(value.increment().to_usize(), size + 1);
            assert_eq!(value.decrement().to_usize(), size - 1);
            assert_eq!(value.increment().decrement(), value);
        }
    }
}
